//! FocusLens Attention Core
//!
//! Turns a stream of facial landmark observations into attention scores:
//! - **Classifier:** Per-frame focused / looking-away verdict from iris offsets
//! - **Smoother:** Rolling-window instantaneous attention score
//! - **Aggregator:** Session-wide focused-frame statistics
//! - **Session:** Start/stop lifecycle tying the three together
//!
//! This crate is pure computation: no I/O, no camera, no model inference.
//! All inputs are data; all outputs are data.

pub mod aggregator;
pub mod classifier;
pub mod session;
pub mod smoother;

pub use aggregator::SessionAggregator;
pub use classifier::{GazeClassifier, IrisOffsetClassifier};
pub use session::{AttentionSession, SessionState};
pub use smoother::AttentionSmoother;
