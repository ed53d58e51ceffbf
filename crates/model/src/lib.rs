//! FocusLens Data Model
//!
//! Defines the data contracts shared by the tracker, the stream tooling,
//! and the CLI:
//! - **Geometry:** Normalized 2D points and centroids
//! - **Landmarks:** Per-frame facial landmark sets and the gaze index groups
//! - **Frames:** Timestamped landmark observations in JSONL form
//! - **Reports:** Per-frame judgments, attention reports, and session summaries
//! - **Synthetic:** Landmark sets with known gaze geometry for tests and demos
//!
//! All coordinates are normalized to `[0.0, 1.0]` relative to the camera
//! frame so distances are comparable across resolutions.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod landmarks;
pub mod report;
pub mod synthetic;

pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use landmarks::*;
pub use report::*;
