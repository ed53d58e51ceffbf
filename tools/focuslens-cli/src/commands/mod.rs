pub mod config;
pub mod replay;
pub mod summarize;
pub mod validate;
