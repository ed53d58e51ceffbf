//! Print the session summary for a landmark stream.

use std::path::PathBuf;

use focuslens_common::config::AppConfig;

use super::replay::{replay_file, tracker_settings};

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let settings = tracker_settings(config, None, None)?;
    let outcome = replay_file(&path, &settings, |_, _| Ok(()))?;

    tracing::debug!(frames = outcome.frames_read, "Summarized landmark stream");
    println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    Ok(())
}
