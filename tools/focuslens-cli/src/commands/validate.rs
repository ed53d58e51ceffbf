//! Validate a FocusLens landmark stream.

use std::path::PathBuf;

use focuslens_model::landmarks::GazeIndexGroups;
use focuslens_stream::{validate_source, JsonlReplaySource};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating landmark stream at: {}", path.display());

    let mut source = JsonlReplaySource::open(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open landmark stream: {e}"))?;

    match source.header() {
        Some(header) => {
            println!("  Schema: {}", header.schema_version);
            if !header.source.is_empty() {
                println!("  Source: {}", header.source);
            }
            if let Some(fps) = header.fps {
                println!("  FPS: {fps}");
            }
        }
        None => println!("  Header: none"),
    }

    let result = validate_source(&mut source, &GazeIndexGroups::FACE_MESH)
        .map_err(|e| anyhow::anyhow!("Failed to read landmark stream: {e}"))?;

    println!("  Frames: {}", result.frames);
    println!("  Face frames: {}", result.face_frames);
    println!("  Duration: {:.2}s", result.duration_secs());

    if result.is_valid() {
        println!("\nStream is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &result.issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Stream may not replay cleanly.",
            result.issues.len()
        );
    }

    Ok(())
}
