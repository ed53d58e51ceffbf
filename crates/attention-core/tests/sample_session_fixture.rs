use std::path::PathBuf;
use std::sync::Arc;

use focuslens_common::clock::ManualClock;
use focuslens_core::AttentionSession;
use focuslens_model::frame::{parse_frames, FrameRecord};
use focuslens_model::report::FrameJudgment;

fn load_fixture_frames() -> Vec<FrameRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("frames.jsonl");

    let content = std::fs::read_to_string(path).expect("fixture frames should be readable");
    parse_frames(&content).expect("fixture frames should parse")
}

#[test]
fn fixture_statuses_follow_recorded_gaze() {
    let frames = load_fixture_frames();
    assert_eq!(frames.len(), 30);

    let clock = Arc::new(ManualClock::new());
    let mut session = AttentionSession::new(clock.clone());
    session.start().unwrap();

    let statuses: String = frames
        .iter()
        .map(|frame| {
            clock.set_ns(frame.timestamp_ns);
            match session.process_frame(&frame.observation).unwrap().status {
                FrameJudgment::Focused => 'F',
                FrameJudgment::LookingAway => 'A',
                FrameJudgment::NoFace => 'N',
            }
        })
        .collect();

    assert_eq!(statuses, "NNFFFFFFFFAAAANNFFFFFFFFFFAAAA");
}

#[test]
fn fixture_summary_counts_only_face_frames() {
    let frames = load_fixture_frames();
    let clock = Arc::new(ManualClock::new());
    let mut session = AttentionSession::new(clock.clone());
    session.start().unwrap();

    let mut last_score = None;
    for frame in &frames {
        clock.set_ns(frame.timestamp_ns);
        last_score = session
            .process_frame(&frame.observation)
            .unwrap()
            .instantaneous_score_percent;
    }

    let summary = session.stop().unwrap();
    assert_eq!(summary.total_frames, 26);
    assert_eq!(summary.focused_frames, 18);
    assert_eq!(summary.overall_focus_percent, Some(100.0 * 18.0 / 26.0));
    assert_eq!(summary.total_elapsed_seconds, 2);
    assert!((summary.elapsed_seconds - 2.9).abs() < 1e-9);

    // Every face frame fits in the default window, so both scores agree.
    assert_eq!(last_score, summary.overall_focus_percent);
}
