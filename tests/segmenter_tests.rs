use signbridge::kernel::frame::FrameSample;
use signbridge::kernel::segmenter::{
    GestureSegmenter, SegmentOutcome, SegmentationError, SegmentationState, SegmenterConfig,
};

const DIM: usize = 3;

fn config() -> SegmenterConfig {
    SegmenterConfig {
        start_streak: 4,
        end_streak: 6,
        min_sign_frames: 12,
        max_sign_frames: 96,
        feature_dim: DIM,
    }
}

fn frame(presence: bool, tag: f32) -> FrameSample {
    FrameSample::new(vec![tag; DIM], presence)
}

/// Feeds `pattern` and returns (frame index, outcome) for every frame that ended a gesture.
fn run(segmenter: &mut GestureSegmenter, pattern: &[bool]) -> Vec<(usize, SegmentOutcome)> {
    let mut outcomes = Vec::new();
    for (i, &presence) in pattern.iter().enumerate() {
        if let Some(outcome) = segmenter.push(&frame(presence, i as f32)).unwrap() {
            outcomes.push((i, outcome));
        }
    }
    outcomes
}

fn pattern(runs: &[(bool, usize)]) -> Vec<bool> {
    runs.iter().flat_map(|&(p, n)| std::iter::repeat(p).take(n)).collect()
}

#[test]
fn test_short_presence_bursts_never_start_recording() {
    let mut seg = GestureSegmenter::new(config()).unwrap();
    let mut stream = Vec::new();
    for _ in 0..50 {
        stream.extend(pattern(&[(true, 3), (false, 1)]));
    }

    let outcomes = run(&mut seg, &stream);

    assert!(outcomes.is_empty());
    assert!(!seg.state().is_recording());
    assert_eq!(seg.state().buffered_frames(), 0);
}

#[test]
fn test_trigger_frame_excluded_and_trailing_absent_frames_kept() {
    // 4 present to trigger, 20 present, 6 absent. The 4th present frame only
    // completes the start streak, so the buffer is 20 + 6 = 26 frames.
    let mut seg = GestureSegmenter::new(config()).unwrap();
    let mut stream = pattern(&[(true, 4), (true, 20), (false, 6)]);
    stream.extend(pattern(&[(false, 30)]));

    let outcomes = run(&mut seg, &stream);

    assert_eq!(outcomes.len(), 1, "exactly one gesture");
    let (at, outcome) = &outcomes[0];
    assert_eq!(*at, 29, "ends on the 6th absent frame");
    match outcome {
        SegmentOutcome::Emitted(buffer) => {
            assert_eq!(buffer.len(), 26);
            // First buffered frame is the one right after the trigger.
            assert_eq!(buffer[0][0], 4.0);
            assert_eq!(buffer[25][0], 29.0);
        }
        other => panic!("expected emission, got {:?}", other),
    }
    assert_eq!(*seg.state(), SegmentationState::Idle { present_streak: 0 });
}

#[test]
fn test_hand_never_drops_forces_emission_at_cap() {
    let mut seg = GestureSegmenter::new(config()).unwrap();
    let stream = pattern(&[(true, 200)]);

    let outcomes = run(&mut seg, &stream);

    // 4 frames to trigger + 96 buffered -> first cut at frame 100 (index 99),
    // then the same again ending at frame 200.
    let at: Vec<usize> = outcomes.iter().map(|(i, _)| *i).collect();
    assert_eq!(at, vec![99, 199]);
    for (_, outcome) in &outcomes {
        match outcome {
            SegmentOutcome::Emitted(buffer) => assert_eq!(buffer.len(), 96),
            other => panic!("expected emission, got {:?}", other),
        }
    }
}

#[test]
fn test_gesture_below_minimum_is_discarded() {
    let mut seg = GestureSegmenter::new(config()).unwrap();
    let stream = pattern(&[(true, 4), (true, 3), (false, 6)]);

    let outcomes = run(&mut seg, &stream);

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].1, SegmentOutcome::Discarded(9));
    assert!(!seg.state().is_recording());
}

#[test]
fn test_brief_dropout_does_not_end_gesture() {
    let mut seg = GestureSegmenter::new(config()).unwrap();
    let stream = pattern(&[(true, 4), (true, 10), (false, 3), (true, 10), (false, 6)]);

    let outcomes = run(&mut seg, &stream);

    assert_eq!(outcomes.len(), 1);
    match &outcomes[0].1 {
        SegmentOutcome::Emitted(buffer) => assert_eq!(buffer.len(), 29),
        other => panic!("expected emission, got {:?}", other),
    }
}

#[test]
fn test_emitted_lengths_stay_within_bounds() {
    // xorshift, so the stream is deterministic without pulling in a rand crate
    let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    };

    for _ in 0..20 {
        let mut seg = GestureSegmenter::new(config()).unwrap();
        let mut emitted = 0;
        for i in 0..2_000 {
            // Long runs of either value, with some single-frame flicker.
            let presence = (next() % 100) < 70;
            let outcome = seg.push(&frame(presence, i as f32)).unwrap();
            assert!(seg.state().buffered_frames() < 96);
            if let Some(SegmentOutcome::Emitted(buffer)) = outcome {
                assert!(buffer.len() >= 12 && buffer.len() <= 96, "len {}", buffer.len());
                emitted += 1;
            }
        }
        assert!(emitted > 0);
    }
}

#[test]
fn test_transition_is_pure() {
    let cfg = config();
    let state = SegmentationState::Idle { present_streak: 3 };

    let a = GestureSegmenter::transition(state.clone(), &frame(true, 0.0), &cfg).unwrap();
    let b = GestureSegmenter::transition(state, &frame(true, 0.0), &cfg).unwrap();

    assert_eq!(a, b);
    assert_eq!(
        a.state,
        SegmentationState::Recording {
            buffer: vec![],
            present_streak: 0,
            absent_streak: 0
        }
    );
    assert!(a.outcome.is_none());
}

#[test]
fn test_absent_frame_resets_start_streak() {
    let cfg = config();
    let step = GestureSegmenter::transition(SegmentationState::Idle { present_streak: 3 }, &frame(false, 0.0), &cfg).unwrap();
    assert_eq!(step.state, SegmentationState::Idle { present_streak: 0 });
}

#[test]
fn test_wrong_dimension_is_rejected_and_keeps_buffer() {
    let mut seg = GestureSegmenter::new(config()).unwrap();
    run(&mut seg, &pattern(&[(true, 4), (true, 5)]));
    assert_eq!(seg.state().buffered_frames(), 5);

    let err = seg.push(&FrameSample::present(vec![0.0; DIM + 1])).unwrap_err();

    assert_eq!(err, SegmentationError::InvalidInput { expected: DIM, got: DIM + 1 });
    assert_eq!(seg.state().buffered_frames(), 5);
}

#[test]
fn test_reset_drops_gesture_in_progress() {
    let mut seg = GestureSegmenter::new(config()).unwrap();
    run(&mut seg, &pattern(&[(true, 4), (true, 7)]));

    assert_eq!(seg.reset(), 7);
    assert_eq!(*seg.state(), SegmentationState::default());
}

#[test]
fn test_state_serializes_with_tag() {
    let state = SegmentationState::Recording {
        buffer: vec![vec![1.0, 2.0]],
        present_streak: 1,
        absent_streak: 0,
    };
    let json = serde_json::to_string(&state).unwrap();
    assert!(json.contains(r#""state":"Recording""#), "{}", json);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let mut cfg = config();
    cfg.min_sign_frames = 100;
    assert!(matches!(GestureSegmenter::new(cfg), Err(SegmentationError::InvalidConfig(_))));

    let mut cfg = config();
    cfg.end_streak = 0;
    assert!(GestureSegmenter::new(cfg).is_err());

    let mut cfg = config();
    cfg.start_streak = 0;
    assert!(GestureSegmenter::new(cfg).is_err());
}
