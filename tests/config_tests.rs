use std::collections::HashMap;
use std::time::Duration;

use signbridge::config::{Config, ConfigError, DEFAULT_MODELS};
use signbridge::kernel::frame::FrameSample;
use signbridge::kernel::segmenter::GestureSegmenter;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_match_reference_thresholds() {
    let config = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.start_streak, 4);
    assert_eq!(config.end_streak, 6);
    assert_eq!(config.min_sign_frames, 12);
    assert_eq!(config.max_sign_frames, 96);
    assert_eq!(config.max_len, 64);
    assert!((config.min_confidence - 0.4).abs() < f32::EPSILON);
    assert_eq!(config.models, DEFAULT_MODELS);
    assert!(!config.has_remote_backends());
    assert_eq!(config.attempt_timeout(), None);
}

#[test]
fn test_values_are_read_from_keys() {
    let config = Config::from_lookup(lookup(&[
        ("START_STREAK", "3"),
        ("END_STREAK", " 8 "),
        ("MAX_SIGN_FRAMES", "120"),
        ("GEMINI_API_KEY", "secret"),
        ("GEMINI_MODELS", "model-a, model-b,,"),
        ("GEMINI_BASE_URL", "http://localhost:9000/"),
        ("TRANSLATE_ATTEMPT_TIMEOUT_MS", "2500"),
        ("GLOSA_INDEX_PATH", ""),
    ]))
    .unwrap();

    assert_eq!(config.start_streak, 3);
    assert_eq!(config.end_streak, 8);
    assert_eq!(config.segmenter().max_sign_frames, 120);
    assert_eq!(config.models, vec!["model-a", "model-b"]);
    assert_eq!(config.base_url, "http://localhost:9000");
    assert_eq!(config.attempt_timeout(), Some(Duration::from_millis(2500)));
    assert!(config.has_remote_backends());
    assert!(config.gloss_index_path.is_none(), "blank keys keep defaults");
}

#[test]
fn test_bad_values_are_rejected() {
    let err = Config::from_lookup(lookup(&[("END_STREAK", "six")])).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { key: "END_STREAK", .. }));

    let err = Config::from_lookup(lookup(&[("MIN_SIGN_FRAMES", "200")])).unwrap_err();
    assert!(matches!(err, ConfigError::Segmenter(_)));

    let err = Config::from_lookup(lookup(&[("END_STREAK", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Segmenter(_)));

    let err = Config::from_lookup(lookup(&[("MIN_CONFIDENCE", "1.5")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_api_key_is_not_serialized() {
    let config = Config {
        api_key: Some("secret".into()),
        ..Config::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("secret"));
}

#[test]
fn test_huge_max_sign_frames_does_not_preallocate() {
    let max = i64::MAX.to_string();
    let config = Config::from_lookup(lookup(&[
        ("MAX_SIGN_FRAMES", max.as_str()),
        ("FEATURE_DIM", "2"),
    ]))
    .unwrap();
    let mut segmenter = GestureSegmenter::new(config.segmenter()).unwrap();

    for _ in 0..4 {
        assert_eq!(segmenter.push(&FrameSample::present(vec![0.5; 2])).unwrap(), None);
    }
    assert!(segmenter.state().is_recording());
    assert_eq!(segmenter.state().buffered_frames(), 0);
}
