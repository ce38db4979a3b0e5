// ABOUTME: Tests for table configuration loading and validation.
// ABOUTME: Covers defaults, JSON, environment lookup, and delay sampling.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use super::{
    DelayRange, ENV_EAT_MS, ENV_MEALS, ENV_PHILOSOPHERS, ENV_THINK_MS, TableConfig, Timing,
};
use crate::error::ConfigError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_default_config_is_valid() {
    let config = TableConfig::default();
    assert_eq!(config.philosophers, 5);
    assert_eq!(config.meals, 7);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_fewer_than_two() {
    for n in [0, 1] {
        match TableConfig::new(n, 3).validate() {
            Err(ConfigError::TooFewPhilosophers(got)) => assert_eq!(got, n),
            other => panic!("Expected TooFewPhilosophers, got {:?}", other),
        }
    }
}

#[test]
fn test_validate_accepts_zero_meals() {
    assert!(TableConfig::new(5, 0).validate().is_ok());
}

#[test]
fn test_validate_rejects_inverted_delay() {
    let mut timing = Timing::instant();
    timing.eat = DelayRange::new(50, 10);
    let config = TableConfig::new(3, 1).with_timing(timing);

    match config.validate() {
        Err(ConfigError::InvalidDelay {
            phase,
            min_ms,
            max_ms,
        }) => {
            assert_eq!(phase, "eat");
            assert_eq!(min_ms, 50);
            assert_eq!(max_ms, 10);
        }
        other => panic!("Expected InvalidDelay, got {:?}", other),
    }
}

#[test]
fn test_from_json_fills_missing_fields() {
    let config = TableConfig::from_json_str(r#"{"philosophers": 3}"#).unwrap();
    assert_eq!(config.philosophers, 3);
    assert_eq!(config.meals, 7);
    assert_eq!(config.timing, Timing::default());
}

#[test]
fn test_from_json_reads_timing() {
    let json = r#"{
        "philosophers": 4,
        "meals": 2,
        "timing": { "think": { "min_ms": 5, "max_ms": 10 }, "eat": { "max_ms": 3 } }
    }"#;
    let config = TableConfig::from_json_str(json).unwrap();
    assert_eq!(config.timing.think, DelayRange::new(5, 10));
    assert_eq!(config.timing.eat, DelayRange::new(0, 3));
    assert_eq!(config.timing.pre_eat, DelayRange::default());
}

#[test]
fn test_from_json_rejects_garbage() {
    let result = TableConfig::from_json_str("not json");
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"philosophers": 6, "meals": 1}}"#).unwrap();

    let config = TableConfig::from_file(file.path()).unwrap();
    assert_eq!(config.philosophers, 6);
    assert_eq!(config.meals, 1);
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = TableConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_from_lookup_overrides_defaults() {
    let config = TableConfig::from_lookup(lookup_from(&[
        (ENV_PHILOSOPHERS, "9"),
        (ENV_MEALS, " 2 "),
        (ENV_THINK_MS, "10-20"),
        (ENV_EAT_MS, "40"),
    ]))
    .unwrap();

    assert_eq!(config.philosophers, 9);
    assert_eq!(config.meals, 2);
    assert_eq!(config.timing.think, DelayRange::new(10, 20));
    assert_eq!(config.timing.eat, DelayRange::new(0, 40));
    assert_eq!(config.timing.pre_eat, DelayRange::default());
}

#[test]
fn test_from_lookup_empty_is_default() {
    let config = TableConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config, TableConfig::default());
}

#[test]
fn test_from_lookup_invalid_value() {
    let result = TableConfig::from_lookup(lookup_from(&[(ENV_MEALS, "lots")]));
    match result {
        Err(ConfigError::InvalidValue { key, value }) => {
            assert_eq!(key, ENV_MEALS);
            assert_eq!(value, "lots");
        }
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_from_lookup_invalid_range() {
    let result = TableConfig::from_lookup(lookup_from(&[(ENV_THINK_MS, "a-b")]));
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_delay_sample_within_range() {
    let range = DelayRange::new(5, 15);
    for _ in 0..100 {
        let d = range.sample();
        assert!(d >= Duration::from_millis(5) && d <= Duration::from_millis(15));
    }
}

#[test]
fn test_zero_delay() {
    let range = DelayRange::zero();
    assert!(range.is_zero());
    assert_eq!(range.sample(), Duration::ZERO);
    assert_eq!(Timing::instant().think.sample(), Duration::ZERO);
}

#[test]
fn test_fixed_delay() {
    let range = DelayRange::new(7, 7);
    assert!(!range.is_zero());
    assert_eq!(range.sample(), Duration::from_millis(7));
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::TooFewPhilosophers(1);
    assert!(err.to_string().contains("at least 2"));

    let err = ConfigError::InvalidValue {
        key: "K".to_string(),
        value: "v".to_string(),
    };
    assert!(err.to_string().contains("K"));
    assert!(err.to_string().contains("'v'"));
}
