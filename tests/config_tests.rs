// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use sensor_view::constants::DEFAULT_LABELS;
use sensor_view::{AppError, Config, VisualMode};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.label_pool.len(), DEFAULT_LABELS.len());
    assert_eq!(config.visual_mode, VisualMode::Camera);
    assert!(config.reliable_range_override.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_round_trip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        label_pool: vec!["hello".into()],
        visual_mode: VisualMode::Depth,
        reliable_range_override: Some((600, 4000)),
        ..Default::default()
    };
    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "visual_mode": "Infrared" }"#).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.visual_mode, VisualMode::Infrared);
    assert_eq!(config.label_pool, Config::default().label_pool);
    assert_eq!(config.layout, Config::default().layout);
}

#[test]
fn test_empty_label_pool_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "label_pool": [] }"#).unwrap();
    assert!(matches!(Config::load(&path), Err(AppError::Config(_))));
}

#[test]
fn test_inverted_range_rejected() {
    let config = Config {
        reliable_range_override: Some((4000, 500)),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_bad_display_scale_rejected() {
    let mut config = Config::default();
    config.layout.display_scale = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[test]
fn test_reliable_range_prefers_override() {
    let mut config = Config::default();
    assert_eq!(config.reliable_range((500, 4500)), (500, 4500));
    config.reliable_range_override = Some((800, 3000));
    assert_eq!(config.reliable_range((500, 4500)), (800, 3000));
}
