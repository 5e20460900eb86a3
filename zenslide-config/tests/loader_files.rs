use std::io::Write;

use zenslide_config::{ConfigError, ConfigLoader};
use zenslide_model::NavigationType;

fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create options file");
    file.write_all(body.as_bytes()).expect("write options file");
    path
}

#[test]
fn loader_without_path_yields_defaults() {
    let load = ConfigLoader::new().load().expect("load defaults");
    assert_eq!(load.config.autoplay_duration, 5_000);
    assert!(load.warnings.is_empty());
}

#[test]
fn json_overrides_merge_over_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(
        &dir,
        "carousel.json",
        r#"{ "autoplay": false, "touch": { "swipeThreshold": 80 } }"#,
    );

    let load = ConfigLoader::new().with_path(&path).load().expect("load json");
    assert!(!load.config.autoplay);
    assert_eq!(load.config.touch.swipe_threshold, 80.0);
    assert_eq!(load.config.touch.resistance, 0.3);
}

#[test]
fn toml_overrides_merge_over_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(
        &dir,
        "carousel.toml",
        r#"
startAtSlide = 1
mood = "calm"

[navigation]
type = "arrows"

[accessibility.labels]
next = "Forward"
"#,
    );

    let load = ConfigLoader::new().with_path(&path).load().expect("load toml");
    assert_eq!(load.config.start_at_slide, 1);
    assert_eq!(load.config.navigation.kind, NavigationType::Arrows);
    assert_eq!(load.config.accessibility.labels.next, "Forward");
    assert_eq!(load.config.accessibility.labels.previous, "Previous slide");
    assert_eq!(load.warnings.len(), 1, "unknown 'mood' should warn");
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "carousel.yaml", "autoplay: false");
    let err = ConfigLoader::new()
        .with_path(&path)
        .load()
        .expect_err("yaml is not supported");
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = ConfigLoader::new()
        .with_path("/definitely/not/here.json")
        .load()
        .expect_err("missing file");
    assert!(err.to_string().contains("/definitely/not/here.json"));
}
