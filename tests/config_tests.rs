use photo_slideshow::config::Configuration;
use photo_slideshow::placeholder::BG_COLOR_TOKEN;

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
default-duration-secs: 8
fade-ms: 400
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.default_duration_secs, 8);
    assert_eq!(cfg.fade_ms, 400);
    // Unset fields keep their defaults.
    assert_eq!(cfg.min_duration_secs, 1);
    assert_eq!(cfg.preload_on_enter, 5);
    assert!(!cfg.default_randomize);
}

#[test]
fn parse_with_shuffle_seed() {
    let yaml = r#"
default-randomize: true
shuffle-seed: 7
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.default_randomize);
    assert_eq!(cfg.shuffle_seed, Some(7));
}

#[test]
fn parse_with_preload_counts() {
    let yaml = r#"
preload-on-enter: 8
preload-ahead: 4
preload-behind: 1
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.preload_on_enter, 8);
    assert_eq!(cfg.preload_ahead, 4);
    assert_eq!(cfg.preload_behind, 1);
    assert!(cfg.validated().is_ok());
}

#[test]
fn parse_with_placeholder_overrides() {
    let yaml = r#"
placeholder-bg-color: "a1b2c3"
error-placeholder: "err://{bgColor}"
empty-placeholder: "empty://{bgColor}"
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.placeholder_bg_color, "a1b2c3");
    assert_eq!(cfg.error_placeholder, "err://{bgColor}");
    assert!(cfg.validated().is_ok());
}

#[test]
fn default_placeholders_carry_the_color_token() {
    let cfg = Configuration::default();
    assert!(cfg.error_placeholder.contains(BG_COLOR_TOKEN));
    assert!(cfg.empty_placeholder.contains(BG_COLOR_TOKEN));
}

#[test]
fn load_from_file_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "default-duration-secs: 10\nmin-duration-secs: 2\nfade-ms: 150\n",
    )
    .unwrap();

    let cfg = Configuration::from_yaml_file(&path)
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(cfg.default_duration_secs, 10);
    assert_eq!(cfg.min_duration_secs, 2);
    assert_eq!(cfg.fade_ms, 150);
}

#[test]
fn validation_rejects_inconsistent_durations() {
    let yaml = r#"
default-duration-secs: 1
min-duration-secs: 3
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn validation_rejects_zero_minimum() {
    let yaml = "min-duration-secs: 0\n";
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn missing_config_file_is_an_error() {
    assert!(Configuration::from_yaml_file("/does/not/exist.yaml").is_err());
}
