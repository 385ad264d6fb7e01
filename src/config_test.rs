use super::*;

#[test]
fn empty_object_matches_defaults() {
    let config = SiteConfig::from_json("{}").expect("empty config should parse");
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn defaults_carry_documented_timings() {
    let timings = Timings::default();
    assert_eq!(timings.nav_probe_offset_px, 100.0);
    assert_eq!(timings.header_threshold_px, 50.0);
    assert_eq!(timings.skill_stagger_ms, 100);
    assert_eq!(timings.section_threshold, 0.1);
    assert_eq!(timings.status_clear_ms, 5_000);
    assert_eq!(timings.lazy_root_margin, "50px");
}

#[test]
fn partial_override_keeps_other_fields() {
    let raw = r##"{ "selectors": { "contact_form": "#hire-me" }, "timings": { "status_clear_ms": 2500 } }"##;
    let config = SiteConfig::from_json(raw).expect("partial config should parse");
    assert_eq!(config.selectors.contact_form, "#hire-me");
    assert_eq!(config.selectors.nav_links, ".nav-link");
    assert_eq!(config.timings.status_clear_ms, 2500);
    assert_eq!(config.timings.skill_stagger_ms, 100);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = SiteConfig::from_json("{ selectors: ").expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn wrong_field_type_is_a_parse_error() {
    let err = SiteConfig::from_json(r#"{ "timings": { "skill_stagger_ms": "fast" } }"#).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn log_level_defaults_to_info() {
    assert_eq!(SiteConfig::default().log_level().expect("default level"), log::Level::Info);
}

#[test]
fn log_level_is_case_insensitive() {
    let config = SiteConfig::from_json(r#"{ "log_level": "DEBUG" }"#).expect("level should parse");
    assert_eq!(config.log_level().expect("level"), log::Level::Debug);
}

#[test]
fn unknown_log_level_is_rejected() {
    let err = SiteConfig::from_json(r#"{ "log_level": "chatty" }"#).expect_err("should fail");
    assert!(matches!(err, ConfigError::LogLevel(ref level) if level == "chatty"));
}
