use super::*;

#[test]
fn boot_order_is_fixed() {
    assert_eq!(
        BOOT_ORDER.map(Feature::name),
        ["theme", "navigation", "skills", "sections", "form", "smooth-scroll", "lazy-load", "visibility"]
    );
}

#[test]
fn report_keeps_record_order_and_counts() {
    let mut report = BootReport::new();
    report.record(Feature::Theme, Attach::Bound);
    report.record(Feature::Form, Attach::Absent);
    report.record(Feature::LazyLoad, Attach::Failed("bad selector".to_owned()));
    report.record(Feature::Visibility, Attach::Bound);

    assert_eq!(report.features(), vec![Feature::Theme, Feature::Form, Feature::LazyLoad, Feature::Visibility]);
    assert_eq!(report.outcome(Feature::Form), Some(&Attach::Absent));
    assert_eq!(report.outcome(Feature::Skills), None);
    assert_eq!(report.summary(), "2 bound, 1 absent, 1 failed");
}

#[test]
fn missing_config_block_uses_defaults() {
    let (config, err) = load_config(None);
    assert_eq!(config, SiteConfig::default());
    assert!(err.is_none());

    let (config, err) = load_config(Some("   \n"));
    assert_eq!(config, SiteConfig::default());
    assert!(err.is_none());
}

#[test]
fn malformed_config_block_falls_back_with_error() {
    let (config, err) = load_config(Some("{ not json"));
    assert_eq!(config, SiteConfig::default());
    assert!(matches!(err, Some(ConfigError::Parse(_))));
}

#[test]
fn valid_config_block_is_applied() {
    let (config, err) = load_config(Some(r#"{ "classes": { "header_scrolled": "is-stuck" } }"#));
    assert!(err.is_none());
    assert_eq!(config.classes.header_scrolled, "is-stuck");
}
