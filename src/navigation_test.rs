use super::*;

const OFFSET: f64 = 100.0;

fn page() -> Vec<Option<SectionBounds>> {
    vec![
        Some(SectionBounds::new(0.0, 600.0)),
        Some(SectionBounds::new(600.0, 800.0)),
        Some(SectionBounds::new(1400.0, 500.0)),
    ]
}

#[test]
fn probe_inside_first_section() {
    assert_eq!(active_link(&page(), 0.0, OFFSET), Some(0));
}

#[test]
fn probe_uses_scroll_plus_offset() {
    // 500 + 100 lands exactly on the second section's top.
    assert_eq!(active_link(&page(), 500.0, OFFSET), Some(1));
    assert_eq!(active_link(&page(), 499.0, OFFSET), Some(0));
}

#[test]
fn section_end_is_exclusive() {
    // 1300 + 100 = 1400: end of section 1, start of section 2.
    assert_eq!(active_link(&page(), 1300.0, OFFSET), Some(2));
}

#[test]
fn no_section_means_no_active_link() {
    assert_eq!(active_link(&page(), 5_000.0, OFFSET), None);
    let gapped = vec![Some(SectionBounds::new(400.0, 100.0))];
    assert_eq!(active_link(&gapped, 0.0, OFFSET), None);
}

#[test]
fn missing_target_never_matches() {
    let targets = vec![None, Some(SectionBounds::new(0.0, 1000.0))];
    assert_eq!(active_link(&targets, 0.0, OFFSET), Some(1));
    assert_eq!(active_link(&[None, None], 0.0, OFFSET), None);
}

#[test]
fn overlapping_ranges_pick_last_in_link_order() {
    let targets = vec![Some(SectionBounds::new(0.0, 1000.0)), Some(SectionBounds::new(50.0, 200.0))];
    assert_eq!(active_link(&targets, 0.0, OFFSET), Some(1));
}

#[test]
fn header_class_is_pure_threshold() {
    assert!(!header_scrolled(0.0, 50.0));
    assert!(!header_scrolled(50.0, 50.0));
    assert!(header_scrolled(50.5, 50.0));
    assert!(header_scrolled(900.0, 50.0));
    assert!(!header_scrolled(10.0, 50.0));
}

#[test]
fn fragment_id_strips_hash() {
    assert_eq!(fragment_id("#about"), Some("about"));
    assert_eq!(fragment_id("#"), None);
    assert_eq!(fragment_id("about"), None);
    assert_eq!(fragment_id("https://example.com/#about"), None);
}

#[test]
fn click_marks_link_active_regardless_of_scroll() {
    let mut nav = NavState::new();
    nav.on_scroll(&page(), 0.0, OFFSET);
    assert_eq!(nav.active(), Some(0));
    nav.on_link_click(2);
    assert_eq!(nav.active(), Some(2));
}

#[test]
fn scroll_recomputes_after_click() {
    let mut nav = NavState::new();
    nav.on_link_click(2);
    assert_eq!(nav.on_scroll(&page(), 700.0, OFFSET), Some(1));
    assert_eq!(nav.active(), Some(1));
}

#[test]
fn menu_toggle_flips_each_call() {
    let mut nav = NavState::new();
    assert!(!nav.menu().is_expanded());
    assert!(nav.toggle_menu());
    assert!(nav.menu().is_expanded());
    assert!(!nav.toggle_menu());
    assert!(!nav.menu().is_expanded());
}

#[test]
fn link_click_forces_menu_closed() {
    let mut nav = NavState::new();
    nav.toggle_menu();
    nav.on_link_click(0);
    assert!(!nav.menu().is_expanded());
    nav.on_link_click(1);
    assert!(!nav.menu().is_expanded());
}
