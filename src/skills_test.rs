use super::*;

fn widths(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|w| Some((*w).to_owned())).collect()
}

#[test]
fn data_width_is_read_as_percentage() {
    assert_eq!(target_width(Some("85"), ""), Some("85%".to_owned()));
    assert_eq!(target_width(Some(" 62.5% "), "10%"), Some("62.5%".to_owned()));
}

#[test]
fn data_width_is_clamped() {
    assert_eq!(target_width(Some("140"), ""), Some("100%".to_owned()));
    assert_eq!(target_width(Some("-3"), ""), Some("0%".to_owned()));
}

#[test]
fn inline_width_is_the_fallback() {
    assert_eq!(target_width(None, "90%"), Some("90%".to_owned()));
    assert_eq!(target_width(Some("lots"), "70%"), Some("70%".to_owned()));
    assert_eq!(target_width(None, "  "), None);
}

#[test]
fn first_visible_intersection_schedules_staggered_fills() {
    let mut reveal = SkillReveal::new(widths(&["90%", "80%", "70%"]), 100);
    let steps = reveal.on_intersect(true).expect("first intersection should fill");
    assert_eq!(
        steps,
        vec![
            FillStep { index: 0, delay_ms: 0, width: "90%".to_owned() },
            FillStep { index: 1, delay_ms: 100, width: "80%".to_owned() },
            FillStep { index: 2, delay_ms: 200, width: "70%".to_owned() },
        ]
    );
    assert!(reveal.has_animated());
}

#[test]
fn second_intersection_does_nothing() {
    let mut reveal = SkillReveal::new(widths(&["50%"]), 100);
    assert!(reveal.on_intersect(true).is_some());
    assert!(reveal.on_intersect(true).is_none());
    assert!(reveal.on_intersect(false).is_none());
}

#[test]
fn non_intersecting_report_does_not_consume_trigger() {
    let mut reveal = SkillReveal::new(widths(&["50%"]), 100);
    assert!(reveal.on_intersect(false).is_none());
    assert!(!reveal.has_animated());
    assert!(reveal.on_intersect(true).is_some());
}

#[test]
fn bars_without_target_keep_their_slot_in_the_stagger() {
    let mut reveal = SkillReveal::new(vec![Some("40%".to_owned()), None, Some("60%".to_owned())], 100);
    let steps = reveal.on_intersect(true).expect("should fill");
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1].index, 2);
    assert_eq!(steps[1].delay_ms, 200);
}

#[test]
fn empty_section_still_fires_once() {
    let mut reveal = SkillReveal::new(Vec::new(), 100);
    assert_eq!(reveal.on_intersect(true), Some(Vec::new()));
    assert_eq!(reveal.on_intersect(true), None);
}

#[test]
fn only_bars_with_a_target_are_collapsed() {
    let reveal = SkillReveal::new(vec![Some("40%".to_owned()), None, Some("60%".to_owned())], 100);
    assert_eq!(reveal.bars_to_collapse(), vec![0, 2]);
}

#[test]
fn bar_with_no_width_source_is_left_alone() {
    let width = target_width(None, "");
    let reveal = SkillReveal::new(vec![width], 100);
    assert!(reveal.bars_to_collapse().is_empty());
}
