use super::*;

fn sections() -> Vec<Section> {
    vec![
        Section::new("home", 0.0, 600.0),
        Section::new("about", 600.0, 400.0),
        Section::new("contact", 1000.0, 500.0),
    ]
}

#[test]
fn header_is_sticky_from_eighty_pixels() {
    assert!(!scroll_state(79.0, &sections()).header_sticky);
    assert!(scroll_state(80.0, &sections()).header_sticky);
}

#[test]
fn scroll_top_shows_only_past_five_hundred() {
    assert!(!scroll_state(500.0, &sections()).scroll_top_visible);
    assert!(scroll_state(501.0, &sections()).scroll_top_visible);
}

#[test]
fn active_section_uses_header_offset() {
    // 450 + 150 lands exactly on the start of "about".
    assert_eq!(
        scroll_state(450.0, &sections()).active_section.as_deref(),
        Some("about")
    );
    assert_eq!(
        scroll_state(449.0, &sections()).active_section.as_deref(),
        Some("home")
    );
}

#[test]
fn section_range_excludes_its_end() {
    let section = Section::new("about", 600.0, 400.0);
    assert!(section.contains(600.0));
    assert!(!section.contains(1000.0));
}

#[test]
fn overlapping_sections_resolve_to_document_order() {
    let sections = vec![
        Section::new("hero", 0.0, 1000.0),
        Section::new("nested", 100.0, 200.0),
    ];
    assert_eq!(
        active_section(50.0, &sections).map(|s| s.id.as_str()),
        Some("hero")
    );
}

#[test]
fn nothing_is_active_past_the_last_section() {
    assert_eq!(scroll_state(2000.0, &sections()).active_section, None);
    assert_eq!(active_section(0.0, &[]), None);
}
