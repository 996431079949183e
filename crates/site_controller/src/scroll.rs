//! Scroll-driven page chrome: sticky header, active nav link, scroll-to-top.

/// Header turns sticky at or beyond this offset.
pub const STICKY_HEADER_OFFSET: f64 = 80.0;
/// Added to the scroll offset before testing sections, to account for the header.
pub const NAV_ACTIVATION_OFFSET: f64 = 150.0;
/// Scroll-to-top control shows strictly beyond this offset.
pub const SCROLL_TOP_THRESHOLD: f64 = 500.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub header_sticky: bool,
    pub active_section: Option<String>,
    pub scroll_top_visible: bool,
}

/// First section in document order containing `offset + NAV_ACTIVATION_OFFSET`.
pub fn active_section(offset: f64, sections: &[Section]) -> Option<&Section> {
    let position = offset + NAV_ACTIVATION_OFFSET;
    sections.iter().find(|section| section.contains(position))
}

pub fn scroll_state(offset: f64, sections: &[Section]) -> ScrollState {
    ScrollState {
        header_sticky: offset >= STICKY_HEADER_OFFSET,
        active_section: active_section(offset, sections).map(|section| section.id.clone()),
        scroll_top_visible: offset > SCROLL_TOP_THRESHOLD,
    }
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
