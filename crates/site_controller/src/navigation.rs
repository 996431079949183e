use crate::scroll::Section;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            active: false,
        }
    }

    fn targets(&self, section_id: &str) -> bool {
        self.href.strip_prefix('#') == Some(section_id)
    }
}

/// Navigation bar links plus the mobile menu toggle.
#[derive(Debug, Clone, Default)]
pub struct Navbar {
    links: Vec<NavLink>,
    menu_open: bool,
}

impl Navbar {
    pub fn new(hrefs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            links: hrefs.into_iter().map(NavLink::new).collect(),
            menu_open: false,
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn active_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.active)
            .map(|link| link.href.as_str())
    }

    /// Clears every link, then activates the one pointing at `section_id`.
    pub fn set_active_section(&mut self, section_id: Option<&str>) {
        for link in &mut self.links {
            link.active = section_id.is_some_and(|id| link.targets(id));
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorAction {
    /// Suppress default navigation and animate to this offset.
    SmoothScroll { top: f64 },
    FollowDefault,
}

/// Resolves a click on an in-page `#id` link against the page's sections.
pub fn resolve_anchor(href: &str, sections: &[Section]) -> AnchorAction {
    let target = href
        .strip_prefix('#')
        .filter(|id| !id.is_empty())
        .and_then(|id| sections.iter().find(|section| section.id == id));

    match target {
        Some(section) => AnchorAction::SmoothScroll { top: section.top },
        None => AnchorAction::FollowDefault,
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
