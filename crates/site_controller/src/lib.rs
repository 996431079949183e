//! Page-side controller for the portfolio site.
//!
//! Browser events come in as [`PageEvent`]s and leave as state changes plus an
//! [`EventOutcome`] describing what the page should do (cancel the default
//! action, scroll somewhere, swap image sources). The one event that reaches the
//! backend is the contact form submission, sent through a [`RelayTransport`].

pub mod form;
pub mod lazy_images;
pub mod navigation;
pub mod notification;
pub mod scroll;
pub mod transport;

pub use form::{ContactForm, SubmitControl, SubmitOutcome};
pub use lazy_images::{IntersectionEntry, LazyImageLoader, SourceSwap};
pub use navigation::{resolve_anchor, AnchorAction, NavLink, Navbar};
pub use notification::{Notification, NotificationKind, NotificationPhase, NotificationSurface};
pub use scroll::{scroll_state, ScrollState, Section};
pub use transport::{HttpRelayClient, RelayTransport, TransportError};

use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Loaded,
    Scrolled { offset: f64 },
    AnchorClicked { href: String },
    NavLinkClicked { href: String },
    MenuIconClicked,
    ScrollTopClicked,
    ImagesIntersected(Vec<IntersectionEntry>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    pub prevent_default: bool,
    pub scroll_to: Option<f64>,
    pub image_swaps: Vec<SourceSwap>,
}

impl EventOutcome {
    fn from_anchor(action: AnchorAction) -> Self {
        match action {
            AnchorAction::SmoothScroll { top } => Self {
                prevent_default: true,
                scroll_to: Some(top),
                image_swaps: Vec::new(),
            },
            AnchorAction::FollowDefault => Self::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SiteController {
    sections: Vec<Section>,
    navbar: Navbar,
    offset: f64,
    scroll: ScrollState,
    images: LazyImageLoader,
    notifications: NotificationSurface,
    form: ContactForm,
}

impl SiteController {
    /// `sections` must be in document order.
    pub fn new(
        sections: Vec<Section>,
        nav_hrefs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            sections,
            navbar: Navbar::new(nav_hrefs),
            ..Self::default()
        }
    }

    pub fn observe_image(&mut self, image_id: impl Into<String>, deferred_src: impl Into<String>) {
        self.images.observe(image_id, deferred_src);
    }

    pub fn handle(&mut self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::Loaded => {
                self.refresh_scroll();
                EventOutcome::default()
            }
            PageEvent::Scrolled { offset } => {
                self.offset = offset;
                self.refresh_scroll();
                EventOutcome::default()
            }
            PageEvent::AnchorClicked { href } => {
                EventOutcome::from_anchor(resolve_anchor(&href, &self.sections))
            }
            PageEvent::NavLinkClicked { href } => {
                self.navbar.close_menu();
                EventOutcome::from_anchor(resolve_anchor(&href, &self.sections))
            }
            PageEvent::MenuIconClicked => {
                self.navbar.toggle_menu();
                EventOutcome::default()
            }
            PageEvent::ScrollTopClicked => {
                EventOutcome::from_anchor(AnchorAction::SmoothScroll { top: 0.0 })
            }
            PageEvent::ImagesIntersected(entries) => {
                let image_swaps = self.images.on_intersection(&entries);
                debug!(swapped = image_swaps.len(), "lazy images loaded");
                EventOutcome {
                    image_swaps,
                    ..EventOutcome::default()
                }
            }
        }
    }

    pub async fn submit_contact_form(&mut self, transport: &dyn RelayTransport) -> SubmitOutcome {
        self.form.submit(transport, &mut self.notifications).await
    }

    fn refresh_scroll(&mut self) {
        self.scroll = scroll_state(self.offset, &self.sections);
        self.navbar
            .set_active_section(self.scroll.active_section.as_deref());
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn images(&self) -> &LazyImageLoader {
        &self.images
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn notifications(&self) -> &NotificationSurface {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationSurface {
        &mut self.notifications
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
