use std::time::{Duration, Instant};

pub const SHOW_DELAY: Duration = Duration::from_millis(100);
pub const DISMISS_AFTER: Duration = Duration::from_millis(3000);
pub const REMOVE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// In the document but not yet faded in.
    Mounted,
    Shown,
    Hiding,
    Removed,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn phase(&self, now: Instant) -> NotificationPhase {
        let elapsed = now.saturating_duration_since(self.created_at);
        if elapsed < SHOW_DELAY {
            NotificationPhase::Mounted
        } else if elapsed < DISMISS_AFTER {
            NotificationPhase::Shown
        } else if elapsed < DISMISS_AFTER + REMOVE_DELAY {
            NotificationPhase::Hiding
        } else {
            NotificationPhase::Removed
        }
    }
}

/// Stack of transient toasts. Nothing is de-duplicated.
#[derive(Debug, Default)]
pub struct NotificationSurface {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationSurface {
    /// Adds a toast, dropping any that have already left the document.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> u64 {
        self.prune(now);
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            kind,
            message: message.into(),
            created_at: now,
        });
        id
    }

    /// Notifications still in the document at `now`, oldest first.
    pub fn mounted(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.entries
            .iter()
            .filter(move |n| n.phase(now) != NotificationPhase::Removed)
    }

    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.entries
            .iter()
            .filter(move |n| n.phase(now) == NotificationPhase::Shown)
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn prune(&mut self, now: Instant) {
        self.entries
            .retain(|n| n.phase(now) != NotificationPhase::Removed);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
