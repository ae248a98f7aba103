//! Accessible status announcements
//!
//! One announcer per app. Messages replace each other and clear on their
//! own after `FEEDBACK_TIMEOUT`; whichever announcement lands last owns
//! the region.

use std::time::{Duration, Instant};

/// How long feedback text stays visible before clearing.
pub const FEEDBACK_TIMEOUT: Duration = Duration::from_millis(1200);

/// Self-clearing status text region.
#[derive(Debug, Default)]
pub struct Announcer {
    message: String,
    announced_at: Option<Instant>,
}

impl Announcer {
    /// Replace the region content.
    ///
    /// A non-empty message re-arms the clear window, superseding any
    /// pending clear. An empty message blanks the region without arming a
    /// timer.
    pub fn announce(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.announced_at = (!self.message.is_empty()).then(Instant::now);
    }

    /// Drop the message once its window has elapsed. Called every tick.
    pub fn update(&mut self) {
        if let Some(at) = self.announced_at {
            if at.elapsed() >= FEEDBACK_TIMEOUT {
                self.message.clear();
                self.announced_at = None;
            }
        }
    }

    /// The currently displayed message, if any.
    pub fn current(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewind(announcer: &mut Announcer, by: Duration) {
        if let Some(at) = announcer.announced_at.as_mut() {
            *at -= by;
        }
    }

    #[test]
    fn test_starts_silent() {
        let announcer = Announcer::default();
        assert_eq!(announcer.current(), None);
    }

    #[test]
    fn test_announce_shows_message() {
        let mut announcer = Announcer::default();
        announcer.announce("Copied to clipboard");
        assert_eq!(announcer.current(), Some("Copied to clipboard"));
    }

    #[test]
    fn test_update_clears_after_window() {
        let mut announcer = Announcer::default();
        announcer.announce("Copied to clipboard");
        rewind(&mut announcer, FEEDBACK_TIMEOUT);
        announcer.update();
        assert_eq!(announcer.current(), None);
    }

    #[test]
    fn test_update_keeps_message_inside_window() {
        let mut announcer = Announcer::default();
        announcer.announce("Copied to clipboard");
        rewind(&mut announcer, FEEDBACK_TIMEOUT / 2);
        announcer.update();
        assert_eq!(announcer.current(), Some("Copied to clipboard"));
    }

    #[test]
    fn test_reannounce_supersedes_pending_clear() {
        let mut announcer = Announcer::default();
        announcer.announce("first");
        rewind(&mut announcer, FEEDBACK_TIMEOUT - Duration::from_millis(100));
        announcer.announce("second");
        // The first message's window elapsing must not clear the second.
        rewind(&mut announcer, Duration::from_millis(200));
        announcer.update();
        assert_eq!(announcer.current(), Some("second"));
    }

    #[test]
    fn test_empty_announce_clears_without_timer() {
        let mut announcer = Announcer::default();
        announcer.announce("something");
        announcer.announce("");
        assert_eq!(announcer.current(), None);
        assert!(announcer.announced_at.is_none());
    }
}
