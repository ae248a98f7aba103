//! Side-effect dispatch for context menu actions
//!
//! The dispatcher closes the owning menu before any effect runs, hands
//! navigation kinds to the system synchronously, and settles the two
//! asynchronous kinds (reveal, copy) on spawned tasks that report exactly
//! one outcome each through an unbounded channel. The event loop drains
//! that channel; outcomes from overlapping invocations apply in arrival
//! order, last write wins.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::effects::{ClipboardSink, Navigator};
use crate::remote::ServerClientTrait;
use crate::state::actions::{ActionEntry, OpenKind};
use crate::state::{Announcer, ControlId, FeedbackState, MenuSession};

/// Announcement for an acknowledged reveal request
pub const REVEAL_OK: &str = "Opened folder in file manager";
/// Announcement for a rejected or failed reveal request
pub const REVEAL_FAILED: &str =
    "Failed to open folder in file manager. Check if the folder exists.";
/// Announcement for a completed clipboard write
pub const COPY_OK: &str = "Copied to clipboard";
/// Announcement for a failed clipboard write
pub const COPY_FAILED: &str = "Failed to copy to clipboard";

/// Settled result of one asynchronous effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    RevealSucceeded,
    RevealFailed,
    CopySucceeded { control: ControlId },
    CopyFailed,
}

impl EffectOutcome {
    /// Route a settled outcome to user-visible feedback.
    pub fn apply(self, announcer: &mut Announcer, feedback: &mut FeedbackState) {
        match self {
            Self::RevealSucceeded => announcer.announce(REVEAL_OK),
            Self::RevealFailed => announcer.announce(REVEAL_FAILED),
            Self::CopySucceeded { control } => {
                feedback.mark_copied(control);
                announcer.announce(COPY_OK);
            }
            Self::CopyFailed => announcer.announce(COPY_FAILED),
        }
    }
}

/// Executes menu actions and reports the outcomes of their effects
pub struct Dispatcher {
    server: Arc<dyn ServerClientTrait>,
    clipboard: Arc<dyn ClipboardSink>,
    navigator: Arc<dyn Navigator>,
    outcomes: mpsc::UnboundedSender<EffectOutcome>,
}

impl Dispatcher {
    pub fn new(
        server: Arc<dyn ServerClientTrait>,
        clipboard: Arc<dyn ClipboardSink>,
        navigator: Arc<dyn Navigator>,
    ) -> (Self, mpsc::UnboundedReceiver<EffectOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        (
            Self {
                server,
                clipboard,
                navigator,
                outcomes,
            },
            receiver,
        )
    }

    /// Run the visible menu entry at `index`.
    ///
    /// The menu closes before the effect proceeds, so it is never open
    /// across an asynchronous effect.
    pub fn dispatch(&self, menu: &mut MenuSession, index: usize, control: ControlId) {
        let entry = menu.entry_at(index);
        menu.close();
        if let Some(entry) = entry {
            self.run(entry, control);
        }
    }

    /// Execute one entry's effect. Hidden entries are never executed.
    pub fn run(&self, entry: ActionEntry, control: ControlId) {
        if !entry.visible || entry.payload.is_empty() {
            return;
        }
        match entry.kind {
            OpenKind::Navigate | OpenKind::Download | OpenKind::OpenFolder => {
                // Fire and forget; the system handler owns it from here.
                if let Err(err) = self.navigator.open_url(&entry.payload) {
                    tracing::warn!("Failed to hand off {}: {err:#}", entry.payload);
                }
            }
            OpenKind::RevealLocation => {
                let server = Arc::clone(&self.server);
                let outcomes = self.outcomes.clone();
                tokio::spawn(async move {
                    let outcome = match server.open_in_file_manager(&entry.payload).await {
                        Ok(()) => EffectOutcome::RevealSucceeded,
                        Err(err) => {
                            tracing::warn!("Reveal request for {} failed: {err:#}", entry.payload);
                            EffectOutcome::RevealFailed
                        }
                    };
                    let _ = outcomes.send(outcome);
                });
            }
            OpenKind::CopyPath => {
                let clipboard = Arc::clone(&self.clipboard);
                let outcomes = self.outcomes.clone();
                tokio::spawn(async move {
                    let outcome = match clipboard.set_text(entry.payload).await {
                        Ok(()) => EffectOutcome::CopySucceeded { control },
                        Err(err) => {
                            tracing::error!("Failed to copy to clipboard: {err:#}");
                            EffectOutcome::CopyFailed
                        }
                    };
                    let _ = outcomes.send(outcome);
                });
            }
        }
    }
}
