//! Clipboard and URL hand-off capabilities

use anyhow::Result;
use async_trait::async_trait;

/// Clipboard write capability, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    /// Write literal text to the system clipboard
    async fn set_text(&self, text: String) -> Result<()>;
}

/// The real system clipboard. The handle is blocking, so writes run on the
/// blocking pool.
pub struct SystemClipboard;

#[async_trait]
impl ClipboardSink for SystemClipboard {
    async fn set_text(&self, text: String) -> Result<()> {
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(text)?;
            Ok(())
        })
        .await?
    }
}

/// URL hand-off capability, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Hand a URL to the system default handler
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform handler, detached from this process.
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn open_url(&self, url: &str) -> Result<()> {
        open::that_detached(url)?;
        Ok(())
    }
}
