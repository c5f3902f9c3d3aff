//! Clipboard access for share links.

use async_trait::async_trait;
use crossterm::{clipboard::CopyToClipboard, execute};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Clipboard error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Clipboard error: {} at {}:{}", message, file, line)]
pub struct ClipboardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClipboardError {
    /// Creates a new clipboard error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for ClipboardError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Somewhere to put text for the user to paste.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the write cannot be issued.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Terminal clipboard using the OSC 52 escape sequence.
///
/// The terminal emulator performs the copy; terminals without OSC 52
/// support ignore the sequence silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

#[async_trait]
impl Clipboard for Osc52Clipboard {
    #[instrument(skip(self, text), fields(len = text.len()))]
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        execute!(std::io::stdout(), CopyToClipboard::to_clipboard_from(text))?;
        debug!("OSC 52 copy sent");
        Ok(())
    }
}
