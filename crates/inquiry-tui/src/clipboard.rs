//! System clipboard access.
//!
//! The clipboard can be missing (SSH sessions, headless terminals), so it is
//! opened lazily and every failure comes back as an error the App turns into
//! a status message.

use inquiry_core::export::Clipboard;
use inquiry_core::{InquiryError, Result};

/// The desktop clipboard via arboard.
///
/// The handle is kept for the life of the app: on X11 the copied text is
/// only served while the owning `arboard::Clipboard` is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| InquiryError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| InquiryError::Clipboard("clipboard not available".into()))
    }

    /// Read text for Ctrl+V.
    pub fn get_text(&mut self) -> Result<String> {
        self.handle()?
            .get_text()
            .map_err(|e| InquiryError::Clipboard(e.to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.handle()?
            .set_text(text)
            .map_err(|e| InquiryError::Clipboard(e.to_string()))
    }
}
