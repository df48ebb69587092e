//! src/cloud/clipboard.rs
//! System clipboard access. Writes block, so the event loop runs them on the
//! blocking pool.

use crate::error::AppError;

pub trait Clipboard: Send {
    fn set_text(&mut self, contents: &str) -> Result<(), AppError>;
}

/// arboard-backed clipboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, AppError> {
        match &mut self.inner {
            Some(clipboard) => Ok(clipboard),
            slot @ None => {
                let clipboard =
                    arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
                Ok(slot.insert(clipboard))
            }
        }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, contents: &str) -> Result<(), AppError> {
        let clipboard = self.ensure()?;
        clipboard
            .set_text(contents.to_string())
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

/// In-memory clipboard for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    pub value: std::sync::Arc<parking_lot::Mutex<Option<String>>>,
    pub fail: bool,
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, contents: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Clipboard("no display".to_string()));
        }
        *self.value.lock() = Some(contents.to_string());
        Ok(())
    }
}
