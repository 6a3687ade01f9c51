//!
//! Clipboard access for copy/cut/paste.
//!
//! The masked input only knows the [Clipboard] trait. Plug in
//! whatever system clipboard crate fits, or use the
//! [LocalClipboard] which keeps the text inside the application.
//!

use crate::TextError;
use dyn_clone::{clone_box, DynClone};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardError {
    /// The clipboard could not be accessed.
    Unavailable,
    /// The content must not leave the field. Password fields.
    Refused,
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for ClipboardError {}

impl From<ClipboardError> for TextError {
    fn from(_value: ClipboardError) -> Self {
        TextError::Clipboard
    }
}

/// Access some clipboard.
pub trait Clipboard: DynClone + Debug {
    /// Current clipboard text.
    fn get_string(&self) -> Result<String, ClipboardError>;

    /// Replace the clipboard text.
    fn set_string(&self, s: &str) -> Result<(), ClipboardError>;
}

impl Clone for Box<dyn Clipboard> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

static GLOBAL_CLIPBOARD: OnceLock<SharedClipboard> = OnceLock::new();

/// Clipboard shared by all masked inputs that don't get their own.
pub fn global_clipboard() -> Box<dyn Clipboard> {
    Box::new(GLOBAL_CLIPBOARD.get_or_init(SharedClipboard::default).clone())
}

/// Install a different clipboard behind [global_clipboard].
///
/// Inputs that already hold the global clipboard see the change too.
pub fn set_global_clipboard(clipboard: impl Clipboard + Send + 'static) {
    let shared = GLOBAL_CLIPBOARD.get_or_init(SharedClipboard::default);
    match shared.inner.lock() {
        Ok(mut v) => *v = Box::new(clipboard),
        Err(_) => log::debug!("global clipboard poisoned"),
    }
}

#[derive(Debug, Clone)]
struct SharedClipboard {
    inner: Arc<Mutex<Box<dyn Clipboard + Send>>>,
}

impl Default for SharedClipboard {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(LocalClipboard::new()))),
        }
    }
}

impl Clipboard for SharedClipboard {
    fn get_string(&self) -> Result<String, ClipboardError> {
        match self.inner.lock() {
            Ok(v) => v.get_string(),
            Err(_) => Err(ClipboardError::Unavailable),
        }
    }

    fn set_string(&self, s: &str) -> Result<(), ClipboardError> {
        match self.inner.lock() {
            Ok(v) => v.set_string(s),
            Err(_) => Err(ClipboardError::Unavailable),
        }
    }
}

/// Clipboard local to the application.
///
/// Clones share the same text.
#[derive(Debug, Default, Clone)]
pub struct LocalClipboard {
    text: Arc<Mutex<String>>,
}

impl LocalClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for LocalClipboard {
    fn get_string(&self) -> Result<String, ClipboardError> {
        match self.text.lock() {
            Ok(v) => Ok(v.clone()),
            Err(_) => Err(ClipboardError::Unavailable),
        }
    }

    fn set_string(&self, s: &str) -> Result<(), ClipboardError> {
        match self.text.lock() {
            Ok(mut v) => {
                v.clear();
                v.push_str(s);
                Ok(())
            }
            Err(_) => Err(ClipboardError::Unavailable),
        }
    }
}

#[cfg(test)]
mod test_clipboard {
    use super::*;

    #[test]
    fn test_local() {
        let c = LocalClipboard::new();
        let d = c.clone();
        c.set_string("555").expect("clip");
        assert_eq!(d.get_string(), Ok("555".to_string()));
    }

    #[test]
    fn test_error() {
        let e: TextError = ClipboardError::Refused.into();
        assert_eq!(e, TextError::Clipboard);
    }
}
