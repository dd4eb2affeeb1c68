//! Clipboard access for the copy buttons next to install commands.

use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Destination for text copied by a `[data-copy]` button
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// In-memory clipboard. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    texts: Rc<RefCell<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.texts.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        self.texts.borrow_mut().push(text.to_string());
        Ok(())
    }
}
