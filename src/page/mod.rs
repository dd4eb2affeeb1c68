//! Download page controllers
//!
//! The installer section of a download page groups instructions by
//! architecture (`.arch[data-arch]`) and, inside each group, by tab
//! (`.install-tab` / `.install-content` keyed by `data-triple` + `data-id`).
//! [`Toggler`] keeps exactly one group and one tab per group visible;
//! [`TargetPicker`] reveals the download button for a detected platform.
//! Copy buttons (`[data-copy]`) write their text to a [`Clipboard`].

mod clipboard;
mod document;
mod dom;
mod picker;
mod state;
mod toggler;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use document::{Document, Element};
pub use dom::{Dom, NodeId, Selector};
pub use picker::{DownloadPicker, Pick, TargetPicker};
pub use state::{GroupInit, Mutation, TabGroup, change_arch};
pub use toggler::{Bindings, Event, Toggler};
