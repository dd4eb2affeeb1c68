//! Platform detection module
//!
//! This module guesses the visitor's operating system, distribution and CPU
//! architecture from browser signals (user agent, platform, WebGL renderer)
//! and reports it as a single [`PlatformLabel`].

mod detection;
mod label;
mod signals;

pub use detection::{FixedDetector, PlatformDetector, SignalDetector, detect};
pub use label::{Family, PlatformLabel};
pub use signals::{BrowserSignals, Navigator, OS_ARCHITECTURE_KEY};
