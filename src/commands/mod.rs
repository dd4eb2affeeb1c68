use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::platform::BrowserSignals;

mod detect;
mod event_spec;
mod page;
mod pick;

pub use detect::detect;
pub use event_spec::EventSpec;
pub use page::{page, summarize};
pub use pick::pick;

/// Browser signals gathered from an optional JSON file plus individual
/// overrides. Overrides win over the file.
#[derive(Debug, Clone, Default)]
pub struct SignalSource {
    pub signals_file: Option<PathBuf>,
    pub user_agent: Option<String>,
    pub platform: Option<String>,
    pub app_version: Option<String>,
    pub webgl_renderer: Option<String>,
    pub host_arch: Option<String>,
}

impl SignalSource {
    pub fn resolve(&self) -> Result<BrowserSignals> {
        let mut signals = match &self.signals_file {
            Some(path) => {
                debug!("Loading signals from {:?}", path);
                BrowserSignals::load(path)?
            }
            None => BrowserSignals::default(),
        };

        if let Some(user_agent) = &self.user_agent {
            signals.user_agent = user_agent.clone();
        }
        if let Some(platform) = &self.platform {
            signals.platform = platform.clone();
        }
        if let Some(app_version) = &self.app_version {
            signals.app_version = app_version.clone();
        }
        if let Some(renderer) = &self.webgl_renderer {
            signals.webgl_renderer = Some(renderer.clone());
        }
        if let Some(arch) = &self.host_arch {
            signals.host_architecture = Some(arch.clone());
        }

        Ok(signals)
    }
}
