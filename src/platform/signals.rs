//! Browser-provided inputs to platform detection.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Host environment key queried for the Windows ARM hint
pub const OS_ARCHITECTURE_KEY: &str = "os-architecture";

/// Read-only view of what a browser exposes about the visitor's machine.
///
/// String accessors never fail; absent values are empty. Capability probes
/// return `Ok(None)` when the capability is missing and `Err` when it throws.
/// Each probe acquires whatever it needs and releases it before returning.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn user_agent(&self) -> String;
    fn platform(&self) -> String;
    fn app_version(&self) -> String;

    /// Query the host environment (e.g. `os-architecture`)
    fn host_environment_value(&self, key: &str) -> Result<Option<String>>;

    /// Unmasked renderer string of a throwaway WebGL context
    fn webgl_renderer(&self) -> Result<Option<String>>;
}

/// Captured browser signals, as recorded by a page or typed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserSignals {
    pub user_agent: String,
    pub platform: String,
    pub app_version: String,
    pub webgl_renderer: Option<String>,
    /// Value reported for the `os-architecture` host environment key
    pub host_architecture: Option<String>,
}

impl BrowserSignals {
    pub fn new(
        user_agent: impl Into<String>,
        platform: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            platform: platform.into(),
            app_version: app_version.into(),
            ..Default::default()
        }
    }

    pub fn with_webgl_renderer(mut self, renderer: impl Into<String>) -> Self {
        self.webgl_renderer = Some(renderer.into());
        self
    }

    pub fn with_host_architecture(mut self, arch: impl Into<String>) -> Self {
        self.host_architecture = Some(arch.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse browser signals")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read signals file {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Invalid signals file {:?}", path))
    }
}

impl Navigator for BrowserSignals {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn app_version(&self) -> String {
        self.app_version.clone()
    }

    fn host_environment_value(&self, key: &str) -> Result<Option<String>> {
        if key == OS_ARCHITECTURE_KEY {
            Ok(self.host_architecture.clone())
        } else {
            Ok(None)
        }
    }

    fn webgl_renderer(&self) -> Result<Option<String>> {
        Ok(self.webgl_renderer.clone())
    }
}
