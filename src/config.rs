use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Class, id and attribute names the page markup uses.
///
/// Attribute names are given without the `data-` prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Markup {
    pub hidden_class: String,
    pub selected_class: String,

    pub arch_select_id: String,
    pub arch_class: String,
    pub arch_attr: String,

    pub tab_class: String,
    pub content_class: String,
    pub id_attr: String,
    pub triple_attr: String,

    pub prerelease_toggle_id: String,
    pub prerelease_class: String,

    pub target_class: String,
    pub targets_attr: String,
    pub backup_class: String,

    pub copy_attr: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            hidden_class: "hidden".into(),
            selected_class: "selected".into(),
            arch_select_id: "install-arch-select".into(),
            arch_class: "arch".into(),
            arch_attr: "arch".into(),
            tab_class: "install-tab".into(),
            content_class: "install-content".into(),
            id_attr: "id".into(),
            triple_attr: "triple".into(),
            prerelease_toggle_id: "show-prereleases".into(),
            prerelease_class: "pre-release".into(),
            target_class: "target".into(),
            targets_attr: "targets".into(),
            backup_class: "backup-download".into(),
            copy_attr: "copy".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markup: Markup,
}

impl Config {
    /// Load the config file at `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        debug!("Loading config from {:?}", path);
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }
}
