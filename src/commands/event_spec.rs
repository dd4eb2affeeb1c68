//! Page event parsing for the `page` command.

use anyhow::{Result, anyhow};
use std::str::FromStr;

/// A user interaction to replay against a page
/// Format: "arch:KEY", "tab:TRIPLE/ID", "prereleases" or "copy:N"
#[derive(Debug, PartialEq, Clone)]
pub enum EventSpec {
    Arch(String),
    Tab { triple: String, id: String },
    Prereleases,
    /// Click the N-th copy button (0-based, document order)
    Copy(usize),
}

impl std::fmt::Display for EventSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventSpec::Arch(arch) => write!(f, "arch:{}", arch),
            EventSpec::Tab { triple, id } => write!(f, "tab:{}/{}", triple, id),
            EventSpec::Prereleases => write!(f, "prereleases"),
            EventSpec::Copy(index) => write!(f, "copy:{}", index),
        }
    }
}

impl FromStr for EventSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "prereleases" {
            return Ok(EventSpec::Prereleases);
        }

        let (kind, rest) = s.split_once(':').ok_or_else(|| {
            anyhow!(
                "Invalid event '{}'. Expected 'arch:KEY', 'tab:TRIPLE/ID', 'prereleases' or 'copy:N'.",
                s
            )
        })?;

        match kind {
            "arch" if !rest.is_empty() => Ok(EventSpec::Arch(rest.to_string())),
            "arch" => Err(anyhow!("Invalid event '{}': architecture cannot be empty.", s)),
            "tab" => {
                let (triple, id) = rest
                    .rsplit_once('/')
                    .filter(|(triple, id)| !triple.is_empty() && !id.is_empty())
                    .ok_or_else(|| {
                        anyhow!("Invalid event '{}'. Expected 'tab:TRIPLE/ID'.", s)
                    })?;
                Ok(EventSpec::Tab {
                    triple: triple.to_string(),
                    id: id.to_string(),
                })
            }
            "copy" => rest
                .parse()
                .map(EventSpec::Copy)
                .map_err(|_| anyhow!("Invalid event '{}'. Expected 'copy:N'.", s)),
            other => Err(anyhow!("Unknown event kind '{}' in '{}'.", other, s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arch_event() {
        let spec = EventSpec::from_str("arch:aarch64").unwrap();
        assert_eq!(spec, EventSpec::Arch("aarch64".into()));
    }

    #[test]
    fn test_parse_tab_event() {
        let spec = EventSpec::from_str("tab:x86_64-pc-windows-msvc/shell").unwrap();
        assert_eq!(
            spec,
            EventSpec::Tab {
                triple: "x86_64-pc-windows-msvc".into(),
                id: "shell".into()
            }
        );
    }

    #[test]
    fn test_parse_prereleases_event() {
        assert_eq!(
            EventSpec::from_str("prereleases").unwrap(),
            EventSpec::Prereleases
        );
    }

    #[test]
    fn test_parse_copy_event() {
        assert_eq!(EventSpec::from_str("copy:2").unwrap(), EventSpec::Copy(2));
    }

    #[test]
    fn test_parse_invalid_events() {
        for input in [
            "", "arch:", "tab:", "tab:triple", "tab:/shell", "tab:triple/", "click:x", "aarch64",
            "copy:", "copy:-1", "copy:first",
        ] {
            assert!(EventSpec::from_str(input).is_err(), "expected '{}' to fail", input);
        }
    }

    #[test]
    fn test_display_round_trips() {
        for input in ["arch:x86_64", "tab:aarch64-apple-darwin/brew", "prereleases", "copy:0"] {
            let spec = EventSpec::from_str(input).unwrap();
            assert_eq!(spec.to_string(), input);
        }
    }
}
