use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating system family a [`PlatformLabel`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Windows,
    MacOs,
    Linux,
    Ios,
    FreeBsd,
}

/// Best-guess platform of a visitor.
///
/// Every variant maps to exactly one tag string, which is what download pages
/// and other scripts compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformLabel {
    #[default]
    #[serde(rename = "windows")]
    Windows,
    #[serde(rename = "windows-64")]
    Windows64,
    #[serde(rename = "windows-arm")]
    WindowsArm,
    #[serde(rename = "macos")]
    MacOs,
    #[serde(rename = "macos-PPC")]
    MacOsPpc,
    #[serde(rename = "macos-32")]
    MacOs32,
    #[serde(rename = "macos-apple-silicon")]
    MacOsAppleSilicon,
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "linux-ubuntu")]
    LinuxUbuntu,
    #[serde(rename = "linux-debian")]
    LinuxDebian,
    #[serde(rename = "linux-mandriva")]
    LinuxMandriva,
    #[serde(rename = "linux-redhat")]
    LinuxRedHat,
    #[serde(rename = "linux-fedora")]
    LinuxFedora,
    #[serde(rename = "linux-suse")]
    LinuxSuse,
    #[serde(rename = "linux-gentoo")]
    LinuxGentoo,
    #[serde(rename = "linux-android")]
    LinuxAndroid,
    #[serde(rename = "ios")]
    Ios,
    #[serde(rename = "freebsd")]
    FreeBsd,
}

impl PlatformLabel {
    pub const ALL: [PlatformLabel; 18] = [
        PlatformLabel::Windows,
        PlatformLabel::Windows64,
        PlatformLabel::WindowsArm,
        PlatformLabel::MacOs,
        PlatformLabel::MacOsPpc,
        PlatformLabel::MacOs32,
        PlatformLabel::MacOsAppleSilicon,
        PlatformLabel::Linux,
        PlatformLabel::LinuxUbuntu,
        PlatformLabel::LinuxDebian,
        PlatformLabel::LinuxMandriva,
        PlatformLabel::LinuxRedHat,
        PlatformLabel::LinuxFedora,
        PlatformLabel::LinuxSuse,
        PlatformLabel::LinuxGentoo,
        PlatformLabel::LinuxAndroid,
        PlatformLabel::Ios,
        PlatformLabel::FreeBsd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformLabel::Windows => "windows",
            PlatformLabel::Windows64 => "windows-64",
            PlatformLabel::WindowsArm => "windows-arm",
            PlatformLabel::MacOs => "macos",
            PlatformLabel::MacOsPpc => "macos-PPC",
            PlatformLabel::MacOs32 => "macos-32",
            PlatformLabel::MacOsAppleSilicon => "macos-apple-silicon",
            PlatformLabel::Linux => "linux",
            PlatformLabel::LinuxUbuntu => "linux-ubuntu",
            PlatformLabel::LinuxDebian => "linux-debian",
            PlatformLabel::LinuxMandriva => "linux-mandriva",
            PlatformLabel::LinuxRedHat => "linux-redhat",
            PlatformLabel::LinuxFedora => "linux-fedora",
            PlatformLabel::LinuxSuse => "linux-suse",
            PlatformLabel::LinuxGentoo => "linux-gentoo",
            PlatformLabel::LinuxAndroid => "linux-android",
            PlatformLabel::Ios => "ios",
            PlatformLabel::FreeBsd => "freebsd",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            PlatformLabel::Windows | PlatformLabel::Windows64 | PlatformLabel::WindowsArm => {
                Family::Windows
            }
            PlatformLabel::MacOs
            | PlatformLabel::MacOsPpc
            | PlatformLabel::MacOs32
            | PlatformLabel::MacOsAppleSilicon => Family::MacOs,
            PlatformLabel::Linux
            | PlatformLabel::LinuxUbuntu
            | PlatformLabel::LinuxDebian
            | PlatformLabel::LinuxMandriva
            | PlatformLabel::LinuxRedHat
            | PlatformLabel::LinuxFedora
            | PlatformLabel::LinuxSuse
            | PlatformLabel::LinuxGentoo
            | PlatformLabel::LinuxAndroid => Family::Linux,
            PlatformLabel::Ios => Family::Ios,
            PlatformLabel::FreeBsd => Family::FreeBsd,
        }
    }

    /// Target triple fragments that identify downloads built for this platform.
    ///
    /// A download matches when its target list contains any of the fragments.
    pub fn target_hints(&self) -> &'static [&'static str] {
        match self {
            PlatformLabel::Windows => &["pc-windows"],
            PlatformLabel::Windows64 => &["x86_64-pc-windows"],
            PlatformLabel::WindowsArm => &["aarch64-pc-windows"],
            PlatformLabel::MacOs => &["x86_64-apple-darwin", "universal-apple-darwin"],
            PlatformLabel::MacOsPpc => &["powerpc-apple-darwin"],
            PlatformLabel::MacOs32 => &["i686-apple-darwin"],
            PlatformLabel::MacOsAppleSilicon => &["aarch64-apple-darwin"],
            PlatformLabel::LinuxAndroid => &["linux-android"],
            PlatformLabel::Ios => &["apple-ios"],
            PlatformLabel::FreeBsd => &["unknown-freebsd"],
            // Distro-specific labels still run generic linux builds
            _ => &["unknown-linux"],
        }
    }
}

impl fmt::Display for PlatformLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match PlatformLabel::ALL.iter().find(|label| label.as_str() == s) {
            Some(label) => Ok(*label),
            None => bail!("Unknown platform label: '{}'", s),
        }
    }
}
