use log::debug;

use super::label::PlatformLabel;
use super::signals::{Navigator, OS_ARCHITECTURE_KEY};

/// Trait for platform detection (useful for testing)
pub trait PlatformDetector {
    fn detect(&self) -> PlatformLabel;
}

/// Detector that runs the heuristics against a [`Navigator`]
pub struct SignalDetector<N: Navigator> {
    navigator: N,
}

impl<N: Navigator> SignalDetector<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }
}

impl<N: Navigator> PlatformDetector for SignalDetector<N> {
    fn detect(&self) -> PlatformLabel {
        detect(&self.navigator)
    }
}

/// A detector that always answers the same label
pub struct FixedDetector(pub PlatformLabel);

impl PlatformDetector for FixedDetector {
    fn detect(&self) -> PlatformLabel {
        self.0
    }
}

/// Guess the visitor's platform.
///
/// Branches run in order and later ones overwrite earlier results, so an iOS
/// user agent or a FreeBSD platform string wins over everything else. Probe
/// failures are treated as "no match".
#[tracing::instrument(skip(navigator))]
pub fn detect<N: Navigator + ?Sized>(navigator: &N) -> PlatformLabel {
    let user_agent = navigator.user_agent();
    let platform = navigator.platform();
    let app_version = navigator.app_version();

    let mut label = PlatformLabel::Windows;

    if app_version.contains("Win") {
        label = detect_windows(navigator, &user_agent, &platform);
    }

    if app_version.contains("Mac") {
        label = detect_mac(navigator, &user_agent, &platform);
    }

    if platform.contains("Linux") {
        label = detect_linux(&user_agent);
    }

    if ["iPad", "iPhone", "iPod"]
        .iter()
        .any(|device| user_agent.contains(device))
    {
        label = PlatformLabel::Ios;
    }

    if platform.to_lowercase().contains("freebsd") {
        label = PlatformLabel::FreeBsd;
    }

    debug!("Detected platform {} (platform={:?})", label, platform);
    label
}

fn detect_windows<N: Navigator + ?Sized>(
    navigator: &N,
    user_agent: &str,
    platform: &str,
) -> PlatformLabel {
    let legacy_nt = user_agent.contains("Windows NT 5.0") || user_agent.contains("Windows NT 5.1");
    let has_64_marker = ["Win64", "x86_64", "amd64", "AMD64", "WOW64"]
        .iter()
        .any(|marker| user_agent.contains(marker))
        || platform == "Win64";

    if !legacy_nt && has_64_marker {
        return PlatformLabel::Windows64;
    }

    let host_arch = probe("host environment", || {
        navigator.host_environment_value(OS_ARCHITECTURE_KEY)
    });
    if host_arch.is_some_and(|arch| arch.contains("ARM64")) {
        return PlatformLabel::WindowsArm;
    }

    if webgl_renderer(navigator).is_some_and(|renderer| renderer.contains("Qualcomm")) {
        return PlatformLabel::WindowsArm;
    }

    PlatformLabel::Windows
}

fn detect_mac<N: Navigator + ?Sized>(
    navigator: &N,
    user_agent: &str,
    platform: &str,
) -> PlatformLabel {
    if platform.contains("MacPPC") || platform.contains("PowerPC") {
        return PlatformLabel::MacOsPpc;
    }

    if user_agent.contains("OS X 10.5") || user_agent.contains("OS X 10.6") {
        return PlatformLabel::MacOs32;
    }

    if is_apple_silicon(navigator) {
        PlatformLabel::MacOsAppleSilicon
    } else {
        PlatformLabel::MacOs
    }
}

fn detect_linux(user_agent: &str) -> PlatformLabel {
    if user_agent.to_lowercase().contains("ubuntu") {
        return PlatformLabel::LinuxUbuntu;
    }

    // First match wins; Android sits between the distros
    const DISTROS: [(&str, PlatformLabel); 7] = [
        ("Debian", PlatformLabel::LinuxDebian),
        ("Android", PlatformLabel::LinuxAndroid),
        ("Mandriva", PlatformLabel::LinuxMandriva),
        ("Red Hat", PlatformLabel::LinuxRedHat),
        ("Fedora", PlatformLabel::LinuxFedora),
        ("SUSE", PlatformLabel::LinuxSuse),
        ("Gentoo", PlatformLabel::LinuxGentoo),
    ];

    DISTROS
        .iter()
        .find(|(marker, _)| user_agent.contains(marker))
        .map(|(_, label)| *label)
        .unwrap_or(PlatformLabel::Linux)
}

fn is_apple_silicon<N: Navigator + ?Sized>(navigator: &N) -> bool {
    webgl_renderer(navigator)
        .is_some_and(|renderer| renderer.contains("Apple M") || renderer.contains("Apple GPU"))
}

fn webgl_renderer<N: Navigator + ?Sized>(navigator: &N) -> Option<String> {
    probe("WebGL renderer", || navigator.webgl_renderer())
}

/// Run a capability probe, folding errors into "inconclusive"
fn probe<F>(name: &str, f: F) -> Option<String>
where
    F: FnOnce() -> anyhow::Result<Option<String>>,
{
    match f() {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            debug!("{} probe unavailable", name);
            None
        }
        Err(e) => {
            debug!("{} probe failed: {:#}", name, e);
            None
        }
    }
}
