use anyhow::Result;
use log::info;
use std::io::Write;

use crate::platform::{self, PlatformLabel};

use super::SignalSource;

/// Detect the platform for the given signals and print its label
#[tracing::instrument(skip(source, out))]
pub fn detect<W: Write>(source: &SignalSource, out: &mut W) -> Result<PlatformLabel> {
    let signals = source.resolve()?;
    let label = platform::detect(&signals);
    info!("Detected {}", label);
    writeln!(out, "{}", label)?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: SignalSource) -> (PlatformLabel, String) {
        let mut out = Vec::new();
        let label = detect(&source, &mut out).unwrap();
        (label, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_detect_prints_label() {
        let (label, out) = run(SignalSource {
            user_agent: Some("Mozilla/5.0 (X11; Ubuntu; Linux x86_64)".into()),
            platform: Some("Linux x86_64".into()),
            ..Default::default()
        });

        assert_eq!(label, PlatformLabel::LinuxUbuntu);
        assert_eq!(out, "linux-ubuntu\n");
    }

    #[test]
    fn test_detect_with_nothing_is_windows() {
        let (label, out) = run(SignalSource::default());
        assert_eq!(label, PlatformLabel::Windows);
        assert_eq!(out, "windows\n");
    }

    #[test]
    fn test_detect_missing_file_is_an_error() {
        let source = SignalSource {
            signals_file: Some("/nonexistent/signals.json".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        assert!(detect(&source, &mut out).is_err());
        assert!(out.is_empty());
    }
}
