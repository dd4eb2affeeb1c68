use anyhow::Result;
use log::info;
use std::io::Write;
use std::path::Path;

use crate::config::Markup;
use crate::page::{Document, Dom, DownloadPicker, NodeId, Pick};
use crate::platform::{PlatformDetector, PlatformLabel};

/// Detect the platform and report which download the page would reveal
#[tracing::instrument(skip(detector, picker, markup, out))]
pub fn pick<W: Write>(
    path: &Path,
    detector: &dyn PlatformDetector,
    picker: &dyn DownloadPicker,
    markup: &Markup,
    out: &mut W,
) -> Result<Pick> {
    let mut doc = Document::load(path)?;
    let label = detector.detect();
    info!("Detected {}", label);

    let pick = picker.reveal(&mut doc, label);
    writeln!(out, "{}", describe(&doc, &markup.targets_attr, label, pick))?;
    Ok(pick)
}

fn describe(doc: &Document, targets_attr: &str, label: PlatformLabel, pick: Pick) -> String {
    let targets = |node: NodeId| doc.data(node, targets_attr).unwrap_or_default();
    match pick {
        Pick::Matched(node) => format!("{}: {}", label, targets(node)),
        Pick::MacFallback(node) => format!("{}: {} (fallback)", label, targets(node)),
        Pick::Backup(_) => format!("{}: backup download", label),
        Pick::Nothing => format!("{}: no download", label),
    }
}
