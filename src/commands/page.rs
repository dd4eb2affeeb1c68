use anyhow::Result;
use log::{debug, warn};
use std::io::Write;
use std::path::Path;

use crate::config::Markup;
use crate::page::{Document, Dom, MemoryClipboard, Selector, Toggler};

use super::EventSpec;

/// Visible state of one architecture group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub arch: String,
    pub visible: bool,
    pub triples: Vec<TripleSummary>,
}

/// Selected tabs and shown panels of one triple inside a group
#[derive(Debug, Clone, PartialEq)]
pub struct TripleSummary {
    pub triple: String,
    pub selected: Vec<String>,
    pub shown: Vec<String>,
}

/// Replay `events` against the page at `path` and print the resulting state,
/// followed by one `copied: TEXT` line per clipboard write.
///
/// With `json` set only the mutated page is printed, in the same format it
/// was read in.
#[tracing::instrument(skip(markup, out))]
pub fn page<W: Write>(
    path: &Path,
    events: &[EventSpec],
    json: bool,
    markup: Markup,
    out: &mut W,
) -> Result<()> {
    let mut doc = Document::load(path)?;
    let clipboard = MemoryClipboard::new();
    let toggler = Toggler::hydrate(&doc, markup).with_clipboard(Box::new(clipboard.clone()));

    for event in events {
        let outcome = match event {
            EventSpec::Arch(arch) => toggler.choose_arch(&mut doc, arch),
            EventSpec::Tab { triple, id } => toggler.click_tab(&mut doc, triple, id),
            EventSpec::Prereleases => toggler.toggle_prereleases(&mut doc),
            EventSpec::Copy(index) => toggler.click_copy(&mut doc, *index),
        };

        match outcome {
            None => warn!("Event {} has no matching element on the page", event),
            Some(mutations) if mutations.is_empty() => debug!("Event {} changed nothing", event),
            Some(mutations) => debug!("Event {} applied {} mutation(s)", event, mutations.len()),
        }
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &doc.to_element())?;
        writeln!(out)?;
        return Ok(());
    }

    for group in summarize(&doc, toggler.markup()) {
        let state = if group.visible { "visible" } else { "hidden" };
        writeln!(out, "{} {}", group.arch, state)?;
        for triple in group.triples {
            writeln!(
                out,
                "  {}: tab={} content={}",
                triple.triple,
                join_or_dash(&triple.selected),
                join_or_dash(&triple.shown)
            )?;
        }
    }

    for text in clipboard.history() {
        writeln!(out, "copied: {}", text)?;
    }

    Ok(())
}

/// Describe every architecture group of `doc`, in document order
pub fn summarize(doc: &Document, markup: &Markup) -> Vec<GroupSummary> {
    let groups = doc.query_all(
        None,
        &Selector::class(&markup.arch_class).has_data(&markup.arch_attr),
    );

    groups
        .into_iter()
        .map(|group| {
            let mut triples: Vec<String> = Vec::new();
            for tab in doc.query_all(
                Some(group),
                &Selector::class(&markup.tab_class).has_data(&markup.triple_attr),
            ) {
                if let Some(triple) = doc.data(tab, &markup.triple_attr) {
                    if !triples.contains(&triple) {
                        triples.push(triple);
                    }
                }
            }

            let ids = |selector: Selector| -> Vec<String> {
                doc.query_all(Some(group), &selector)
                    .into_iter()
                    .filter_map(|n| doc.data(n, &markup.id_attr))
                    .collect()
            };

            GroupSummary {
                arch: doc.data(group, &markup.arch_attr).unwrap_or_default(),
                visible: !doc.has_class(group, &markup.hidden_class),
                triples: triples
                    .into_iter()
                    .map(|triple| TripleSummary {
                        selected: ids(Selector::class(&markup.tab_class)
                            .data_eq(&markup.triple_attr, triple.as_str())
                            .and_class(&markup.selected_class)),
                        shown: ids(Selector::class(&markup.content_class)
                            .data_eq(&markup.triple_attr, triple.as_str())
                            .without_class(&markup.hidden_class)),
                        triple,
                    })
                    .collect(),
            }
        })
        .collect()
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(",")
    }
}
