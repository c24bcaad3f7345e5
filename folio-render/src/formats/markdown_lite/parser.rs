//! Line-oriented MarkdownLite parser

use crate::ir::nodes::{Block, Document, Inline};
use folio_core::media::safe_href;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Links and bold in one alternation, so a single left-to-right scan decides which wins.
/// Link targets may contain one level of balanced parentheses.
static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[(?P<label>[^\]]+)\]\((?P<href>(?:[^()]|\([^()]*\))+)\)|\*\*(?P<strong>[^*]+)\*\*",
    )
    .expect("valid inline regex")
});

pub(super) fn parse_document(source: &str) -> Document {
    let mut blocks = Vec::new();
    let mut list: Vec<Vec<Inline>> = Vec::new();

    for line in source.lines().map(str::trim) {
        if let Some(item) = bullet(line) {
            list.push(parse_inlines(item));
            continue;
        }
        close_list(&mut blocks, &mut list);
        if line.is_empty() {
            continue;
        }
        blocks.push(match heading(line) {
            Some((level, content)) => Block::Heading {
                level,
                content: parse_inlines(content),
            },
            None => Block::Paragraph(parse_inlines(line)),
        });
    }
    close_list(&mut blocks, &mut list);

    Document { blocks }
}

fn close_list(blocks: &mut Vec<Block>, list: &mut Vec<Vec<Inline>>) {
    if !list.is_empty() {
        blocks.push(Block::List(std::mem::take(list)));
    }
}

fn bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

/// Longest marker first, `### x` is not a level-1 heading.
fn heading(line: &str) -> Option<(u8, &str)> {
    [(3, "### "), (2, "## "), (1, "# ")]
        .into_iter()
        .find_map(|(level, marker)| line.strip_prefix(marker).map(|rest| (level, rest.trim())))
}

/// Split one line into inline runs. Adjacent text is merged into a single run.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut inlines, &text[last..whole.start()]);
        last = whole.end();

        if let Some(strong) = caps.name("strong") {
            inlines.push(Inline::Strong(strong.as_str().to_string()));
            continue;
        }
        let label = caps.name("label").map_or("", |m| m.as_str());
        let target = caps.name("href").map_or("", |m| m.as_str());
        match safe_href(target) {
            Some(href) => inlines.push(Inline::Link {
                label: label.to_string(),
                href,
            }),
            None => {
                debug!(href = target, "dropping link with unsupported scheme");
                push_text(&mut inlines, label);
            }
        }
    }
    push_text(&mut inlines, &text[last..]);
    inlines
}

fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    match inlines.last_mut() {
        Some(Inline::Text(run)) => run.push_str(text),
        _ => inlines.push(Inline::Text(text.to_string())),
    }
}
