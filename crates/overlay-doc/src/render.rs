//! Canonical serialization of a document model
//!
//! Entries are rendered one per line at a single indent level below the
//! root container. Raw fragments reappear verbatim; block children are
//! re-indented one level below their block.

use std::borrow::Cow;
use std::fmt::Write;

use crate::entry::{BlockEntry, Entry};
use crate::model::DocumentModel;

const INDENT: &str = "  ";

pub(crate) fn render_document(model: &DocumentModel) -> String {
    let mut out = String::new();
    if let Some(prolog) = &model.prolog {
        out.push_str(prolog);
        out.push('\n');
    }
    out.push_str(&model.root_open);
    for entry in &model.entries {
        match entry {
            Entry::Raw(fragment) => {
                out.push('\n');
                out.push_str(INDENT);
                out.push_str(&fragment.text);
            }
            Entry::Variable(var) => {
                let _ = write!(
                    out,
                    "\n{INDENT}<var name=\"{}\" value=\"{}\" />",
                    escape_attr(&var.name),
                    escape_attr(&var.value)
                );
            }
            // An import with an empty target is parseable but never
            // serialized back out.
            Entry::Import(import) if import.from.is_empty() => {}
            Entry::Import(import) => {
                let _ = write!(out, "\n{INDENT}<import from=\"{}\" />", escape_attr(&import.from));
            }
            Entry::Block(block) => {
                out.push('\n');
                write_block(block, INDENT, &mut out);
            }
        }
    }
    out.push('\n');
    out.push_str("</");
    out.push_str(&model.root_name);
    out.push('>');
    if model.trailing_newline {
        out.push('\n');
    }
    out
}

/// Canonical markup for a block element alone, without document context.
pub(crate) fn block_markup(block: &BlockEntry) -> String {
    let mut out = String::new();
    write_block(block, "", &mut out);
    out
}

fn write_block(block: &BlockEntry, indent: &str, out: &mut String) {
    out.push_str(indent);
    let _ = write!(out, "<block name=\"{}\"", escape_attr(&block.name));
    if let Some(enabled) = block.is_enabled {
        let _ = write!(out, " enabled=\"{enabled}\"");
    }
    let inner = block.content_without_root.as_deref().unwrap_or("");
    if inner.trim().is_empty() {
        // Explicit open/close pair even when the source was self-closing.
        out.push_str("></block>");
        return;
    }
    out.push('>');
    reindent(inner, indent, out);
    let _ = write!(out, "\n{indent}</block>");
}

/// Re-emit block children one indent level below the block, stripping the
/// indentation they carried in their previous context.
fn reindent(inner: &str, indent: &str, out: &mut String) {
    let lines: Vec<&str> = inner.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return;
    };
    let body = &lines[first..=last];
    let strip = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l))
        .min()
        .unwrap_or(0);
    for line in body {
        out.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(indent);
        out.push_str(INDENT);
        out.push_str(&line[strip.min(leading_whitespace(line))..]);
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Escape only what a double-quoted attribute value requires. Apostrophes
/// and `>` pass through unchanged so untouched values round-trip verbatim.
fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.bytes().any(|b| matches!(b, b'&' | b'<' | b'"')) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
