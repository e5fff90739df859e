//! Entry types of a settings document

use serde::{Deserialize, Serialize};

/// A named scalar configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableEntry {
    /// Case-sensitive key, unique within its scope.
    pub name: String,
    /// Raw string value; type interpretation happens on read.
    pub value: String,
}

/// A named, independently toggleable chunk of opaque child markup.
///
/// The parser captures the inner markup verbatim and never recurses into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub name: String,
    /// Tri-state toggle. `None` means the `enabled` attribute is absent and
    /// is omitted again on serialization.
    pub is_enabled: Option<bool>,
    /// Inner markup only, without the wrapper tags. `None` renders as an
    /// explicitly empty open/close element.
    pub content_without_root: Option<String>,
}

impl BlockEntry {
    /// Full element markup including the wrapper tags, in canonical layout.
    pub fn content(&self) -> String {
        crate::render::block_markup(self)
    }
}

/// A reference to another settings file merged into the logical space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    /// Target path, relative to the owning document's directory unless
    /// absolute. An empty value parses but is dropped on serialization.
    pub from: String,
}

/// Unrecognized or formatting-only text preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFragment {
    pub text: String,
}

/// One top-level entry of a settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry {
    Variable(VariableEntry),
    Block(BlockEntry),
    Import(ImportEntry),
    Raw(RawFragment),
}
