//! In-memory representation of one settings file

use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::{BlockEntry, Entry, ImportEntry, VariableEntry};
use crate::error::{Error, Result};
use crate::{parse, render};

/// Ordered sequence of entries parsed from a single settings file.
///
/// Lookups resolve to the last matching entry, so later entries shadow
/// earlier ones with the same name. Every mutation marks the model as
/// modified; [`DocumentModel::render`] produces the text to write back.
#[derive(Debug, Clone)]
pub struct DocumentModel {
    pub(crate) path: PathBuf,
    /// Everything before the root start tag, one node per line: the XML
    /// declaration plus any pre-root comments, exactly as they appeared.
    pub(crate) prolog: Option<String>,
    /// Start tag of the root container, attributes included.
    pub(crate) root_open: String,
    pub(crate) root_name: String,
    pub(crate) entries: Vec<Entry>,
    /// Whether the source text ended with a newline after the root close tag.
    pub(crate) trailing_newline: bool,
    pub(crate) modified: bool,
}

impl DocumentModel {
    /// Parse document text into a model.
    ///
    /// `path` identifies the owning file for diagnostics and for resolving
    /// relative imports; it is not read here.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self> {
        parse::parse_document(path.into(), text)
    }

    /// Read and parse a settings file.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Self::parse(path, &text)
    }

    /// Owning file path as given at parse time.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Whether any mutation happened since parse or the last
    /// [`DocumentModel::clear_modified`].
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Render the model back to document text in canonical layout.
    pub fn render(&self) -> String {
        render::render_document(self)
    }

    /// Value of the last variable entry with the given name.
    pub fn variable_value(&self, name: &str) -> Option<&str> {
        self.entries.iter().rev().find_map(|e| match e {
            Entry::Variable(v) if v.name == name => Some(v.value.as_str()),
            _ => None,
        })
    }

    /// Last block entry with the given name.
    pub fn block(&self, name: &str) -> Option<&BlockEntry> {
        self.entries.iter().rev().find_map(|e| match e {
            Entry::Block(b) if b.name == name => Some(b),
            _ => None,
        })
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable_value(name).is_some()
    }

    pub fn has_block(&self, name: &str) -> bool {
        self.block(name).is_some()
    }

    pub fn has_import(&self, from: &str) -> bool {
        self.imports().any(|i| i.from == from)
    }

    /// Import entries in document order, empty ones included.
    pub fn imports(&self) -> impl Iterator<Item = &ImportEntry> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Import(i) => Some(i),
            _ => None,
        })
    }

    /// Update the last variable entry with the given name in place.
    ///
    /// Returns false without touching the model when the name is unknown.
    pub fn update_variable(&mut self, name: &str, value: impl Into<String>) -> bool {
        let found = self
            .entries
            .iter()
            .rposition(|e| matches!(e, Entry::Variable(v) if v.name == name));
        let Some(index) = found else {
            return false;
        };
        if let Entry::Variable(v) = &mut self.entries[index] {
            v.value = value.into();
        }
        self.modified = true;
        true
    }

    /// Insert a new variable entry after the last existing one, or at the
    /// start of the entry sequence if the document has no variables yet.
    pub fn append_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let at = self
            .entries
            .iter()
            .rposition(|e| matches!(e, Entry::Variable(_)))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.entries.insert(
            at,
            Entry::Variable(VariableEntry {
                name: name.into(),
                value: value.into(),
            }),
        );
        self.modified = true;
    }

    /// Replace toggle state and content of the last block entry with the
    /// given name, keeping its position among siblings.
    ///
    /// Returns false without touching the model when the name is unknown.
    pub fn replace_block(
        &mut self,
        name: &str,
        is_enabled: Option<bool>,
        content: Option<&str>,
    ) -> bool {
        let found = self
            .entries
            .iter()
            .rposition(|e| matches!(e, Entry::Block(b) if b.name == name));
        let Some(index) = found else {
            return false;
        };
        if let Entry::Block(b) = &mut self.entries[index] {
            b.is_enabled = is_enabled;
            b.content_without_root = content.map(str::to_string);
        }
        self.modified = true;
        true
    }

    /// Insert a new block entry after the last existing block, or at the end
    /// of the entry sequence if the document has none.
    pub fn append_block(
        &mut self,
        name: impl Into<String>,
        is_enabled: Option<bool>,
        content: Option<&str>,
    ) {
        let at = self
            .entries
            .iter()
            .rposition(|e| matches!(e, Entry::Block(_)))
            .map(|i| i + 1)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            at,
            Entry::Block(BlockEntry {
                name: name.into(),
                is_enabled,
                content_without_root: content.map(str::to_string),
            }),
        );
        self.modified = true;
    }

    /// Insert a new import entry after the last existing import, or at the
    /// end of the entry sequence if the document has none.
    ///
    /// Re-adding an existing path is a no-op; returns whether the entry was
    /// actually added.
    pub fn append_import(&mut self, from: impl Into<String>) -> bool {
        let from = from.into();
        if self.has_import(&from) {
            return false;
        }
        let at = self
            .entries
            .iter()
            .rposition(|e| matches!(e, Entry::Import(_)))
            .map(|i| i + 1)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, Entry::Import(ImportEntry { from }));
        self.modified = true;
        true
    }

}
