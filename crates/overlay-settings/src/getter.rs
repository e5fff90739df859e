//! Typed query and mutation façade over a resolved settings graph

use std::path::Path;

use crate::error::Result;
use crate::resolver::{ImportResolver, ResolvedGraph, SharedModel};
use crate::value::SettingValue;

/// Public entry point of the engine.
///
/// Reads resolve against the merged view (last match across the traversal
/// order wins). Mutations land in the file that owns the matching entry;
/// unseen names are appended to the root document. [`SettingsGetter::save`]
/// rewrites every touched file.
#[derive(Debug)]
pub struct SettingsGetter {
    graph: Option<ResolvedGraph>,
}

impl SettingsGetter {
    /// Open a root settings file and resolve its import graph.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let graph = ImportResolver::new().resolve(path.as_ref())?;
        Ok(Self { graph: Some(graph) })
    }

    /// A getter with no backing document.
    ///
    /// Valid degraded mode: every read yields the type's zero value,
    /// mutations and [`SettingsGetter::save`] are no-ops.
    pub fn detached() -> Self {
        Self { graph: None }
    }

    /// Wrap an already resolved graph.
    pub fn from_graph(graph: ResolvedGraph) -> Self {
        Self { graph: Some(graph) }
    }

    /// The resolved graph, absent for a detached getter.
    pub fn graph(&self) -> Option<&ResolvedGraph> {
        self.graph.as_ref()
    }

    /// Typed lookup of a variable. Absence is not an error: unknown names
    /// and detached getters yield the zero value for `T`.
    pub fn get<T: SettingValue>(&self, name: &str) -> T {
        match self.raw_value(name) {
            Some(raw) => T::parse_setting(&raw),
            None => T::zero(),
        }
    }

    fn raw_value(&self, name: &str) -> Option<String> {
        let graph = self.graph.as_ref()?;
        let mut found = None;
        for model in graph.models() {
            if let Some(value) = model.borrow().variable_value(name) {
                found = Some(value.to_string());
            }
        }
        found
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.raw_value(name).is_some()
    }

    pub fn has_block(&self, name: &str) -> bool {
        self.block_model(name).is_some()
    }

    pub fn has_import(&self, from: &str) -> bool {
        let Some(graph) = &self.graph else {
            return false;
        };
        graph.models().iter().any(|m| m.borrow().has_import(from))
    }

    /// Toggle state of the last matching block, `None` when the block is
    /// absent or carries no `enabled` attribute.
    pub fn block_enabled(&self, name: &str) -> Option<bool> {
        let model = self.block_model(name)?;
        let state = model.borrow().block(name).and_then(|b| b.is_enabled);
        state
    }

    /// Inner markup of the last matching block.
    pub fn block_content(&self, name: &str) -> Option<String> {
        let model = self.block_model(name)?;
        let content = model
            .borrow()
            .block(name)
            .and_then(|b| b.content_without_root.clone());
        content
    }

    /// Assign a variable. An existing entry is updated in place in its
    /// owning document; an unseen name is appended to the root document.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let Some(graph) = &self.graph else {
            return;
        };
        let value = value.into();
        match Self::owning_model(graph, |m| m.has_variable(name)) {
            Some(model) => {
                model.borrow_mut().update_variable(name, value);
            }
            None => graph.root().borrow_mut().append_variable(name, value),
        }
    }

    /// Assign a block. An existing entry keeps its position and gets its
    /// toggle state and content replaced; an unseen name is appended to the
    /// root document after the last block. `content: None` serializes as an
    /// explicitly empty open/close element.
    pub fn set_block(&mut self, name: &str, is_enabled: Option<bool>, content: Option<&str>) {
        let Some(graph) = &self.graph else {
            return;
        };
        match Self::owning_model(graph, |m| m.has_block(name)) {
            Some(model) => {
                model.borrow_mut().replace_block(name, is_enabled, content);
            }
            None => graph
                .root()
                .borrow_mut()
                .append_block(name, is_enabled, content),
        }
    }

    /// Add an import directive to the root document. Re-adding a path that
    /// already exists anywhere in the graph is a no-op. The new import is
    /// not resolved until the file is opened again.
    pub fn set_import(&mut self, from: &str) {
        let Some(graph) = &self.graph else {
            return;
        };
        if self.has_import(from) {
            return;
        }
        graph.root().borrow_mut().append_import(from);
    }

    /// Write every modified document back to its own file, atomically per
    /// file. A failure propagates immediately; files already written stay
    /// written.
    pub fn save(&mut self) -> Result<()> {
        let Some(graph) = &self.graph else {
            return Ok(());
        };
        for model in graph.models() {
            let mut model = model.borrow_mut();
            if !model.is_modified() {
                continue;
            }
            let text = model.render();
            overlay_fs::write_atomic(model.path(), text.as_bytes())?;
            model.clear_modified();
            tracing::debug!(path = %model.path().display(), "settings document saved");
        }
        Ok(())
    }

    /// Last model in traversal order whose document satisfies the
    /// predicate; this is the model that owns the effective entry.
    fn owning_model(
        graph: &ResolvedGraph,
        matches: impl Fn(&overlay_doc::DocumentModel) -> bool,
    ) -> Option<SharedModel> {
        let mut found = None;
        for model in graph.models() {
            if matches(&model.borrow()) {
                found = Some(model.clone());
            }
        }
        found
    }

    fn block_model(&self, name: &str) -> Option<SharedModel> {
        let graph = self.graph.as_ref()?;
        Self::owning_model(graph, |m| m.has_block(name))
    }
}
