//! Import resolution across a settings file graph
//!
//! Walks import directives depth-first in declaration order, parses each
//! referenced file once, and produces the merged traversal order lookups
//! run over. Models are cached by canonical path, so diamond imports share
//! a single in-memory model and edits through any path stay consistent.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use overlay_doc::DocumentModel;

use crate::error::{Error, Result};

/// A document model shared between every import path that reaches it.
///
/// The engine is single-threaded by contract, so identity sharing uses
/// `Rc<RefCell<_>>` rather than a lock.
pub type SharedModel = Rc<RefCell<DocumentModel>>;

/// The resolved import graph of one root settings file.
///
/// Holds every reachable model in merged traversal order: the root document
/// first, then imported documents pre-order as declared. Name lookups take
/// the last match in this order.
#[derive(Debug)]
pub struct ResolvedGraph {
    order: Vec<SharedModel>,
    models: HashMap<PathBuf, SharedModel>,
}

impl ResolvedGraph {
    /// The root document; unseen names are always written here.
    pub fn root(&self) -> &SharedModel {
        &self.order[0]
    }

    /// All models in merged traversal order.
    pub fn models(&self) -> &[SharedModel] {
        &self.order
    }

    /// Model for a canonical file path, if it is part of this graph.
    pub fn model_for(&self, canonical: &Path) -> Option<&SharedModel> {
        self.models.get(canonical)
    }
}

/// Loads a root document and the transitive closure of its imports.
#[derive(Debug, Default)]
pub struct ImportResolver {
    models: HashMap<PathBuf, SharedModel>,
}

impl ImportResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the graph reachable from `root_path`.
    ///
    /// Fails with [`Error::ImportNotFound`] when a referenced file is
    /// missing and with [`Error::ImportCycle`] when the import chain loops
    /// back on itself. Resolution is all-or-nothing.
    pub fn resolve(mut self, root_path: &Path) -> Result<ResolvedGraph> {
        let root_key = overlay_fs::canonical_key(root_path)?;
        let mut order = Vec::new();
        let mut in_progress = Vec::new();
        self.visit(&root_key, &mut order, &mut in_progress)?;
        Ok(ResolvedGraph {
            order,
            models: self.models,
        })
    }

    fn visit(
        &mut self,
        key: &Path,
        order: &mut Vec<SharedModel>,
        in_progress: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let text = overlay_fs::read_text(key)?;
        let model = DocumentModel::parse(key, &text)?;
        tracing::debug!(path = %key.display(), entries = model.entries().len(), "loaded settings document");

        let shared: SharedModel = Rc::new(RefCell::new(model));
        self.models.insert(key.to_path_buf(), shared.clone());
        order.push(shared.clone());

        let imports: Vec<String> = shared
            .borrow()
            .imports()
            .filter(|i| !i.from.is_empty())
            .map(|i| i.from.clone())
            .collect();

        in_progress.push(key.to_path_buf());
        for from in imports {
            let target = overlay_fs::resolve_import(key, &from);
            if !target.is_file() {
                return Err(Error::ImportNotFound {
                    path: target,
                    imported_from: key.to_path_buf(),
                });
            }
            let child_key = overlay_fs::canonical_key(&target)?;
            if in_progress.contains(&child_key) {
                return Err(Error::ImportCycle { path: child_key });
            }
            if self.models.contains_key(&child_key) {
                tracing::debug!(path = %child_key.display(), "import already resolved, reusing cached model");
                continue;
            }
            self.visit(&child_key, order, in_progress)?;
        }
        in_progress.pop();

        Ok(())
    }
}
