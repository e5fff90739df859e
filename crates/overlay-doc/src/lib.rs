//! Format-preserving settings documents
//!
//! Parses XML settings documents into an ordered entry model (variables,
//! toggleable blocks, import directives, raw fragments) and re-renders them
//! back to text. Recognized entries are serialized in canonical layout;
//! everything the parser does not understand is carried through verbatim.

pub mod entry;
pub mod error;
pub mod model;

mod parse;
mod render;

pub use entry::{BlockEntry, Entry, ImportEntry, RawFragment, VariableEntry};
pub use error::{Error, Result};
pub use model::DocumentModel;
