//! Layered settings access for Config Overlay
//!
//! Resolves a root settings document and its import graph into one merged
//! view, then exposes typed reads and in-place mutation over it. Edits are
//! written back to whichever file owns the touched entry.

pub mod error;
pub mod getter;
pub mod resolver;
pub mod value;

pub use error::{Error, Result};
pub use getter::SettingsGetter;
pub use resolver::{ImportResolver, ResolvedGraph, SharedModel};
pub use value::SettingValue;
