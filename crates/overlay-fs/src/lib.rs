//! Path resolution and safe I/O for Config Overlay
//!
//! Owns the two filesystem concerns of the engine: resolving import targets
//! against their owning document and writing rendered documents back
//! atomically.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use io::{read_text, write_atomic};
pub use path::{canonical_key, resolve_import};
