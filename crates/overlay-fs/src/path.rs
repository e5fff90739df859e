//! Path handling for settings files and their imports

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Canonical identity of a settings file, used as the document cache key.
///
/// Canonicalization goes through `dunce` so Windows paths come back in
/// their familiar drive-letter form rather than as `\\?\` UNC paths.
pub fn canonical_key(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|source| Error::Canonicalize {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve an import target against the importing file's directory.
///
/// Absolute targets are used as-is. Relative targets are joined to the
/// directory of `owning_file`, never the process working directory.
/// Backslash separators are normalized so documents written on Windows
/// resolve everywhere.
pub fn resolve_import(owning_file: &Path, from: &str) -> PathBuf {
    let normalized = from.replace('\\', "/");
    let target = Path::new(&normalized);
    if target.is_absolute() {
        return target.to_path_buf();
    }
    match owning_file.parent() {
        Some(dir) => dir.join(target),
        None => target.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relative_import_resolves_against_owning_directory() {
        let resolved = resolve_import(Path::new("/etc/app/settings.xml"), "overrides/local.xml");
        assert_eq!(resolved, PathBuf::from("/etc/app/overrides/local.xml"));
    }

    #[test]
    fn absolute_import_is_used_as_is() {
        let resolved = resolve_import(Path::new("/etc/app/settings.xml"), "/opt/shared.xml");
        assert_eq!(resolved, PathBuf::from("/opt/shared.xml"));
    }

    #[test]
    fn backslash_separators_are_normalized() {
        let resolved = resolve_import(Path::new("/etc/app/settings.xml"), "sub\\local.xml");
        assert_eq!(resolved, PathBuf::from("/etc/app/sub/local.xml"));
    }

    #[test]
    fn canonical_key_fails_for_missing_file() {
        let err = canonical_key(Path::new("/no/such/file.xml")).unwrap_err();
        assert!(matches!(err, Error::Canonicalize { .. }));
    }

    #[test]
    fn canonical_key_resolves_dot_segments() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.xml");
        std::fs::write(&file, "<settings/>").unwrap();
        let indirect = dir.path().join(".").join("settings.xml");
        assert_eq!(canonical_key(&indirect).unwrap(), canonical_key(&file).unwrap());
    }
}
