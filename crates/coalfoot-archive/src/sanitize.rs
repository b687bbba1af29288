use std::path::{Component, Path, PathBuf};

use crate::error::{ArchiveError, Result};

/// Resolve an entry name to its path under `destination`.
///
/// `.` components are dropped and `..` components are applied lexically.
/// Absolute names, names that climb above the destination, and names that
/// resolve to the destination itself are rejected.
pub(crate) fn resolve_entry_path(name: &str, destination: &Path) -> Result<PathBuf> {
    let unsafe_path = || ArchiveError::UnsafePath {
        name: name.to_string(),
    };

    if name.contains('\0') {
        return Err(unsafe_path());
    }

    let mut relative = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(unsafe_path());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(unsafe_path()),
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(unsafe_path());
    }

    Ok(destination.join(relative))
}
