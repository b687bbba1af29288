//! Extraction of a txtar archive into a destination directory.
//!
//! Extraction never overwrites what is already on disk. Every entry is
//! resolved and checked against the filesystem before the first byte is
//! written; if any entry would land on an existing file or directory the
//! whole extraction is refused.
//!
//! Once writing starts, entries are written one at a time in archive order.
//! A failure stops the loop and earlier entries stay on disk; the error
//! reports how many were written. Files created by another process between
//! the check and the write are not detected.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::entry::{Archive, Entry};
use crate::error::{ArchiveError, OccupiedBy, Result};
use crate::options::{DuplicatePolicy, ExtractOptions};
use crate::sanitize::resolve_entry_path;
use crate::txtar::parse_file;

/// One entry as written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Extraction results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub entries: Vec<ExtractedEntry>,
    pub total_bytes: u64,
}

impl ExtractReport {
    pub fn entry_count(&self) -> usize { self.entries.len() }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }
}

/// An entry paired with the path it will be written to.
struct Planned<'a> {
    entry: &'a Entry,
    path: PathBuf,
}

/// Parse the archive at `archive_path` and extract it into `destination`.
pub fn extract(
    archive_path: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<ExtractReport> {
    extract_with_options(archive_path, destination, &ExtractOptions::default())
}

pub fn extract_with_options(
    archive_path: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let archive_path = archive_path.as_ref();
    let archive = parse_file(archive_path).inspect_err(|e| {
        tracing::error!(txtar_path = %archive_path.display(), error = %e, "parsing txtar");
    })?;
    extract_archive(&archive, destination, options)
}

/// Extract an already parsed archive into `destination`.
pub fn extract_archive(
    archive: &Archive,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let destination = destination.as_ref();

    let planned = archive
        .entries
        .iter()
        .map(|entry| {
            resolve_entry_path(&entry.name, destination).map(|path| Planned { entry, path })
        })
        .collect::<Result<Vec<_>>>()?;

    preflight(&planned, destination, options).inspect_err(|e| {
        tracing::error!(destination = %destination.display(), error = %e, "extraction refused");
    })?;

    write_entries(&planned)
}

/// Abort early if any target is taken, so nothing is overwritten.
fn preflight(planned: &[Planned<'_>], destination: &Path, options: &ExtractOptions) -> Result<()> {
    if let Some(OccupiedBy::File) = occupant(destination)? {
        return Err(ArchiveError::Collision {
            path: destination.to_path_buf(),
            kind: OccupiedBy::File,
        });
    }

    for item in planned {
        check_target(&item.path, destination)?;
    }

    if options.duplicates == DuplicatePolicy::Reject {
        check_conflicts(planned, destination)?;
    }

    Ok(())
}

/// Walk from the destination down to `target`: every existing ancestor must
/// be a directory and the target itself must not exist.
fn check_target(target: &Path, destination: &Path) -> Result<()> {
    let mut ancestors: Vec<&Path> = target
        .ancestors()
        .skip(1)
        .take_while(|ancestor| *ancestor != destination)
        .collect();
    ancestors.reverse();

    for ancestor in ancestors {
        match occupant(ancestor)? {
            None => return Ok(()),
            Some(OccupiedBy::Directory) => {}
            Some(OccupiedBy::File) => {
                return Err(ArchiveError::Collision {
                    path: ancestor.to_path_buf(),
                    kind: OccupiedBy::File,
                });
            }
        }
    }

    match occupant(target)? {
        None => Ok(()),
        Some(kind) => Err(ArchiveError::Collision {
            path: target.to_path_buf(),
            kind,
        }),
    }
}

/// Reject entries that share a path or sit beneath another entry's file.
fn check_conflicts(planned: &[Planned<'_>], destination: &Path) -> Result<()> {
    let mut seen: HashSet<&Path> = HashSet::with_capacity(planned.len());
    for item in planned {
        if !seen.insert(&item.path) {
            return Err(ArchiveError::EntryConflict {
                path: item.path.clone(),
            });
        }
    }

    for item in planned {
        let nested_under_file = item
            .path
            .ancestors()
            .skip(1)
            .take_while(|ancestor| *ancestor != destination)
            .find(|ancestor| seen.contains(ancestor));
        if let Some(ancestor) = nested_under_file {
            return Err(ArchiveError::EntryConflict {
                path: ancestor.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// What occupies `path`, if anything. A symlink counts as what it points
/// to, and a dangling symlink as a file.
fn occupant(path: &Path) -> Result<Option<OccupiedBy>> {
    match fs::symlink_metadata(path) {
        Ok(_) => {
            let is_dir = fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false);
            Ok(Some(if is_dir {
                OccupiedBy::Directory
            } else {
                OccupiedBy::File
            }))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ArchiveError::Filesystem {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn write_entries(planned: &[Planned<'_>]) -> Result<ExtractReport> {
    let mut report = ExtractReport::default();

    for (written, item) in planned.iter().enumerate() {
        write_entry(item, written)?;

        tracing::debug!(name = %item.entry.name, path = %item.path.display(), "file written");
        report.total_bytes += item.entry.size();
        report.entries.push(ExtractedEntry {
            name: item.entry.name.clone(),
            path: item.path.clone(),
            size: item.entry.size(),
        });
    }

    Ok(report)
}

fn write_entry(item: &Planned<'_>, written: usize) -> Result<()> {
    let failed = |path: &Path, source: io::Error| {
        tracing::error!(path = %path.display(), error = %source, "error writing entry");
        ArchiveError::Write {
            path: path.to_path_buf(),
            written,
            source,
        }
    };

    if let Some(parent) = item.path.parent() {
        fs::create_dir_all(parent).map_err(|e| failed(parent, e))?;
    }

    // Dropped at the end of this scope on every path, closing the handle.
    let mut file = fs::File::create(&item.path).map_err(|e| failed(item.path.as_path(), e))?;
    file.write_all(&item.entry.data)
        .map_err(|e| failed(item.path.as_path(), e))
}
