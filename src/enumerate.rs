//! Directory enumeration over the host listing primitive.
//!
//! `std::fs::read_dir` supplies the open/next/close semantics. The open
//! listing is a scoped resource: its handle closes when the value drops,
//! whichever way iteration ends.

use crate::entry::{system_time_to_ticks, FailureReason, FailureRecord, RawEntry};
use crate::error::FscoutError;
use log::warn;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// Collection capacity hints. The large-fetch option buys bigger upfront
/// buffers in exchange for fewer reallocation rounds.
const DEFAULT_BATCH_HINT: usize = 64;
const LARGE_FETCH_BATCH_HINT: usize = 1024;

/// Why [`open_dir`] could not produce a listing.
#[derive(Debug)]
pub enum OpenError {
    /// Anticipated (directory missing or unreadable): reported as a
    /// failure record, never fatal.
    Recoverable(FailureRecord),
    /// Anything else the host signalled; terminates the traversal unless
    /// errors are suppressed upstream.
    Fatal(FscoutError),
}

/// Open `fs_path` for listing. `display_path` is the user-facing path a
/// failure record carries; `fs_path` may differ by an extended-length
/// prefix.
pub fn open_dir(
    display_path: &Path,
    fs_path: &Path,
    large_fetch: bool,
) -> Result<DirListing, OpenError> {
    match fs::read_dir(fs_path) {
        Ok(inner) => Ok(DirListing {
            path: display_path.to_path_buf(),
            inner: Some(inner),
            large_fetch,
        }),
        Err(err) => {
            let reason = FailureReason::from_io(&err);
            if reason.is_anticipated() {
                Err(OpenError::Recoverable(FailureRecord {
                    path: display_path.to_path_buf(),
                    reason,
                }))
            } else {
                Err(OpenError::Fatal(FscoutError::Enumerate {
                    path: display_path.to_path_buf(),
                    source: err,
                }))
            }
        }
    }
}

/// An open directory listing yielding raw entries.
///
/// The first mid-listing error ends the listing early with whatever was
/// already read; there is no retry.
#[derive(Debug)]
pub struct DirListing {
    path: PathBuf,
    inner: Option<fs::ReadDir>,
    large_fetch: bool,
}

impl DirListing {
    /// How many entries a consumer should make room for upfront.
    pub fn capacity_hint(&self) -> usize {
        if self.large_fetch {
            LARGE_FETCH_BATCH_HINT
        } else {
            DEFAULT_BATCH_HINT
        }
    }
}

impl Iterator for DirListing {
    type Item = RawEntry;

    fn next(&mut self) -> Option<RawEntry> {
        loop {
            let entry = match self.inner.as_mut()?.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Listing of {} ended early: {err}", self.path.display());
                    self.inner = None;
                    return None;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            // Hosts whose primitive surfaces the self/parent entries never
            // get them past this point.
            if name == "." || name == ".." {
                continue;
            }

            // An entry that vanishes between listing and stat is skipped,
            // not fatal.
            let metadata = match entry.metadata() {
                Ok(md) => md,
                Err(err) => {
                    warn!("Skipping {}: {err}", entry.path().display());
                    continue;
                }
            };

            return Some(raw_entry(name, &metadata));
        }
    }
}

fn raw_entry(name: String, md: &Metadata) -> RawEntry {
    let attributes = attributes_of(&name, md);
    let len = if md.is_dir() { 0 } else { md.len() };
    RawEntry {
        attributes,
        size_high: (len >> 32) as u32,
        size_low: len as u32,
        created: md.created().map(system_time_to_ticks).unwrap_or(0),
        accessed: md.accessed().map(system_time_to_ticks).unwrap_or(0),
        modified: md.modified().map(system_time_to_ticks).unwrap_or(0),
        name,
    }
}

#[cfg(windows)]
fn attributes_of(_name: &str, md: &Metadata) -> u32 {
    use std::os::windows::fs::MetadataExt;
    md.file_attributes()
}

#[cfg(not(windows))]
fn attributes_of(name: &str, md: &Metadata) -> u32 {
    use crate::entry::{ATTR_DIRECTORY, ATTR_HIDDEN, ATTR_NORMAL};
    let mut attributes = if md.is_dir() {
        ATTR_DIRECTORY
    } else {
        ATTR_NORMAL
    };
    if name.starts_with('.') {
        attributes |= ATTR_HIDDEN;
    }
    attributes
}
