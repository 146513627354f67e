//! Records produced by directory enumeration and the traversal engine.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Attribute bits in the host's find-data convention.
pub const ATTR_HIDDEN: u32 = 0x0002;
pub const ATTR_DIRECTORY: u32 = 0x0010;
pub const ATTR_NORMAL: u32 = 0x0080;

/// 100ns ticks between 1601-01-01 and 1970-01-01.
const EPOCH_DELTA_TICKS: i64 = 116_444_736_000_000_000;
const TICKS_PER_SECOND: i64 = 10_000_000;

/// One child entry as the host enumeration reports it: attribute bitmask,
/// size split into 32-bit halves, timestamps as 100ns ticks since 1601.
/// Zero ticks mark a timestamp the platform could not supply.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub name: String,
    pub attributes: u32,
    pub size_high: u32,
    pub size_low: u32,
    pub created: u64,
    pub accessed: u64,
    pub modified: u64,
}

impl RawEntry {
    pub fn is_directory(&self) -> bool {
        self.attributes & ATTR_DIRECTORY != 0
    }

    /// The hidden bit may accompany the directory bit; the two are
    /// independent.
    pub fn is_hidden(&self) -> bool {
        self.attributes & ATTR_HIDDEN != 0
    }
}

/// Combine a size reported as two 32-bit halves into the full unsigned
/// value: high half shifted into the upper bits, low half added.
pub fn compose_size(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) + low as u64
}

/// Convert 100ns ticks since 1601-01-01 UTC into a UTC timestamp.
pub fn ticks_to_utc(ticks: u64) -> Option<DateTime<Utc>> {
    if ticks == 0 {
        return None;
    }
    let unix_ticks = i64::try_from(ticks).ok()? - EPOCH_DELTA_TICKS;
    let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
    let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    Utc.timestamp_opt(secs, nanos).single()
}

/// Convert a host timestamp into 100ns ticks since 1601-01-01 UTC.
pub fn system_time_to_ticks(time: SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            (EPOCH_DELTA_TICKS as u64)
                .saturating_add(after.as_secs().saturating_mul(TICKS_PER_SECOND as u64))
                .saturating_add(u64::from(after.subsec_nanos() / 100))
        }
        Err(before) => {
            let before = before.duration();
            let ticks = before.as_secs().saturating_mul(TICKS_PER_SECOND as u64)
                + u64::from(before.subsec_nanos() / 100);
            (EPOCH_DELTA_TICKS as u64).saturating_sub(ticks)
        }
    }
}

/// A matched entry, carrying the metadata the enumeration already paid for.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRecord {
    pub name: String,
    pub path: PathBuf,
    pub parent: PathBuf,
    pub attributes: u32,
    pub is_directory: bool,
    /// `None` for directories.
    pub size: Option<u64>,
    pub created: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl EntryRecord {
    pub fn from_raw(raw: &RawEntry, parent: &Path) -> Self {
        let is_directory = raw.is_directory();
        let size = if is_directory {
            None
        } else {
            Some(compose_size(raw.size_high, raw.size_low))
        };
        Self {
            name: raw.name.clone(),
            path: parent.join(&raw.name),
            parent: parent.to_path_buf(),
            attributes: raw.attributes,
            is_directory,
            size,
            created: ticks_to_utc(raw.created),
            accessed: ticks_to_utc(raw.accessed),
            modified: ticks_to_utc(raw.modified),
        }
    }
}

/// Why a directory could not be opened for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    NotFound,
    AccessDenied,
    /// Any other host-reported condition, with the raw OS code when the
    /// host supplied one.
    Other(Option<i32>),
}

impl FailureReason {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::AccessDenied,
            _ => Self::Other(err.raw_os_error()),
        }
    }

    /// Missing and unreadable directories are the expected failure modes;
    /// everything else is treated as fatal upstream.
    pub fn is_anticipated(&self) -> bool {
        matches!(self, Self::NotFound | Self::AccessDenied)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::AccessDenied => write!(f, "access denied"),
            Self::Other(Some(code)) => write!(f, "os error {code}"),
            Self::Other(None) => write!(f, "enumeration failed"),
        }
    }
}

/// One directory that could not be enumerated. Kept apart from matches;
/// the two are never conflated.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub path: PathBuf,
    pub reason: FailureReason,
}

/// Everything one traversal produced. Order carries no meaning when the
/// traversal ran in parallel.
#[derive(Debug, Default, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<EntryRecord>,
    pub failures: Vec<FailureRecord>,
}

impl SearchOutcome {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total_matched_bytes(&self) -> u64 {
        self.matches.iter().filter_map(|m| m.size).sum()
    }

    /// Fold another outcome in; both collections append.
    pub fn merge(&mut self, other: SearchOutcome) {
        self.matches.extend(other.matches);
        self.failures.extend(other.failures);
    }
}
