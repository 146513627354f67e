//! The traversal engine: per-directory classification and recursive,
//! optionally parallel, fan-out over subdirectories.

use crate::aggregate::ResultAggregator;
use crate::entry::{EntryRecord, SearchOutcome};
use crate::enumerate::{self, OpenError};
use crate::error::{FscoutError, Result};
use crate::longpath;
use crate::pattern::WildcardPattern;
use log::debug;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One traversal's worth of options. `root` is the only field the engine
/// varies as it recurses; everything else rides along unchanged.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub root: PathBuf,
    pub pattern: String,
    /// Match directory names as results. Effective only when `recurse` is
    /// false: a directory queued for recursion is never pattern-tested.
    pub include_dir_matches: bool,
    pub recurse: bool,
    /// Fan out over subdirectories concurrently, at every depth.
    pub parallel: bool,
    /// Drop failure records, and swallow fatal open errors, instead of
    /// reporting them.
    pub suppress_errors: bool,
    /// Trade memory for fewer allocation rounds while listing.
    pub large_fetch: bool,
}

impl SearchRequest {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
            include_dir_matches: false,
            recurse: false,
            parallel: false,
            suppress_errors: false,
            large_fetch: false,
        }
    }
}

/// Cooperative stop flag, checked at each directory-open boundary.
///
/// Cancelled branches return empty partial outcomes; whatever was already
/// merged stays in the result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run one search to completion.
pub fn search(request: &SearchRequest) -> Result<SearchOutcome> {
    search_with_cancel(request, &CancelToken::new())
}

/// Run one search, stopping early once `cancel` trips.
pub fn search_with_cancel(request: &SearchRequest, cancel: &CancelToken) -> Result<SearchOutcome> {
    let pattern = WildcardPattern::new(&request.pattern)?;
    debug!(
        "Searching {} for '{}' (recurse: {}, parallel: {})",
        request.root.display(),
        pattern.as_str(),
        request.recurse,
        request.parallel
    );
    search_dir(&request.root, request, &pattern, cancel)
}

/// Visit one directory: list it, classify children, then recurse over the
/// queued subdirectories. A failed open never aborts siblings; only an
/// unanticipated host error (with errors unsuppressed) unwinds the whole
/// traversal.
fn search_dir(
    dir: &Path,
    request: &SearchRequest,
    pattern: &WildcardPattern,
    cancel: &CancelToken,
) -> Result<SearchOutcome> {
    let mut outcome = SearchOutcome::default();
    if cancel.is_cancelled() {
        return Ok(outcome);
    }

    let listing = match enumerate::open_dir(dir, &longpath::for_enumeration(dir), request.large_fetch)
    {
        Ok(listing) => listing,
        Err(OpenError::Recoverable(record)) => {
            if !request.suppress_errors {
                outcome.failures.push(record);
            }
            return Ok(outcome);
        }
        Err(OpenError::Fatal(err)) => {
            if request.suppress_errors {
                debug!("Suppressed fatal enumeration error: {err}");
                return Ok(outcome);
            }
            return Err(err);
        }
    };

    let mut matches: Vec<EntryRecord> = Vec::with_capacity(listing.capacity_hint());
    let mut subdirectories: Vec<PathBuf> = Vec::new();

    for raw in listing {
        if raw.is_directory() {
            // Hidden or not, a directory is queued the same way.
            if request.recurse {
                subdirectories.push(dir.join(&raw.name));
            } else if request.include_dir_matches && pattern.matches(&raw.name) {
                matches.push(EntryRecord::from_raw(&raw, dir));
            }
        } else if pattern.matches(&raw.name) {
            matches.push(EntryRecord::from_raw(&raw, dir));
        }
    }
    // The listing handle is consumed, and so closed, before any fan-out.
    outcome.matches = matches;

    if request.recurse && !subdirectories.is_empty() {
        if request.parallel {
            let aggregator = ResultAggregator::new();
            subdirectories.par_iter().try_for_each(|subdir| {
                let branch = search_dir(subdir, request, pattern, cancel)?;
                aggregator.add_outcome(branch);
                Ok::<(), FscoutError>(())
            })?;
            outcome.merge(aggregator.into_outcome());
        } else {
            for subdir in &subdirectories {
                let branch = search_dir(subdir, request, pattern, cancel)?;
                outcome.merge(branch);
            }
        }
    }

    Ok(outcome)
}
