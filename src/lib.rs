pub mod aggregate;
pub mod cli;
pub mod config;
pub mod entry;
pub mod enumerate;
pub mod error;
pub mod longpath;
pub mod output;
pub mod pattern;
pub mod walker;

pub use crate::entry::{EntryRecord, FailureReason, FailureRecord, SearchOutcome};
pub use crate::error::{FscoutError, Result};
pub use crate::pattern::WildcardPattern;
pub use crate::walker::{search, search_with_cancel, CancelToken, SearchRequest};
