//! txtar parsing and no-overwrite extraction.
//!
//! # Architecture
//!
//! - `entry.rs` - Archive and entry types
//! - `txtar.rs` - Text archive parsing and formatting
//! - `sanitize.rs` - Entry name resolution (destination escape prevention)
//! - `extract.rs` - Pre-flight collision check and sequential writes
//! - `options.rs` - Extraction options

pub use entry::{Archive, Entry};
pub use error::{ArchiveError, OccupiedBy, ParseError, Result};
pub use extract::{ExtractReport, ExtractedEntry, extract, extract_archive, extract_with_options};
pub use options::{DuplicatePolicy, ExtractOptions};
pub use txtar::{format, parse, parse_file};

pub mod entry;
mod error;
pub mod extract;
pub mod options;
mod sanitize;
pub mod txtar;
