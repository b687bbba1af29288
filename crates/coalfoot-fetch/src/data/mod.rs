//! Immutable data types for template fetching.
//!
//! Descriptors name what to fetch and where it lives locally, options carry
//! the cache policy, and outcomes report what a call actually did.

pub mod descriptor;
pub mod options;
pub mod outcome;

pub use descriptor::{ResourceDescriptor, default_base_dir};
pub use options::FetchOptions;
pub use outcome::{Fetched, Freshness};
