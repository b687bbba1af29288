//! Age-gated fetching of remote templates into a local cache directory.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable descriptors, options and outcomes
//! - [`core`] - Pure transformations (file naming, age arithmetic)
//! - `effects` - Network and filesystem I/O behind the [`HttpClient`] seam
//!
//! # Key Features
//!
//! - **Path-Existence Skip**: [`Fetcher::fetch`] never issues a request when the
//!   destination file is already present
//! - **Freshness Gate**: [`Fetcher::ensure_fresh`] only fetches when the cached
//!   copy is missing or older than [`FetchOptions::max_age`]
//! - **Staged Writes**: downloads land in a temporary file next to the
//!   destination and are renamed into place once complete

pub mod core;
pub mod data;
mod effects;
mod error;

pub use crate::core::{file_age, file_name_from_url};
pub use data::{FetchOptions, Fetched, Freshness, ResourceDescriptor, default_base_dir};
pub use effects::{Fetcher, HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{FetchError, Result};
