//! I/O operations for template fetching.
//!
//! Everything that touches the network or the filesystem lives here; the
//! network itself sits behind [`HttpClient`] so callers and tests can swap
//! the transport.

mod fetcher;
mod http;

pub use fetcher::Fetcher;
pub use http::{HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
