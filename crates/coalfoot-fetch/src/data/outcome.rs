use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FetchError;

/// What [`Fetcher::fetch`](crate::Fetcher::fetch) did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetched {
    /// The destination already existed; no request was made.
    AlreadyPresent(PathBuf),
    /// The body was downloaded and placed at `path`.
    Downloaded { path: PathBuf, bytes: u64 },
}

impl Fetched {
    pub fn path(&self) -> &Path {
        match self {
            Fetched::AlreadyPresent(path) => path,
            Fetched::Downloaded { path, .. } => path,
        }
    }

    pub fn downloaded(&self) -> bool { matches!(self, Fetched::Downloaded { .. }) }
}

/// What [`Fetcher::ensure_fresh`](crate::Fetcher::ensure_fresh) did.
///
/// A refresh failure is a value rather than an `Err`: a stale cached copy may
/// still be usable, so the caller decides how severe the failure is.
#[derive(Debug)]
pub enum Freshness {
    /// The cached copy is younger than the threshold.
    Fresh { age: Duration },
    /// The cache missed and a fetch ran.
    Fetched(Fetched),
    /// The cache missed and the fetch failed.
    Failed(FetchError),
}

impl Freshness {
    pub fn is_failed(&self) -> bool { matches!(self, Freshness::Failed(_)) }

    /// Converts the outcome into a `Result`, surfacing the fetch error.
    pub fn into_result(self) -> Result<Self, FetchError> {
        match self {
            Freshness::Failed(err) => Err(err),
            other => Ok(other),
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::Fresh { age } => write!(f, "fresh ({}s old)", age.as_secs()),
            Freshness::Fetched(Fetched::AlreadyPresent(path)) => {
                write!(f, "already present at {}", path.display())
            }
            Freshness::Fetched(Fetched::Downloaded { path, bytes }) => {
                write!(f, "downloaded {bytes} bytes to {}", path.display())
            }
            Freshness::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}
