use std::time::Duration;

/// Cache policy for [`Fetcher`](crate::Fetcher).
///
/// # Examples
///
/// ```
/// use coalfoot_fetch::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .max_age(Duration::from_secs(3600))
///     .timeout(Some(Duration::from_secs(10)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// How old the cached copy may be before it counts as stale.
    ///
    /// - A copy whose age is strictly below this value is fresh
    /// - `Duration::ZERO` disables caching: every call is a miss
    ///
    /// Default: 24 hours
    pub max_age: Duration,

    /// Deadline for a single request, applied by [`ReqwestClient`](crate::ReqwestClient).
    ///
    /// Default: 30 seconds
    pub timeout: Option<Duration>,

    /// Re-download a stale copy and rename it over the old one.
    ///
    /// When false, a stale copy still goes through [`Fetcher::fetch`](crate::Fetcher::fetch),
    /// whose path-existence check then skips the request.
    ///
    /// Default: false
    pub replace_stale: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(24 * 60 * 60),
            timeout: Some(Duration::from_secs(30)),
            replace_stale: false,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn replace_stale(mut self, replace_stale: bool) -> Self {
        self.replace_stale = replace_stale;
        self
    }

    /// Whether caching is switched off entirely.
    pub fn caching_disabled(&self) -> bool { self.max_age.is_zero() }
}
