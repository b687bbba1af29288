use std::fmt;
use std::io::Read;

/// Status line and body of a completed GET.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("body", &"{ ... }")
            .finish()
    }
}

/// Blocking HTTP client abstraction.
///
/// One call is one unauthenticated GET. Implementations follow redirects the
/// way their transport does by default and never retry.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Counting mocks in tests
pub trait HttpClient {
    /// Transport failure (DNS, connect, TLS, timeout).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET for `url` and hand back the status and a body reader.
    ///
    /// Non-2xx statuses are returned as responses, not errors; the fetcher
    /// decides what to do with them.
    fn get(&self, url: &str) -> Result<HttpResponse, Self::Error>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    type Error = C::Error;

    fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> { (**self).get(url) }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;

    /// Production HTTP client implementation using blocking reqwest.
    #[derive(Clone, Debug)]
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        /// Create a client without a request deadline.
        pub fn new() -> Result<Self, reqwest::Error> { Self::with_timeout(None) }

        /// Create a client whose requests give up after `timeout`.
        pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
            let response = self.client.get(url).send()?;
            Ok(HttpResponse::new(response.status().as_u16(), response))
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, Cursor::new(Vec::new())).is_success());
        assert!(HttpResponse::new(204, Cursor::new(Vec::new())).is_success());
        assert!(!HttpResponse::new(304, Cursor::new(Vec::new())).is_success());
        assert!(!HttpResponse::new(404, Cursor::new(Vec::new())).is_success());
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn reqwest_client_builds() {
        assert!(ReqwestClient::with_timeout(Some(std::time::Duration::from_secs(1))).is_ok());
    }
}
