use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::{destination_for, file_age, is_fresh};
use crate::data::{FetchOptions, Fetched, Freshness, ResourceDescriptor};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Downloads remote files into a local cache directory.
pub struct Fetcher<C: HttpClient> {
    client: C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a fetcher with default cache options.
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FetchOptions { &self.options }

    pub fn client(&self) -> &C { &self.client }

    /// Download `url` next to `local_path` unless it is already there.
    ///
    /// The destination is the URL's file name inside `local_path`'s
    /// directory. If anything already exists at the destination no request is
    /// made. Otherwise the body is streamed into a staging file in the same
    /// directory and renamed into place once complete.
    pub fn fetch(&self, url: &str, local_path: &Path) -> Result<Fetched> {
        let destination = destination_for(url, local_path)?;

        if destination.exists() {
            tracing::debug!(
                url,
                path = %destination.display(),
                "file already exists, not refetching"
            );
            return Ok(Fetched::AlreadyPresent(destination));
        }

        let staging = self.download(url, &destination)?;
        let bytes = staging.bytes;
        match staging.file.persist_noclobber(&destination) {
            Ok(_) => {}
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(
                    url,
                    path = %destination.display(),
                    "destination appeared during download, keeping existing file"
                );
                return Ok(Fetched::AlreadyPresent(destination));
            }
            Err(e) => return Err(FetchError::fs(&destination, e.error)),
        }

        tracing::debug!(url, path = %destination.display(), bytes, "file saved");
        Ok(Fetched::Downloaded {
            path: destination,
            bytes,
        })
    }

    /// Download `url` next to `local_path`, replacing any existing copy.
    pub fn refetch(&self, url: &str, local_path: &Path) -> Result<Fetched> {
        let destination = destination_for(url, local_path)?;

        let staging = self.download(url, &destination)?;
        let bytes = staging.bytes;
        staging
            .file
            .persist(&destination)
            .map_err(|e| FetchError::fs(&destination, e.error))?;

        tracing::debug!(url, path = %destination.display(), bytes, "file replaced");
        Ok(Fetched::Downloaded {
            path: destination,
            bytes,
        })
    }

    /// Make sure the descriptor's raw file exists and is younger than
    /// [`FetchOptions::max_age`], fetching it otherwise.
    ///
    /// The age is read from the file a fetch of the descriptor's URL writes,
    /// so a descriptor whose raw name differs from the URL's file name still
    /// hits the cache.
    ///
    /// Never returns an error: a failed refresh is reported as
    /// [`Freshness::Failed`] and logged at `warn`.
    pub fn ensure_fresh(&self, descriptor: &ResourceDescriptor) -> Freshness {
        let url = descriptor.remote_url();
        let destination = match destination_for(url, descriptor.unrendered_path()) {
            Ok(destination) => destination,
            Err(e) => {
                tracing::warn!(url, error = %e, "fetch template failed");
                return Freshness::Failed(e);
            }
        };
        let path = destination.as_path();
        let max_age = self.options.max_age;
        let age = file_age(path);

        if let Some(age) = age
            && is_fresh(age, max_age)
        {
            tracing::debug!(
                url,
                path = %path.display(),
                age_secs = age.as_secs(),
                max_age_secs = max_age.as_secs(),
                "skipped fetching file"
            );
            return Freshness::Fresh { age };
        }

        tracing::debug!(
            url,
            path = %path.display(),
            age_secs = age.map(|a| a.as_secs()),
            "fetching"
        );

        let result = self.ensure_dir(descriptor.unrendered_dir()).and_then(|()| {
            if age.is_some() && self.options.replace_stale {
                self.refetch(url, path)
            } else {
                self.fetch(url, path)
            }
        });

        match result {
            Ok(fetched) => Freshness::Fetched(fetched),
            Err(e) => {
                tracing::warn!(
                    url,
                    path = %path.display(),
                    error = %e,
                    "fetch template failed"
                );
                Freshness::Failed(e)
            }
        }
    }

    fn ensure_dir(&self, directory: &Path) -> Result<()> {
        fs::create_dir_all(directory).map_err(|e| FetchError::fs(directory, e))
    }

    /// GET `url` into a staging file beside `destination`.
    fn download(&self, url: &str, destination: &Path) -> Result<Staged> {
        let directory = destination.parent().unwrap_or_else(|| Path::new("."));
        self.ensure_dir(directory)?;

        let response = self.client.get(url).map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        let mut file = tempfile::Builder::new()
            .prefix(".coalfoot-")
            .suffix(".tmp")
            .tempfile_in(directory)
            .map_err(|e| FetchError::fs(directory, e))?;

        let mut body = response.body;
        let bytes = copy_body(url, &mut body, &mut file)?;
        file.as_file()
            .sync_all()
            .map_err(|e| FetchError::fs(file.path(), e))?;

        Ok(Staged { file, bytes })
    }
}

struct Staged {
    file: NamedTempFile,
    bytes: u64,
}

/// Stream `body` into `file`, telling read failures (network) apart from
/// write failures (disk).
fn copy_body(url: &str, body: &mut dyn Read, file: &mut NamedTempFile) -> Result<u64> {
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(FetchError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        };
        file.write_all(&buffer[..n])
            .map_err(|e| FetchError::fs(file.path(), e))?;
        total += n as u64;
    }

    Ok(total)
}
