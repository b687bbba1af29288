use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{FetchError, Result};

/// The last path segment of `url`, used as the on-disk file name.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let invalid = |reason: &str| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    let name = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .ok_or_else(|| invalid("URL path has no file name"))?;

    Ok(name.to_string())
}

/// Where a download of `url` lands: its file name inside `local_path`'s directory.
pub fn destination_for(url: &str, local_path: &Path) -> Result<PathBuf> {
    let directory = local_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(directory.join(file_name_from_url(url)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_last_segment() {
        let name = file_name_from_url(
            "https://raw.githubusercontent.com/taylormonacelli/navylie/master/templates/1.txtar",
        )
        .unwrap();
        assert_eq!(name, "1.txtar");
    }

    #[test]
    fn ignores_query_and_fragment() {
        let name = file_name_from_url("http://localhost/t/a.txtar?rev=2#top").unwrap();
        assert_eq!(name, "a.txtar");
    }

    #[test]
    fn rejects_directory_url() {
        let err = file_name_from_url("https://example.com/templates/").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_garbage() {
        let err = file_name_from_url("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn destination_uses_url_name_not_local_name() {
        let dest = destination_for(
            "https://example.com/remote.txtar",
            Path::new("/cache/local.txtar"),
        )
        .unwrap();
        assert_eq!(dest, PathBuf::from("/cache/remote.txtar"));
    }
}
