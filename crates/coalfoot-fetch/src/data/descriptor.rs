use std::path::{Path, PathBuf};

use crate::core::file_name_from_url;
use crate::error::Result;

const TEMPLATE_BASE_URL: &str =
    "https://raw.githubusercontent.com/taylormonacelli/navylie/master/templates";
const TEMPLATE_FILE_NAME: &str = "1.txtar";
const TEMPLATE_RENDERED_NAME: &str = "1-rendered.txt";

/// Cache directory used when the caller does not configure one.
///
/// Only the outermost composition point should call this; everything below
/// it receives the base directory explicitly.
pub fn default_base_dir() -> PathBuf {
    std::env::temp_dir().join("coalfoot")
}

/// One remote resource and its two local representations.
///
/// The unrendered path holds the raw download; the rendered path holds the
/// output of an external templating step. Both live directly under the base
/// directory the descriptor was built with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    remote_url: String,
    unrendered_path: PathBuf,
    rendered_path: PathBuf,
}

impl ResourceDescriptor {
    pub fn new(
        base_dir: impl AsRef<Path>,
        remote_url: impl Into<String>,
        file_name: &str,
        rendered_name: &str,
    ) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            remote_url: remote_url.into(),
            unrendered_path: base_dir.join(file_name),
            rendered_path: base_dir.join(rendered_name),
        }
    }

    /// The built-in project template, cached under `base_dir`.
    pub fn template(base_dir: impl AsRef<Path>) -> Self {
        Self::new(
            base_dir,
            format!("{TEMPLATE_BASE_URL}/{TEMPLATE_FILE_NAME}"),
            TEMPLATE_FILE_NAME,
            TEMPLATE_RENDERED_NAME,
        )
    }

    /// A template fetched from `remote_url`.
    ///
    /// The raw file is named after the URL's last path segment, which is
    /// where a fetch of that URL lands; the rendered file is `<stem>-rendered.txt`.
    pub fn template_from(
        base_dir: impl AsRef<Path>,
        remote_url: impl Into<String>,
    ) -> Result<Self> {
        let remote_url = remote_url.into();
        let file_name = file_name_from_url(&remote_url)?;
        let rendered_name = rendered_name_for(&file_name);
        Ok(Self::new(base_dir, remote_url, &file_name, &rendered_name))
    }

    pub fn remote_url(&self) -> &str { &self.remote_url }

    pub fn unrendered_path(&self) -> &Path { &self.unrendered_path }

    pub fn rendered_path(&self) -> &Path { &self.rendered_path }

    pub fn unrendered_dir(&self) -> &Path {
        self.unrendered_path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn rendered_dir(&self) -> &Path {
        self.rendered_path.parent().unwrap_or_else(|| Path::new("."))
    }
}

fn rendered_name_for(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_else(|| file_name.into());
    format!("{stem}-rendered.txt")
}
