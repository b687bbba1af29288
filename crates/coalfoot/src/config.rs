//! Layered configuration: defaults, then `coalfoot.toml`, then `COALFOOT_*`
//! environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use coalfoot_fetch::{FetchOptions, ResourceDescriptor, default_base_dir};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "coalfoot.toml";
const ENV_PREFIX: &str = "COALFOOT_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the raw and rendered template.
    pub base_dir: PathBuf,
    /// Where to fetch the template from; the built-in template when unset.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Age in seconds below which the cached template is used as is. 0 disables caching.
    pub max_age_secs: u64,
    /// Request deadline in seconds. 0 disables the deadline.
    pub timeout_secs: u64,
    /// Re-download and replace a stale cached template.
    pub replace_stale: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            remote_url: None,
            max_age_secs: 24 * 60 * 60,
            timeout_secs: 30,
            replace_stale: false,
        }
    }
}

impl Config {
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(config_file).extract()
    }

    pub fn descriptor(&self) -> coalfoot_fetch::Result<ResourceDescriptor> {
        match &self.remote_url {
            Some(url) => ResourceDescriptor::template_from(&self.base_dir, url.as_str()),
            None => Ok(ResourceDescriptor::template(&self.base_dir)),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
            .max_age(Duration::from_secs(self.max_age_secs))
            .timeout(self.timeout())
            .replace_stale(self.replace_stale)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None)?;
            assert_eq!(config, Config::default());
            assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
            Ok(())
        });
    }

    #[test]
    fn file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                    base_dir = "/srv/templates"
                    max_age_secs = 60
                    replace_stale = true
                "#,
            )?;
            jail.set_env("COALFOOT_MAX_AGE_SECS", "0");
            jail.set_env("COALFOOT_TIMEOUT_SECS", "0");

            let config = Config::load(None)?;
            assert_eq!(config.base_dir, PathBuf::from("/srv/templates"));
            assert_eq!(config.max_age_secs, 0);
            assert!(config.replace_stale);
            assert_eq!(config.timeout(), None);

            let options = config.fetch_options();
            assert!(options.caching_disabled());
            assert!(options.replace_stale);
            Ok(())
        });
    }

    #[test]
    fn explicit_config_file_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"remote_url = "http://localhost:9000/1.txtar""#)?;

            let config = Config::load(Some(Path::new("custom.toml")))?;
            let desc = config.descriptor().unwrap();
            assert_eq!(desc.remote_url(), "http://localhost:9000/1.txtar");
            assert!(desc.unrendered_path().starts_with(&config.base_dir));
            Ok(())
        });
    }

    #[test]
    fn remote_url_names_the_cached_files() {
        Jail::expect_with(|jail| {
            jail.set_env("COALFOOT_BASE_DIR", "/srv/templates");
            jail.set_env("COALFOOT_REMOTE_URL", "https://example.com/templates/2.txtar");

            let desc = Config::load(None)?.descriptor().unwrap();
            assert_eq!(desc.unrendered_path(), Path::new("/srv/templates/2.txtar"));
            assert_eq!(desc.rendered_path(), Path::new("/srv/templates/2-rendered.txt"));
            Ok(())
        });
    }

    #[test]
    fn remote_url_without_file_name_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("COALFOOT_REMOTE_URL", "https://example.com/templates/");

            assert!(Config::load(None)?.descriptor().is_err());
            Ok(())
        });
    }
}
