use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use coalfoot_archive::{ArchiveError, ExtractOptions, extract_with_options, parse_file};
use coalfoot_fetch::{Fetcher, Freshness, ReqwestClient, ResourceDescriptor};

use crate::cli::{Cli, Commands};
use crate::config::Config;

pub fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base_dir) = cli.base_dir {
        config.base_dir = base_dir;
    }

    match cli.command {
        Commands::Fetch {
            max_age,
            replace_stale,
        } => {
            if let Some(secs) = max_age {
                config.max_age_secs = secs;
            }
            config.replace_stale |= replace_stale;
            fetch(&config)
        }
        Commands::Extract {
            dest,
            archive,
            reject_duplicates,
        } => {
            let archive = archive_or_rendered(archive, &config)?;
            let options = if reject_duplicates {
                ExtractOptions::default().reject_duplicates()
            } else {
                ExtractOptions::default()
            };
            extract(&archive, &dest, &options)
        }
        Commands::List { archive } => list(&archive_or_rendered(archive, &config)?),
        Commands::Paths => {
            paths(&descriptor(&config)?);
            Ok(())
        }
    }
}

fn descriptor(config: &Config) -> Result<ResourceDescriptor> {
    config.descriptor().context("resolving template location")
}

/// The explicit archive, or the rendered template when none is given.
fn archive_or_rendered(archive: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match archive {
        Some(archive) => Ok(archive),
        None => Ok(descriptor(config)?.rendered_path().to_path_buf()),
    }
}

fn fetch(config: &Config) -> Result<()> {
    let descriptor = descriptor(config)?;
    let client = ReqwestClient::with_timeout(config.timeout()).context("building HTTP client")?;
    let fetcher = Fetcher::new(client).with_options(config.fetch_options());

    match fetcher.ensure_fresh(&descriptor) {
        Freshness::Failed(err) if descriptor.unrendered_path().is_file() => {
            tracing::warn!(
                path = %descriptor.unrendered_path().display(),
                "refresh failed, keeping cached template"
            );
            println!(
                "refresh failed ({err}); using cached {}",
                descriptor.unrendered_path().display()
            );
            Ok(())
        }
        Freshness::Failed(err) => Err(err)
            .with_context(|| format!("fetching template from {}", descriptor.remote_url())),
        outcome => {
            println!("{outcome}");
            Ok(())
        }
    }
}

fn extract(archive: &Path, dest: &Path, options: &ExtractOptions) -> Result<()> {
    let report = match extract_with_options(archive, dest, options) {
        Ok(report) => report,
        Err(err @ ArchiveError::Write { written, .. }) if written > 0 => {
            return Err(err).with_context(|| {
                format!(
                    "extraction into {} stopped part way; {written} entries were written and kept",
                    dest.display()
                )
            });
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("extracting {} into {}", archive.display(), dest.display())
            });
        }
    };

    for path in report.paths() {
        println!("{}", path.display());
    }
    tracing::info!(
        entries = report.entry_count(),
        bytes = report.total_bytes,
        dest = %dest.display(),
        "extracted"
    );
    Ok(())
}

fn list(archive: &Path) -> Result<()> {
    let archive = parse_file(archive)?;
    for entry in &archive.entries {
        println!("{:>8}  {}", entry.size(), entry.name);
    }
    Ok(())
}

fn paths(descriptor: &ResourceDescriptor) {
    println!("url        {}", descriptor.remote_url());
    println!("unrendered {}", descriptor.unrendered_path().display());
    println!("rendered   {}", descriptor.rendered_path().display());
    if let Some(age) = coalfoot_fetch::file_age(descriptor.unrendered_path()) {
        println!("age        {}", humanize(age));
    }
}

fn humanize(age: Duration) -> String {
    let secs = age.as_secs();
    match secs {
        0..60 => format!("{secs}s"),
        60..3600 => format!("{}m{}s", secs / 60, secs % 60),
        _ => format!("{}h{}m", secs / 3600, (secs % 3600) / 60),
    }
}
