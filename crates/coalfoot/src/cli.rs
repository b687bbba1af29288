use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "coalfoot",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fetch, cache and unpack txtar project templates",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (default: ./coalfoot.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Template cache directory (default: <tmp>/coalfoot)")]
    pub base_dir: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(alias = "f", about = "Download the template unless the cached copy is fresh")]
    Fetch {
        #[arg(long, help = "Maximum cache age in seconds (0 always refetches)")]
        max_age: Option<u64>,
        #[arg(long, help = "Replace a stale cached copy instead of keeping it")]
        replace_stale: bool,
    },
    #[command(alias = "x", about = "Unpack the rendered template into DEST")]
    Extract {
        dest: PathBuf,
        #[arg(long, help = "Archive to unpack instead of the rendered template")]
        archive: Option<PathBuf>,
        #[arg(long, help = "Fail if two entries resolve to the same path")]
        reject_duplicates: bool,
    },
    #[command(alias = "ls", about = "List the entries of an archive")]
    List {
        #[arg(long, help = "Archive to list instead of the rendered template")]
        archive: Option<PathBuf>,
    },
    #[command(about = "Show the template URL and cache paths")]
    Paths,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_extract_with_global_flags() {
        let cli = Cli::parse_from([
            "coalfoot",
            "extract",
            "out",
            "--archive",
            "t.txtar",
            "--base-dir",
            "/c",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_dir, Some(PathBuf::from("/c")));
        match cli.command {
            Commands::Extract {
                dest,
                archive,
                reject_duplicates,
            } => {
                assert_eq!(dest, PathBuf::from("out"));
                assert_eq!(archive, Some(PathBuf::from("t.txtar")));
                assert!(!reject_duplicates);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_fetch_max_age() {
        let cli = Cli::parse_from(["coalfoot", "fetch", "--max-age", "0"]);
        assert!(matches!(
            cli.command,
            Commands::Fetch {
                max_age: Some(0),
                replace_stale: false
            }
        ));
    }
}
