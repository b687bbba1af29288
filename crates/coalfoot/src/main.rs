use clap::Parser;

mod cli;
mod commands;
mod config;
mod logging;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);
    commands::run(cli)
}
