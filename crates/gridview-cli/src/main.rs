use std::io;
use std::process;

use clap::Parser;
use gridview_cli::{Cli, Commands};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

mod commands;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let service = commands::service(cli.config.as_deref())?;
    match &cli.command {
        Commands::Generate { scenario, out } => {
            commands::generate::handle(&service, scenario, out.as_deref())
        }
        Commands::Inspect { grid } => commands::inspect::handle(&service, grid),
        Commands::Switch { grid, fuse, out } => {
            commands::switch::handle(&service, grid, *fuse, out.as_deref())
        }
        Commands::Islands { grid } => commands::islands::handle(&service, grid),
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so exported JSON on stdout stays parseable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }

    info!("gridview-cli {}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(&cli) {
        error!("{err:?}");
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
