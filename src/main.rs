use std::io;

use anyhow::Result;
use clap::Parser;

use depsweep::cli::Cli;
use depsweep::session::Session;
use depsweep::SweepError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // A bad starting path is the only fatal error; everything after this
    // is recovered inside the session loop.
    if !cli.path.exists() {
        return Err(SweepError::PathNotFound(cli.path).into());
    }
    if !cli.path.is_dir() {
        return Err(SweepError::NotADirectory(cli.path).into());
    }
    let start = cli.path.canonicalize().map_err(|source| SweepError::Io {
        path: cli.path.clone(),
        source,
    })?;

    tracing::debug!(path = %start.display(), "Starting session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = Session::new(start).run(&mut stdin.lock(), &mut stdout.lock())?;

    tracing::info!(
        bytes_freed = stats.bytes_freed,
        deleted = stats.deleted_count,
        "Session finished"
    );

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depsweep={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
