use std::{io::stdout, process};

use clap::Parser;
use colored::Colorize;
use orifinder::{
    cli::Args,
    run::{run, write_report},
    viewer::{ImageViewer, NoViewer, SystemViewer},
};

fn main() {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    init_tracing();

    let config = args.to_config().unwrap_or_else(|e| {
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            e.to_string().blue()
        );
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Help menu:".blue().bold(),
            "$ orifinder --help".bold()
        );
        process::exit(1);
    });

    if !args.quiet {
        eprintln!(
            "{}: {}",
            "k-length".bold(),
            config.k.to_string().blue().bold()
        );
        eprintln!(
            "{}: {}",
            "window".bold(),
            config.window.to_string().blue().bold()
        );
        eprintln!(
            "{}: {}",
            "data".bold(),
            config.input.display().to_string().underline().bold().blue()
        );
        eprintln!(
            "{}: {}",
            "strategy".bold(),
            config.strategy.to_string().blue().bold()
        );
        eprintln!();
    }

    let viewer: &dyn ImageViewer = if args.no_open {
        &NoViewer
    } else {
        &SystemViewer
    };

    let result = run(&config, viewer)
        .and_then(|report| write_report(&report, args.format, stdout().lock()));

    if let Err(e) = result {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`).
#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
