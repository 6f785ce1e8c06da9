//! wabastat - Summarize WhatsApp Business messaging-delivery spreadsheets

use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wabastat::{
    cli::{Cli, Command, resolve_command},
    error::Result,
    filters::RowFilter,
    ingest::open_source,
    live_monitor::LiveMonitor,
    output::{DisplayOptions, get_formatter},
    report::build_dashboard,
    summary::Dashboard,
};

/// Helper function to load, filter and aggregate one input file
async fn load_dashboard(file: &Path, filter: &RowFilter) -> Dashboard {
    let source = open_source(file);
    build_dashboard(source.as_ref(), filter).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default; --verbose honors RUST_LOG
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wabastat=info"))
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }
    let color = !cli.no_color && is_terminal::is_terminal(std::io::stdout());

    let command = resolve_command(&cli)?;
    let row_filter = cli.row_filter();
    let file = command.file().clone();
    info!("Reading {}", file.display());

    // totals and countries only differ in which part they print
    let summary_options = DisplayOptions {
        color,
        ..DisplayOptions::default()
    };

    match command {
        Command::Report(args) => {
            let options = args.display_options(color);

            if args.watch {
                info!("Starting live monitoring mode");
                let monitor = LiveMonitor::new(file, row_filter, cli.json, options);
                monitor.run().await?;
            } else {
                let dashboard = load_dashboard(&file, &row_filter).await;
                let formatter = get_formatter(cli.json, options);
                println!("{}", formatter.format_dashboard(&dashboard));
            }
        }
        Command::Totals(_) => {
            let dashboard = load_dashboard(&file, &row_filter).await;
            let formatter = get_formatter(cli.json, summary_options);
            println!("{}", formatter.format_totals(&dashboard.totals));
        }
        Command::Countries(_) => {
            let dashboard = load_dashboard(&file, &row_filter).await;
            let formatter = get_formatter(cli.json, summary_options);
            println!("{}", formatter.format_countries(&dashboard.countries));
        }
    }

    Ok(())
}
