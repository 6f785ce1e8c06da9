//! Live monitoring functionality for wabastat
//!
//! Watches the input file and re-runs the whole pipeline whenever it is
//! written or replaced, the terminal equivalent of uploading a new file.
//! Each refresh replaces the previous dashboard; nothing carries over.

use crate::{
    error::{Result, WabastatError},
    filters::RowFilter,
    ingest::open_source,
    output::{DisplayOptions, get_formatter},
    report::build_dashboard,
    summary::Dashboard,
};
use chrono::Local;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

// Editors often write a file in several steps; wait for them to finish
const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Live monitoring state
pub struct LiveMonitor {
    path: PathBuf,
    filter: RowFilter,
    json_output: bool,
    options: DisplayOptions,
}

impl LiveMonitor {
    /// Create a new live monitor
    pub fn new(
        path: PathBuf,
        filter: RowFilter,
        json_output: bool,
        options: DisplayOptions,
    ) -> Self {
        Self {
            path,
            filter,
            json_output,
            options,
        }
    }

    /// Start the live monitoring loop
    pub async fn run(self) -> Result<()> {
        let (tx, mut rx) = mpsc::channel::<()>(1);
        let file_name = self.path.file_name().map(OsString::from).ok_or_else(|| {
            WabastatError::InvalidArgument(format!("{} is not a file", self.path.display()))
        })?;
        let watch_dir = watch_directory(&self.path);

        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| {
                if let Ok(event) = result
                    && matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                    && event
                        .paths
                        .iter()
                        .any(|path| path.file_name() == Some(file_name.as_os_str()))
                {
                    // A full channel already has a refresh pending
                    let _ = tx.try_send(());
                }
            },
            Config::default(),
        )
        .map_err(|e| WabastatError::Watch(format!("Failed to create file watcher: {e}")))?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| {
                WabastatError::Watch(format!(
                    "Failed to watch directory {}: {e}",
                    watch_dir.display()
                ))
            })?;
        info!("Watching {} for changes", self.path.display());

        // Initial display
        self.refresh_display().await;

        loop {
            tokio::select! {
                Some(()) = rx.recv() => {
                    tokio::time::sleep(SETTLE_DELAY).await;
                    // Drop events that arrived while settling
                    while rx.try_recv().is_ok() {}
                    debug!("Change detected in {}", self.path.display());
                    self.refresh_display().await;
                }
                _ = tokio::signal::ctrl_c() => {
                    if !self.json_output {
                        println!("\nExiting live monitoring mode...");
                    }
                    break;
                }
            }
        }

        drop(watcher);
        Ok(())
    }

    /// Load, filter and aggregate the current file contents
    pub async fn prepare_dashboard(&self) -> Dashboard {
        let source = open_source(&self.path);
        build_dashboard(source.as_ref(), &self.filter).await
    }

    /// Refresh the display with current data
    async fn refresh_display(&self) {
        let dashboard = self.prepare_dashboard().await;
        let formatter = get_formatter(self.json_output, self.options);

        if !self.json_output {
            // Clear screen and move cursor to top-left
            print!("\x1B[2J\x1B[1;1H");
            println!(
                "Watching {} - Last updated: {}",
                self.path.display(),
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            println!("Press Ctrl+C to exit");
            println!("{}", "-".repeat(self.options.chart_width));
        }

        println!("{}", formatter.format_dashboard(&dashboard));
    }
}

/// Directory to watch for a file path; relative bare names watch `.`
fn watch_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
