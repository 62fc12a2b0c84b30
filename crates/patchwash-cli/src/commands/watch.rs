use std::io::BufRead;
use std::time::Duration;

use anyhow::Result;
use patchwash_config::Config;
use patchwash_watch::{WatchDispatcher, WatchOptions};

use crate::cli::Cli;

pub async fn handle(cli: Cli, config: &Config) -> Result<()> {
    if !cli.directory.is_dir() {
        anyhow::bail!("Invalid folder path: {}", cli.directory.display());
    }
    let dir = cli.directory.canonicalize()?;

    let options = WatchOptions {
        pattern: cli.pattern.unwrap_or_else(|| config.watch.pattern.clone()),
        debounce: Duration::from_millis(cli.debounce_ms.unwrap_or(config.watch.debounce_ms)),
        settle: Duration::from_millis(cli.settle_ms.unwrap_or(config.watch.settle_ms)),
        max_attempts: config.watch.max_attempts,
        retry_delay: Duration::from_millis(config.watch.retry_delay_ms),
    };
    let dispatcher = WatchDispatcher::new(dir.clone(), options)?;

    println!("Watching folder: {}", dir.display());
    println!("Press 'q' then Enter to quit.");

    tokio::select! {
        result = dispatcher.run() => result?,
        _ = quit_requested() => {
            println!("Stopping watch.");
            // Exit directly: a pending blocking stdin read would otherwise
            // keep the runtime from shutting down
            std::process::exit(0);
        }
    }

    Ok(())
}

/// Resolves when the operator asks to stop: a `q` line on stdin or Ctrl-C.
/// A quit source that turns out to be unavailable never resolves, it does
/// not count as a quit.
async fn quit_requested() {
    tokio::select! {
        _ = interrupt_signal() => {}
        _ = quit_key() => {}
    }
}

/// Resolves on Ctrl-C. When no signal handler could be installed there is
/// nothing to wait for here.
async fn interrupt_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "Ctrl-C handler unavailable, quit with 'q' instead");
        std::future::pending::<()>().await;
    }
}

/// Resolves on a `q` line from stdin.
async fn quit_key() {
    let reader = tokio::task::spawn_blocking(|| read_until_quit(std::io::stdin().lock()));
    resolve_on_quit(reader).await;
}

/// Waits on the reader task and resolves only once it saw a quit line.
/// A closed stdin leaves quitting to Ctrl-C.
async fn resolve_on_quit(reader: tokio::task::JoinHandle<bool>) {
    if !matches!(reader.await, Ok(true)) {
        tracing::debug!("stdin closed without a quit, waiting for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Blocks reading lines until `q` is entered. Returns false when the
/// stream closes first.
fn read_until_quit(mut reader: impl BufRead) -> bool {
    let mut input = String::new();
    loop {
        input.clear();
        match reader.read_line(&mut input) {
            Ok(0) | Err(_) => return false,
            Ok(_) if input.trim().eq_ignore_ascii_case("q") => return true,
            Ok(_) => {}
        }
    }
}
