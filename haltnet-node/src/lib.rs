// === Core modules ===
pub mod config;
pub mod directory;
pub mod exit;
pub mod node;
pub mod process;
pub mod transport;
pub mod util;

// === CLI entrypoint ===
pub mod cli;

/// Entrypoint used by `main.rs` and tests to run the full CLI.
pub async fn run_cli() -> anyhow::Result<()> {
    cli::cli().await
}
