use std::path::PathBuf;

use clap::Parser;
use tasklist_store::Database;

/// Minimal persistence-backed task list service.
#[derive(Parser, Debug)]
#[command(name = "tasklist", version)]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Path to the SQLite database file. Created on first run.
    #[arg(long, default_value = "todos.db")]
    db_path: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let db = Database::open(&args.db_path).expect("Failed to open database");
    tracing::info!(path = %args.db_path.display(), "Database ready");

    let config = tasklist_server::ServerConfig { port: args.port };
    let _handle = tasklist_server::start(config, db)
        .await
        .expect("Failed to start server");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");

    tracing::info!("Shutting down");
}
