//! Fauxbase - simulated backend demo entry point

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fauxbase::api::{build_router, AppState, Envelope};
use fauxbase::auth::StubSignIn;
use fauxbase::config::Config;
use fauxbase::store::MemoryStore;
use fauxbase::types::Record;

#[derive(Parser)]
#[command(name = "fauxbase")]
#[command(about = "Simulated backend: a connection-gated in-memory store with an in-process request router")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the store demo: connect, insert, query, status, disconnect
    Store,

    /// Run the dispatch demo against the registered routes
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("fauxbase={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    // Load config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Store => store_demo(config).await?,
        Commands::Demo => dispatch_demo(config).await?,
    }

    Ok(())
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}

async fn store_demo(config: Config) -> anyhow::Result<()> {
    let store = MemoryStore::new(config);

    store.connect().await;
    store
        .insert(record(json!({ "id": 1, "name": "Alice", "role": "admin" })))
        .await?;
    store
        .insert(record(json!({ "id": 2, "name": "Bob", "role": "user" })))
        .await?;

    let all = store.query(None).await?;
    println!("All users: {}", serde_json::to_string_pretty(&all)?);

    let admins = store.query(Some(("role", &json!("admin")))).await?;
    println!("Only admins: {}", serde_json::to_string_pretty(&admins)?);

    let status = store.status().await;
    println!("Status: {}", serde_json::to_string_pretty(&status)?);

    store.disconnect().await;
    Ok(())
}

async fn dispatch_demo(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new(config));
    let state = AppState::new(store.clone(), Arc::new(StubSignIn::new()));
    let router = build_router(state);

    store.connect().await;

    print_envelope("GET /health", &router.dispatch("GET", "/health", None).await)?;
    print_envelope(
        "GET /users (empty)",
        &router.dispatch("GET", "/users", None).await,
    )?;
    print_envelope(
        "POST /login (valid)",
        &router
            .dispatch(
                "POST",
                "/login",
                Some(json!({ "username": "alice", "password": "secret123" })),
            )
            .await,
    )?;
    print_envelope(
        "POST /login (invalid)",
        &router
            .dispatch(
                "POST",
                "/login",
                Some(json!({ "username": "bad!", "password": "123" })),
            )
            .await,
    )?;
    print_envelope(
        "GET /users (after login)",
        &router.dispatch("GET", "/users", None).await,
    )?;

    store.disconnect().await;
    Ok(())
}

fn print_envelope(label: &str, envelope: &Envelope) -> anyhow::Result<()> {
    println!("{} -> {}", label, serde_json::to_string_pretty(envelope)?);
    Ok(())
}
