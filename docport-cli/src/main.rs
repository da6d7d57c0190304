use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use std::{future::Future, process::ExitCode, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docport::{
    backend::StoreBackendBuilder,
    mongodb::{MongoDbStoreBuilder, ServiceAccount},
    store::DocumentStore,
};

mod cli;
mod commands;

use cli::{Cli, Invocation, Mode};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let invocation = match Cli::parse().into_invocation() {
        Ok(Some(invocation)) => invocation,
        Ok(None) => {
            eprintln!("{}", Cli::command().render_help());
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(invocation).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(invocation: Invocation) -> Result<()> {
    let account = ServiceAccount::from_file(&invocation.service_account)?;

    let backend = MongoDbStoreBuilder::from_service_account(&account, &invocation.db_id)
        .build()
        .await
        .context("Failed to connect to the store")?;
    tracing::debug!(database = %backend.database(), "store ready");

    let store = DocumentStore::new(backend).with_options(invocation.options);

    let work = async {
        match &invocation.mode {
            Mode::Export { collection, output } => {
                commands::run_export(&store, collection, output, invocation.format).await
            }
            Mode::Import { file } => commands::run_import(&store, file, invocation.format).await,
        }
    };

    let result = with_deadline(invocation.timeout, work).await;

    store.shutdown().await?;

    result
}

/// Runs `work`, failing once `limit` has elapsed.
async fn with_deadline<T>(limit: Option<Duration>, work: impl Future<Output = Result<T>>) -> Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .map_err(|_| anyhow!("Timed out after {limit:?}"))?,
        None => work.await,
    }
}
