//! Command-line flags and their validation.

use anyhow::{Result, bail};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

use docport::{
    mongodb::DatabaseId,
    options::TraversalOptions,
    tree::TreeFormat,
};

#[derive(Parser, Debug)]
#[command(name = "docport")]
#[command(about = "Export a document-store collection tree to JSON, or import one back")]
#[command(version)]
pub struct Cli {
    /// Credential file with the store connection settings
    #[arg(long = "serviceAccount", value_name = "PATH")]
    pub service_account: Option<PathBuf>,

    /// Database to use; `(default)` selects the credential file's default database
    #[arg(long = "dbId", value_name = "ID", default_value = DatabaseId::DEFAULT_ID)]
    pub db_id: DatabaseId,

    /// Export --collection to --output
    #[arg(long, conflicts_with = "import")]
    pub export: bool,

    /// Import every collection found in --file
    #[arg(long)]
    pub import: bool,

    /// Collection path to export (`users` or `users/u1/posts`)
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// File the export is written to (overwritten)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// File to import
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// File layout: `legacy` or `tagged`
    #[arg(long, value_name = "FORMAT", default_value_t = TreeFormat::Legacy)]
    pub format: TreeFormat,

    /// Sibling documents processed at once
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub concurrency: usize,

    /// Abort the whole run after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// What to do once connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Export { collection: String, output: PathBuf },
    Import { file: PathBuf },
}

/// A fully validated invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub mode: Mode,
    pub service_account: PathBuf,
    pub db_id: DatabaseId,
    pub format: TreeFormat,
    pub options: TraversalOptions,
    pub timeout: Option<Duration>,
}

impl Cli {
    /// Validates the flags for the selected mode.
    ///
    /// Returns `Ok(None)` when neither `--export` nor `--import` was given.
    pub fn into_invocation(self) -> Result<Option<Invocation>> {
        let mode = if self.export {
            let Some(collection) = self.collection else {
                bail!("--collection is required with --export");
            };
            let Some(output) = self.output else {
                bail!("--output is required with --export");
            };

            Mode::Export { collection, output }
        } else if self.import {
            let Some(file) = self.file else {
                bail!("--file is required with --import");
            };

            Mode::Import { file }
        } else {
            return Ok(None);
        };

        let Some(service_account) = self.service_account else {
            bail!("--serviceAccount is required");
        };

        if self.concurrency == 0 {
            bail!("--concurrency must be at least 1");
        }

        Ok(Some(Invocation {
            mode,
            service_account,
            db_id: self.db_id,
            format: self.format,
            options: TraversalOptions::default().with_concurrency(self.concurrency),
            timeout: self.timeout.map(Duration::from_secs),
        }))
    }
}
