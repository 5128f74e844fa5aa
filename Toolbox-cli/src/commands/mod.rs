//! Command execution. Each command produces an [`Outcome`] or a
//! [`CommandError`]; both carry a user-facing notice.

pub mod readings;
pub mod tools;

use std::io;

use thiserror::Error;
use toolbox_data::storage::{open_storage, StorageConfig, StorageError};
use toolbox_domain::dates;
use toolbox_domain::entities::Notice;
use toolbox_domain::errors::ReadingsError;
use toolbox_domain::services::ReadingsStore;
use toolbox_domain::tools::ToolError;
use tracing::debug;

use crate::cli::{Cli, Command};

/// Result of a successful command
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Output lines, printed in order
    pub lines: Vec<String>,
    /// Notice printed after the lines
    pub notice: Option<Notice>,
}

impl Outcome {
    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            notice: None,
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            lines: Vec::new(),
            notice: Some(notice),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Command failures
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Readings(#[from] ReadingsError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Could not write output: {0}")]
    Output(#[from] io::Error),

    #[error("Could not serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

impl CommandError {
    /// Notice describing the failure
    pub fn notice(&self) -> Notice {
        match self {
            CommandError::Readings(e) => Notice::from(e),
            CommandError::Tool(e) => Notice::from(e),
            CommandError::Storage(e) => Notice::error("Storage Error", Some(e.to_string())),
            CommandError::Output(_) | CommandError::Serialization(_) | CommandError::Usage(_) => {
                Notice::error("Error", Some(self.to_string()))
            }
        }
    }
}

/// Storage settings from the environment, overridden by command line flags
pub fn storage_config(cli: &Cli) -> Result<StorageConfig, StorageError> {
    storage_config_with(cli, |name| std::env::var(name).ok())
}

/// Storage settings from `lookup`. A `--storage` flag replaces the
/// `TOOLBOX_STORAGE` value before it is parsed.
pub fn storage_config_with<F>(cli: &Cli, lookup: F) -> Result<StorageConfig, StorageError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = StorageConfig::from_lookup(|name| match (name, &cli.storage) {
        ("TOOLBOX_STORAGE", Some(backend)) => Some(backend.clone()),
        _ => lookup(name),
    })?;

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(sqlite_path) = &cli.sqlite_path {
        config.sqlite_path = Some(sqlite_path.clone());
    }

    Ok(config)
}

/// Run the parsed command
pub async fn run(cli: &Cli) -> Result<Outcome, CommandError> {
    match &cli.command {
        Command::Readings(command) => {
            let config = storage_config(cli)?;
            debug!("Using {:?} storage", config.backend);

            let mut store = ReadingsStore::open(open_storage(&config)?);
            readings::execute(command, &mut store, dates::today()).await
        }
        Command::Encode(args) => Ok(tools::encode(args)),
        Command::Decode(args) => tools::decode(args),
        Command::Karaoke { song } => tools::karaoke(song),
    }
}
