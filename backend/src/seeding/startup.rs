//! Startup seeding orchestration.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::UserDirectory;
use crate::domain::ports::{DirectoryStore, DirectoryStoreError};

use super::fixture::demo_directory;

/// Seeding behaviour chosen at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSettings {
    /// Replace the stored directory before serving.
    pub enabled: bool,
    /// JSON file to seed from; the built-in demo directory when absent.
    pub seed_path: Option<PathBuf>,
}

/// Result of a seed that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Number of users written.
    pub user_count: usize,
    /// Seed file used, if any.
    pub source: Option<PathBuf>,
}

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed file could not be read.
    #[error("failed to read seed file at {path}: {source}")]
    SeedRead {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a username to record mapping.
    #[error("failed to parse seed file at {path}: {source}")]
    SeedParse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the directory to the store failed.
    #[error("failed to insert info: {0}")]
    Store(#[from] DirectoryStoreError),
}

/// Replace the stored directory when seeding is enabled.
///
/// Returns `Ok(None)` when seeding is disabled. Store failures are returned
/// as-is; the caller treats them as fatal.
///
/// # Examples
///
/// ```rust
/// use user_directory::domain::ports::{DirectoryStore, InMemoryDirectoryStore};
/// use user_directory::seeding::{SeedSettings, seed_directory_on_startup};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryDirectoryStore::new();
/// let settings = SeedSettings { enabled: true, seed_path: None };
/// let outcome = seed_directory_on_startup(&settings, &store)
///     .await
///     .expect("seeding succeeds");
/// assert_eq!(outcome.map(|o| o.user_count), Some(2));
/// assert_eq!(store.list_usernames().await.expect("list").len(), 2);
/// # });
/// ```
pub async fn seed_directory_on_startup(
    settings: &SeedSettings,
    store: &dyn DirectoryStore,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "directory seeding skipped");
        return Ok(None);
    }

    let directory = match &settings.seed_path {
        Some(path) => load_seed_file(path)?,
        None => demo_directory(),
    };

    store.seed(&directory).await?;

    let outcome = SeedOutcome {
        user_count: directory.len(),
        source: settings.seed_path.clone(),
    };
    info!(
        user_count = outcome.user_count,
        source = %outcome
            .source
            .as_deref()
            .map_or_else(|| "built-in".to_owned(), |path| path.display().to_string()),
        "directory seeded"
    );
    Ok(Some(outcome))
}

fn read_error(path: &Path, source: std::io::Error) -> StartupSeedingError {
    StartupSeedingError::SeedRead {
        path: path.to_path_buf(),
        source,
    }
}

fn load_seed_file(path: &Path) -> Result<UserDirectory, StartupSeedingError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "seed path must be a file",
            ),
        )
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|source| read_error(path, source))?;
    let contents = dir
        .read_to_string(Path::new(file_name))
        .map_err(|source| read_error(path, source))?;
    serde_json::from_str(&contents).map_err(|source| StartupSeedingError::SeedParse {
        path: path.to_path_buf(),
        source,
    })
}
