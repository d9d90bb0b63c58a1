//! Driven port for the user directory store.
//!
//! The directory lives in two structures: an ordered sequence of usernames and
//! one record per username. Adapters translate the three directory operations
//! into store commands and back. Nothing here is transactional: seeding a new
//! directory deletes the old sequence first and writes users one at a time, so
//! a failure partway leaves a mixed state that the next seed replaces.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{UserDirectory, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory store adapters.
    pub enum DirectoryStoreError {
        /// The store could not be reached.
        Connection { message: String } => "directory store connection failed: {message}",
        /// Dialling the store exceeded the configured timeout.
        Timeout { address: String, timeout_ms: u64 } =>
            "connecting to directory store at {address} timed out after {timeout_ms} ms",
        /// Clearing the previous username sequence failed.
        Clear { message: String } => "failed to delete existing user list: {message}",
        /// Writing a user during seeding failed.
        Insert { username: String, message: String } =>
            "failed to insert user {username:?}: {message}",
        /// Reading the username sequence failed.
        ListUsernames { message: String } => "failed to get user list: {message}",
        /// Reading one user's record failed or returned unusable data.
        Record { username: String, message: String } =>
            "failed to get user info for {username:?}: {message}",
    }
}

/// Port for seeding and reading the user directory.
///
/// Implementations acquire whatever store resources they need per call and
/// release them before returning, including on error paths.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Replace the directory with `directory`.
    ///
    /// Users are written in ascending username order. On failure the error
    /// names the offending user and nothing already written is rolled back.
    async fn seed(&self, directory: &UserDirectory) -> Result<(), DirectoryStoreError>;

    /// Return every username in stored order.
    async fn list_usernames(&self) -> Result<Vec<String>, DirectoryStoreError>;

    /// Return every user record keyed by username.
    ///
    /// A single unreadable record fails the whole call; partial directories
    /// are never returned.
    async fn fetch_all_records(&self) -> Result<UserDirectory, DirectoryStoreError>;
}

/// Return the directory's usernames in ascending order.
///
/// Seeding walks this order so the stored sequence is deterministic for a
/// given directory.
pub fn seed_order(directory: &UserDirectory) -> Vec<&str> {
    let mut usernames: Vec<&str> = directory.keys().map(String::as_str).collect();
    usernames.sort_unstable();
    usernames
}

#[derive(Debug, Default)]
struct InMemoryState {
    usernames: Vec<String>,
    records: HashMap<String, UserRecord>,
}

/// Process-local directory store with the same layout as the Redis adapter.
///
/// Used by tests and for running the server without a Redis instance. Like
/// the Redis adapter, seeding clears the username sequence but leaves records
/// of users that are no longer listed in place.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryStore {
    state: Mutex<InMemoryState>,
}

impl InMemoryDirectoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from raw parts without checking that they agree.
    ///
    /// Lets tests build sequences that reference missing records.
    pub fn from_parts(usernames: Vec<String>, records: HashMap<String, UserRecord>) -> Self {
        Self {
            state: Mutex::new(InMemoryState { usernames, records }),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut InMemoryState) -> T) -> T {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn seed(&self, directory: &UserDirectory) -> Result<(), DirectoryStoreError> {
        self.with_state(|state| {
            state.usernames.clear();
            for username in seed_order(directory) {
                let Some(record) = directory.get(username) else {
                    continue;
                };
                state.usernames.push(username.to_owned());
                state.records.insert(username.to_owned(), record.clone());
            }
        });
        Ok(())
    }

    async fn list_usernames(&self) -> Result<Vec<String>, DirectoryStoreError> {
        Ok(self.with_state(|state| state.usernames.clone()))
    }

    async fn fetch_all_records(&self) -> Result<UserDirectory, DirectoryStoreError> {
        self.with_state(|state| -> Result<UserDirectory, DirectoryStoreError> {
            let mut directory = UserDirectory::with_capacity(state.usernames.len());
            for username in &state.usernames {
                let record = state.records.get(username).ok_or_else(|| {
                    DirectoryStoreError::record(username.as_str(), "record not found")
                })?;
                directory.insert(username.clone(), record.clone());
            }
            Ok(directory)
        })
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural contract for the in-memory directory store.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> UserDirectory {
        UserDirectory::from([
            (
                "mdelio".to_owned(),
                UserRecord::new("Matthew", "my-password"),
            ),
            (
                "anaim".to_owned(),
                UserRecord::new("Allan", "my-super-secret-password"),
            ),
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_usernames_match_directory_keys(directory: UserDirectory) {
        let store = InMemoryDirectoryStore::new();
        store.seed(&directory).await.expect("seed succeeds");

        let usernames = store.list_usernames().await.expect("list succeeds");
        assert_eq!(usernames, vec!["anaim".to_owned(), "mdelio".to_owned()]);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_records_round_trip(directory: UserDirectory) {
        let store = InMemoryDirectoryStore::new();
        store.seed(&directory).await.expect("seed succeeds");

        let records = store.fetch_all_records().await.expect("fetch succeeds");
        assert_eq!(records, directory);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_seed_clears_usernames(directory: UserDirectory) {
        let store = InMemoryDirectoryStore::new();
        store.seed(&directory).await.expect("first seed succeeds");
        store
            .seed(&UserDirectory::new())
            .await
            .expect("empty seed succeeds");

        let usernames = store.list_usernames().await.expect("list succeeds");
        assert!(usernames.is_empty());
        let records = store.fetch_all_records().await.expect("fetch succeeds");
        assert!(records.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn orphan_username_fails_the_whole_fetch() {
        let store = InMemoryDirectoryStore::from_parts(
            vec!["anaim".to_owned(), "ghost".to_owned()],
            HashMap::from([("anaim".to_owned(), UserRecord::new("Allan", "pw"))]),
        );

        let err = store
            .fetch_all_records()
            .await
            .expect_err("orphan username must fail");
        assert_eq!(err, DirectoryStoreError::record("ghost", "record not found"));
        assert!(err.to_string().contains("\"ghost\""));
    }

    #[rstest]
    fn seed_order_is_lexicographic(directory: UserDirectory) {
        assert_eq!(seed_order(&directory), vec!["anaim", "mdelio"]);
    }
}
