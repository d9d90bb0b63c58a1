//! Redis-backed directory store.
//!
//! Layout:
//! - `users` is a list holding every username in seed order.
//! - `user:<username>` is a hash with the fields `name` and `passwd`.
//!
//! No pool is kept. Each operation dials a fresh multiplexed connection with
//! the configured timeout and drops it when the operation returns, so a slow
//! or missing Redis only ever affects the request that touched it.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::ports::{DirectoryStore, DirectoryStoreError, seed_order};
use crate::domain::{UserDirectory, UserRecord};

const USERS_KEY: &str = "users";
const USER_KEY_PREFIX: &str = "user";
const NAME_FIELD: &str = "name";
const PASSWORD_FIELD: &str = "passwd";

const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_millis(500);

fn user_key(username: &str) -> String {
    format!("{USER_KEY_PREFIX}:{username}")
}

/// Connection parameters for [`RedisDirectoryStore`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use user_directory::outbound::redis_store::RedisStoreConfig;
///
/// let config = RedisStoreConfig::new("localhost:6379")
///     .with_dial_timeout(Duration::from_millis(250));
/// assert_eq!(config.connection_url(), "redis://localhost:6379/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisStoreConfig {
    address: String,
    dial_timeout: Duration,
}

impl RedisStoreConfig {
    /// Create a configuration for `address` with a 500 ms dial timeout.
    ///
    /// `address` is either `host:port` or a full `redis://` / `rediss://` URL.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
        }
    }

    /// Set how long to wait for a connection before giving up.
    pub fn with_dial_timeout(mut self, dial_timeout: Duration) -> Self {
        self.dial_timeout = dial_timeout;
        self
    }

    /// Address as configured.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Dial timeout applied to every connection attempt.
    pub fn dial_timeout(&self) -> Duration {
        self.dial_timeout
    }

    /// URL handed to the Redis client.
    pub fn connection_url(&self) -> String {
        if self.address.contains("://") {
            self.address.clone()
        } else {
            format!("redis://{}/", self.address)
        }
    }

    fn dial_timeout_ms(&self) -> u64 {
        u64::try_from(self.dial_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Reasons a stored user hash cannot be turned into a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum RecordDecodeError {
    #[error("record not found")]
    Missing,
    #[error("record is missing field {0:?}")]
    MissingField(&'static str),
    #[error("expected {expected} fields, store returned {actual}")]
    FieldCount { expected: usize, actual: usize },
}

/// Validate an `HMGET name passwd` reply.
fn decode_record(fields: Vec<Option<String>>) -> Result<UserRecord, RecordDecodeError> {
    let actual = fields.len();
    let [name, password] = <[Option<String>; 2]>::try_from(fields)
        .map_err(|_| RecordDecodeError::FieldCount { expected: 2, actual })?;
    match (name, password) {
        (Some(name), Some(password)) => Ok(UserRecord::new(name, password)),
        (None, None) => Err(RecordDecodeError::Missing),
        (None, Some(_)) => Err(RecordDecodeError::MissingField(NAME_FIELD)),
        (Some(_), None) => Err(RecordDecodeError::MissingField(PASSWORD_FIELD)),
    }
}

/// Directory store adapter talking to a single Redis instance.
#[derive(Debug, Clone)]
pub struct RedisDirectoryStore {
    config: RedisStoreConfig,
}

impl RedisDirectoryStore {
    /// Create an adapter. No connection is made until an operation runs.
    pub fn new(config: RedisStoreConfig) -> Self {
        Self { config }
    }

    /// Connection parameters in use.
    pub fn config(&self) -> &RedisStoreConfig {
        &self.config
    }

    async fn connect(&self) -> Result<MultiplexedConnection, DirectoryStoreError> {
        let client = Client::open(self.config.connection_url().as_str())
            .map_err(|err| DirectoryStoreError::connection(err.to_string()))?;
        match timeout(
            self.config.dial_timeout(),
            client.get_multiplexed_async_connection(),
        )
        .await
        {
            Ok(connection) => {
                connection.map_err(|err| DirectoryStoreError::connection(err.to_string()))
            }
            Err(_) => Err(DirectoryStoreError::timeout(
                self.config.address(),
                self.config.dial_timeout_ms(),
            )),
        }
    }
}

async fn read_usernames(
    connection: &mut MultiplexedConnection,
) -> Result<Vec<String>, DirectoryStoreError> {
    let length: isize = connection
        .llen(USERS_KEY)
        .await
        .map_err(|err| DirectoryStoreError::list_usernames(err.to_string()))?;
    if length <= 0 {
        return Ok(Vec::new());
    }
    // LRANGE's stop index is inclusive.
    connection
        .lrange(USERS_KEY, 0, length - 1)
        .await
        .map_err(|err| DirectoryStoreError::list_usernames(err.to_string()))
}

async fn read_record(
    connection: &mut MultiplexedConnection,
    username: &str,
) -> Result<UserRecord, DirectoryStoreError> {
    let fields: Vec<Option<String>> = redis::cmd("HMGET")
        .arg(user_key(username))
        .arg(NAME_FIELD)
        .arg(PASSWORD_FIELD)
        .query_async(connection)
        .await
        .map_err(|err| DirectoryStoreError::record(username, err.to_string()))?;
    decode_record(fields).map_err(|err| DirectoryStoreError::record(username, err.to_string()))
}

#[async_trait]
impl DirectoryStore for RedisDirectoryStore {
    async fn seed(&self, directory: &UserDirectory) -> Result<(), DirectoryStoreError> {
        let mut connection = self.connect().await?;

        let _: () = connection
            .del(USERS_KEY)
            .await
            .map_err(|err| DirectoryStoreError::clear(err.to_string()))?;

        for username in seed_order(directory) {
            let Some(record) = directory.get(username) else {
                continue;
            };
            let _: () = connection
                .rpush(USERS_KEY, username)
                .await
                .map_err(|err| DirectoryStoreError::insert(username, err.to_string()))?;
            let _: () = connection
                .hset_multiple(
                    user_key(username),
                    &[(NAME_FIELD, record.name()), (PASSWORD_FIELD, record.password())],
                )
                .await
                .map_err(|err| {
                    DirectoryStoreError::insert(username, format!("writing record: {err}"))
                })?;
            debug!(username, "seeded directory user");
        }
        Ok(())
    }

    async fn list_usernames(&self) -> Result<Vec<String>, DirectoryStoreError> {
        let mut connection = self.connect().await?;
        read_usernames(&mut connection).await
    }

    async fn fetch_all_records(&self) -> Result<UserDirectory, DirectoryStoreError> {
        let mut connection = self.connect().await?;
        let usernames = read_usernames(&mut connection).await?;

        let mut directory = UserDirectory::with_capacity(usernames.len());
        for username in usernames {
            let record = read_record(&mut connection, &username).await?;
            directory.insert(username, record);
        }
        Ok(directory)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for key layout, reply decoding, and connection failures.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn user_keys_are_namespaced() {
        assert_eq!(user_key("anaim"), "user:anaim");
    }

    #[rstest]
    #[case("localhost:6379", "redis://localhost:6379/")]
    #[case("redis://cache:6380/2", "redis://cache:6380/2")]
    #[case("rediss://secure:6379", "rediss://secure:6379")]
    fn connection_url_accepts_host_port_or_url(#[case] address: &str, #[case] expected: &str) {
        assert_eq!(RedisStoreConfig::new(address).connection_url(), expected);
    }

    #[rstest]
    fn config_defaults_to_half_second_timeout() {
        let config = RedisStoreConfig::new("localhost:6379");
        assert_eq!(config.dial_timeout(), Duration::from_millis(500));
        assert_eq!(config.dial_timeout_ms(), 500);
    }

    #[rstest]
    fn complete_reply_decodes() {
        let record = decode_record(vec![Some("Allan".into()), Some("secret".into())])
            .expect("complete reply");
        assert_eq!(record, UserRecord::new("Allan", "secret"));
    }

    #[rstest]
    #[case(vec![None, None], RecordDecodeError::Missing)]
    #[case(vec![None, Some("pw".into())], RecordDecodeError::MissingField("name"))]
    #[case(vec![Some("Allan".into()), None], RecordDecodeError::MissingField("passwd"))]
    #[case(
        vec![Some("Allan".into())],
        RecordDecodeError::FieldCount { expected: 2, actual: 1 }
    )]
    #[case(
        vec![Some("a".into()), Some("b".into()), Some("c".into())],
        RecordDecodeError::FieldCount { expected: 2, actual: 3 }
    )]
    fn malformed_replies_are_rejected(
        #[case] fields: Vec<Option<String>>,
        #[case] expected: RecordDecodeError,
    ) {
        assert_eq!(decode_record(fields), Err(expected));
    }

    fn unreachable_store() -> RedisDirectoryStore {
        // Port 1 is reserved and nothing listens on it in test environments.
        RedisDirectoryStore::new(
            RedisStoreConfig::new("127.0.0.1:1").with_dial_timeout(Duration::from_millis(200)),
        )
    }

    fn assert_connectivity_error(err: &DirectoryStoreError) {
        assert!(
            matches!(
                err,
                DirectoryStoreError::Connection { .. } | DirectoryStoreError::Timeout { .. }
            ),
            "unexpected error: {err}"
        );
        assert!(!err.to_string().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_fails_listing() {
        let err = unreachable_store()
            .list_usernames()
            .await
            .expect_err("no redis on port 1");
        assert_connectivity_error(&err);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_fails_fetching() {
        let err = unreachable_store()
            .fetch_all_records()
            .await
            .expect_err("no redis on port 1");
        assert_connectivity_error(&err);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_fails_seeding() {
        let directory = UserDirectory::from([("anaim".to_owned(), UserRecord::new("Allan", "pw"))]);
        let err = unreachable_store()
            .seed(&directory)
            .await
            .expect_err("no redis on port 1");
        assert_connectivity_error(&err);
    }

    #[rstest]
    fn timeout_error_names_address_and_limit() {
        let err = DirectoryStoreError::timeout("cache:6379", 500_u64);
        assert_eq!(
            err.to_string(),
            "connecting to directory store at cache:6379 timed out after 500 ms"
        );
    }
}
