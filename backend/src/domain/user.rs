//! User directory data model.
//!
//! A directory maps usernames to [`UserRecord`] values. Usernames and record
//! fields are opaque strings: the store is the only thing that constrains
//! them, so no validation happens here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attributes stored for a single user.
///
/// The password is kept and displayed in plaintext; this is a demonstration
/// directory, not an identity provider.
///
/// # Examples
/// ```
/// use user_directory::domain::UserRecord;
///
/// let record = UserRecord::new("Allan", "my-super-secret-password");
/// assert_eq!(record.name(), "Allan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    name: String,
    password: String,
}

impl UserRecord {
    /// Build a record from its display name and password.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }

    /// Human readable display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Full directory keyed by username.
///
/// Iteration order is unspecified; callers that display or persist entries
/// in a stable order must sort the keys themselves.
pub type UserDirectory = HashMap<String, UserRecord>;

#[cfg(test)]
mod tests {
    //! Serialisation contract for seed files.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn record_deserialises_from_seed_json() {
        let record: UserRecord =
            serde_json::from_str(r#"{"name":"Matthew","password":"my-password"}"#)
                .expect("valid record json");
        assert_eq!(record, UserRecord::new("Matthew", "my-password"));
    }

    #[rstest]
    fn record_rejects_missing_password() {
        let result = serde_json::from_str::<UserRecord>(r#"{"name":"Matthew"}"#);
        assert!(result.is_err());
    }
}
