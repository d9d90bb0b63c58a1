//! Built-in demo directory.

use crate::domain::{UserDirectory, UserRecord};

/// The two users seeded when no seed file is configured.
pub fn demo_directory() -> UserDirectory {
    UserDirectory::from([
        (
            "anaim".to_owned(),
            UserRecord::new("Allan", "my-super-secret-password"),
        ),
        (
            "mdelio".to_owned(),
            UserRecord::new("Matthew", "my-password"),
        ),
    ])
}
