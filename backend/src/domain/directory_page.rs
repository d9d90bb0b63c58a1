//! View models for the two directory pages.
//!
//! Both pages list users in ascending username order regardless of how the
//! store returned them.

use serde::Serialize;

use crate::domain::UserDirectory;

/// Which page the server renders at `/`.
///
/// Chosen once at startup; every request is served with the same view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Usernames only. Used in production.
    Summary,
    /// Usernames with display names and plaintext passwords. Used in
    /// development.
    Detail,
}

impl ViewMode {
    /// Map the production flag onto a view.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::ViewMode;
    ///
    /// assert_eq!(ViewMode::from_production_flag(true), ViewMode::Summary);
    /// assert_eq!(ViewMode::from_production_flag(false), ViewMode::Detail);
    /// ```
    pub fn from_production_flag(is_production: bool) -> Self {
        if is_production {
            Self::Summary
        } else {
            Self::Detail
        }
    }
}

/// Sorted usernames for the summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPage {
    usernames: Vec<String>,
}

impl SummaryPage {
    /// Build the page, sorting `usernames` lexicographically.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::SummaryPage;
    ///
    /// let page = SummaryPage::from_usernames(vec!["mdelio".into(), "anaim".into()]);
    /// assert_eq!(page.usernames(), ["anaim", "mdelio"]);
    /// ```
    pub fn from_usernames(mut usernames: Vec<String>) -> Self {
        usernames.sort();
        Self { usernames }
    }

    /// Usernames in display order.
    pub fn usernames(&self) -> &[String] {
        &self.usernames
    }
}

/// One table row of the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// Directory key.
    pub username: String,
    /// Display name from the user's record.
    pub name: String,
    /// Plaintext password from the user's record.
    pub password: String,
}

/// Full records for the detail page, ordered by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPage {
    rows: Vec<DetailRow>,
}

impl DetailPage {
    /// Build the page from an unordered directory.
    pub fn from_directory(directory: UserDirectory) -> Self {
        let mut rows: Vec<DetailRow> = directory
            .into_iter()
            .map(|(username, record)| DetailRow {
                username,
                name: record.name().to_owned(),
                password: record.password().to_owned(),
            })
            .collect();
        rows.sort_by(|left, right| left.username.cmp(&right.username));
        Self { rows }
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }
}
