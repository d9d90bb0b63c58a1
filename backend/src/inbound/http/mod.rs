//! HTTP inbound adapter serving the directory page.

pub mod directory;
pub mod error;
pub mod state;
pub mod templates;

pub use error::{PageError, PageResult};
