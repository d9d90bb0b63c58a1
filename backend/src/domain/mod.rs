//! Domain primitives and ports.
//!
//! Purpose: Define the user directory model, the page view models built from
//! it, and the port adapters implement to store it. Nothing in here knows
//! about Redis or HTTP.
//!
//! Public surface:
//! - UserRecord / UserDirectory — stored user attributes keyed by username.
//! - SummaryPage / DetailPage / ViewMode — sorted page models and the view
//!   selector.
//! - ports — the `DirectoryStore` port, its error type, and an in-memory
//!   implementation.

pub mod directory_page;
pub mod ports;
pub mod user;

pub use self::directory_page::{DetailPage, DetailRow, SummaryPage, ViewMode};
pub use self::user::{UserDirectory, UserRecord};
