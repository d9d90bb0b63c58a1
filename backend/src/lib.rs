//! User directory demo service.
//!
//! Seeds a small user directory into Redis and serves it at `/` as an HTML
//! table, either usernames only (production) or full records including
//! plaintext passwords (development).

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seeding;
pub mod settings;

pub use middleware::Trace;
