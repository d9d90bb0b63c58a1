//! Startup wiring for directory seeding.

mod fixture;
mod startup;

pub use fixture::demo_directory;
pub use startup::{SeedOutcome, SeedSettings, StartupSeedingError, seed_directory_on_startup};
