//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod directory_store;

#[cfg(test)]
pub use directory_store::MockDirectoryStore;
pub use directory_store::{
    DirectoryStore, DirectoryStoreError, InMemoryDirectoryStore, seed_order,
};
