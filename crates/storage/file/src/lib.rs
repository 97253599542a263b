//! The `file` crate is responsible for the implementation of interaction between the engine and stable storage.
//! Its main logic centers around reading/writing fixed-size data pages and allocating/releasing page identities.

pub mod api;

pub mod errors;

pub mod file_catalog;

/// The actual disk based file manager
pub mod disk_file_manager;

/// A heap backed file manager for tests and ephemeral engines
pub mod in_memory_file_manager;
