//! This crate provides the page identity types and the raw page buffer shared
//! by the storage crates.

/// Fixed-size in-memory page buffer.
pub mod page;

/// Unique identifier for pages.
pub mod page_id;

/// Fixed size of a page in bytes
pub const PAGE_SIZE: usize = 4096;
