//! Buffer management module for storage system.
//!
//! The pool caches a bounded set of disk pages in page-sized frames, evicts
//! with a second-chance clock sweep, and guarantees that a pinned page is
//! never evicted.

pub mod buffer;
mod clock;
pub mod errors;
pub mod frame;

/// Exposes `guard`-like structs that will provide the access to the `Page` instances
/// from the buffer via `&Page`
pub mod guards;
