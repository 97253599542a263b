//! # bufkit
//!
//! This is the main crate for the **bufkit** storage engine core.
//!
//! The engine is composed of multiple internal components organized under
//! the `/crates` directory of this workspace:
//!
//! - `/storage/page`: Page identity types and raw page buffers.
//! - `/storage/file`: File collaborators performing raw page I/O and page (de)allocation.
//! - `/storage/buffer`: The buffer pool manager caching pages with clock eviction.
