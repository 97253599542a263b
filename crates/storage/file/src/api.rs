//! Public API for the `file` crate

use crate::errors::FileResult;
use page::page_id::{FileId, PageId};

/// File manager public API
///
/// A `FileManager` manages a collection of fixed-size pages addressed by
/// `PageId`, grouped into independently-addressed files. Implementations are
/// free to choose the backing storage layout; the trait itself documents
/// method-level expectations. All failures are reported through `FileError`
/// and are never swallowed by the callers in the buffer crate.
pub trait FileManager {
    /// Definition
    /// Read the page identified by `page_id` into `destination`.
    ///
    /// Params
    /// - `page_id`: Identifier of the page to read.
    /// - `destination`: Caller-provided buffer to receive the page bytes. The
    ///   buffer length must equal the storage page size.
    ///
    /// Return
    /// - `FileResult<()>`: `Ok` if the page existed and was copied into
    ///   `destination`; `FileError::NoSuchPage` if the page number is not
    ///   backed by the file, `FileError::Io` on a read failure.
    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> FileResult<()>;

    /// Definition
    /// Write the contents of `page_data` as the page for `page_id`.
    ///
    /// Params
    /// - `page_id`: Identifier of the page to write.
    /// - `page_data`: Byte slice containing exactly one page worth of data.
    ///   The length must equal the storage page size.
    ///
    /// Return
    /// - `FileResult<()>`: `Ok` once every byte is persisted; `FileError::Io`
    ///   if the backing storage rejected the write.
    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> FileResult<()>;

    /// Definition
    /// Reserve a fresh page identity in `file_id` on stable storage.
    ///
    /// Params
    /// - `file_id`: The file that should receive the new page.
    ///
    /// Return
    /// - `FileResult<PageId>`: the identity of the newly reserved page. The
    ///   page reads back as zeroes until written. Implementations may reuse
    ///   page numbers released through `dispose_page`.
    fn allocate_page(&self, file_id: FileId) -> FileResult<PageId>;

    /// Definition
    /// Release the page identity `page_id` back to its file's free space.
    ///
    /// Params
    /// - `page_id`: Identifier of the page to release.
    ///
    /// Return
    /// - `FileResult<()>`: `Ok` once the identity may be handed out again by
    ///   `allocate_page`; `FileError::NoSuchPage` if the page was never
    ///   allocated.
    fn dispose_page(&self, page_id: PageId) -> FileResult<()>;
}
