use file::errors::FileError;
use page::page_id::{FileId, PageId};
use thiserror::Error;

/// Public facing error type returned by the buffer pool.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Two full clock passes found no evictable frame: every frame is
    /// pinned. Waiting for pins to drop and retrying is the caller's call.
    #[error("buffer exhausted: every frame is pinned")]
    BufferExhausted,

    /// The page is not present in the buffer pool.
    #[error("page {0} is not cached")]
    PageNotFound(PageId),

    /// Unpin was called on a page whose pin count is already zero.
    #[error("page {0} is cached but not pinned")]
    PageNotPinned(PageId),

    /// The operation requires the page to be unpinned first.
    #[error("page {0} is pinned")]
    PagePinned(PageId),

    /// Frame and directory bookkeeping for the file disagree. Internal
    /// invariant violation, not an ordinary failure.
    #[error("inconsistent buffer bookkeeping for file {0}")]
    BadBufferState(FileId),

    /// A file collaborator failure, propagated verbatim.
    #[error(transparent)]
    File(#[from] FileError),
}

/// Public facing result type of buffer pool operations.
pub type BufferResult<T> = Result<T, BufferError>;
