use page::page_id::{FileId, PageId};
use thiserror::Error;

/// Public facing error type returned by the file collaborators.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file ID has no registered backing storage.
    #[error("file {0} is not registered in the catalog")]
    UnknownFile(FileId),

    /// The page number is not backed by its file (never allocated, past the
    /// end, or already disposed).
    #[error("page {0} does not exist in its file")]
    NoSuchPage(PageId),

    /// The backing storage failed the operation.
    #[error("i/o failure on file {file_id}")]
    Io {
        /// The file on which the failure occurred
        file_id: FileId,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Public facing result type of file operations.
pub type FileResult<T> = Result<T, FileError>;
