use std::fmt;

/// A simple type to define the unique FileId, which is at its core just a u32
pub type FileId = u32;

/// A unique identifier for any page.
///
/// Pages are addressed by the file they belong to plus their page number
/// within that file. The pair is `Copy`, comparable and hashable, which is
/// what allows it to serve as the page directory key in the buffer crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId {
    /// Unique identifier of the file containing the page.
    pub file_id: FileId,

    /// The specific page number within the file.
    pub page_number: u32,
}

impl PageId {
    /// Creates a new `PageId` instance with the given file ID and page number.
    pub fn new(file_id: FileId, page_number: u32) -> Self {
        Self {
            file_id,
            page_number,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_id, self.page_number)
    }
}
