use crate::api::FileManager;
use crate::errors::{FileError, FileResult};
use page::PAGE_SIZE;
use page::page_id::{FileId, PageId};
use std::collections::HashMap;
use std::sync::Mutex;

/// A file manager keeping every page on the heap.
///
/// Used by tests and ephemeral engines. Allocation and disposal follow the
/// same contract as the disk manager: page numbers grow sequentially per
/// file and released numbers are recycled before new ones are handed out.
#[derive(Debug, Default)]
pub struct InMemoryFileManager {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<PageId, Box<[u8]>>,
    next_page_number: HashMap<FileId, u32>,
    free_pages: HashMap<FileId, Vec<u32>>,
}

impl InMemoryFileManager {
    /// Creates an empty in-memory file manager.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .expect("InMemoryFileManager poisoned: another thread panicked while holding the lock")
    }
}

impl FileManager for InMemoryFileManager {
    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> FileResult<()> {
        let inner = self.lock();
        match inner.pages.get(&page_id) {
            Some(page) => {
                destination.copy_from_slice(page);
                Ok(())
            }
            None => Err(FileError::NoSuchPage(page_id)),
        }
    }

    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> FileResult<()> {
        let mut inner = self.lock();
        inner
            .pages
            .insert(page_id, page_data.to_vec().into_boxed_slice());

        // Writing past the current end implicitly extends the file, the way
        // a positional write extends an OS file.
        let next = inner.next_page_number.entry(page_id.file_id).or_default();
        if *next <= page_id.page_number {
            *next = page_id.page_number + 1;
        }
        Ok(())
    }

    fn allocate_page(&self, file_id: FileId) -> FileResult<PageId> {
        let mut inner = self.lock();

        let recycled = inner.free_pages.get_mut(&file_id).and_then(Vec::pop);
        let page_number = match recycled {
            Some(recycled) => recycled,
            None => {
                let next = inner.next_page_number.entry(file_id).or_default();
                let fresh = *next;
                *next += 1;
                fresh
            }
        };

        let page_id = PageId::new(file_id, page_number);
        inner
            .pages
            .insert(page_id, vec![0; PAGE_SIZE].into_boxed_slice());
        Ok(page_id)
    }

    fn dispose_page(&self, page_id: PageId) -> FileResult<()> {
        let mut inner = self.lock();
        if inner.pages.remove(&page_id).is_none() {
            return Err(FileError::NoSuchPage(page_id));
        }
        inner
            .free_pages
            .entry(page_id.file_id)
            .or_default()
            .push(page_id.page_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_page_is_zeroed_and_numbered_sequentially() {
        // Arrange
        let manager = InMemoryFileManager::new();

        // Act
        let first = manager.allocate_page(1).unwrap();
        let second = manager.allocate_page(1).unwrap();

        // Assert
        assert_eq!(first, PageId::new(1, 0));
        assert_eq!(second, PageId::new(1, 1));
        let mut readback = [9u8; PAGE_SIZE];
        manager.read_page(first, &mut readback).unwrap();
        assert!(readback.iter().all(|b| *b == 0));
    }

    #[test]
    fn files_number_their_pages_independently() {
        // Arrange
        let manager = InMemoryFileManager::new();

        // Act
        let in_file_1 = manager.allocate_page(1).unwrap();
        let in_file_2 = manager.allocate_page(2).unwrap();

        // Assert
        assert_eq!(in_file_1, PageId::new(1, 0));
        assert_eq!(in_file_2, PageId::new(2, 0));
    }

    #[test]
    fn written_page_reads_back_identically() {
        // Arrange
        let manager = InMemoryFileManager::new();
        let page_id = manager.allocate_page(1).unwrap();
        let mut contents = [0u8; PAGE_SIZE];
        contents[17] = 99;

        // Act
        manager.write_page(page_id, &contents).unwrap();
        let mut readback = [0u8; PAGE_SIZE];
        manager.read_page(page_id, &mut readback).unwrap();

        // Assert
        assert_eq!(readback, contents);
    }

    #[test]
    fn reading_a_missing_page_reports_no_such_page() {
        // Arrange
        let manager = InMemoryFileManager::new();

        // Act
        let mut readback = [0u8; PAGE_SIZE];
        let result = manager.read_page(PageId::new(1, 3), &mut readback);

        // Assert
        assert!(matches!(result, Err(FileError::NoSuchPage(_))));
    }

    #[test]
    fn disposed_page_is_gone_and_its_number_recycled() {
        // Arrange
        let manager = InMemoryFileManager::new();
        let page_id = manager.allocate_page(1).unwrap();

        // Act
        manager.dispose_page(page_id).unwrap();

        // Assert
        let mut readback = [0u8; PAGE_SIZE];
        assert!(matches!(
            manager.read_page(page_id, &mut readback),
            Err(FileError::NoSuchPage(_))
        ));
        assert_eq!(manager.allocate_page(1).unwrap(), page_id);
    }

    #[test]
    fn write_past_the_end_extends_the_file() {
        // Arrange
        let manager = InMemoryFileManager::new();
        manager.write_page(PageId::new(1, 4), &[1u8; PAGE_SIZE]).unwrap();

        // Act
        let next = manager.allocate_page(1).unwrap();

        // Assert
        assert_eq!(next, PageId::new(1, 5));
    }
}
