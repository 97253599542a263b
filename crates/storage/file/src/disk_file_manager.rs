use crate::api::FileManager;
use crate::errors::{FileError, FileResult};
use crate::file_catalog::FileCatalog;
use page::PAGE_SIZE;
use page::page_id::{FileId, PageId};
use std::collections::HashMap;
use std::fs;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

#[cfg(unix)]
use std::os::unix::fs::FileExt;
#[cfg(windows)]
use std::os::windows::fs::FileExt;

/// A disk based file manager
///
/// One OS file per `FileId`, resolved through the `FileCatalog`. Pages are
/// stored back to back at `page_number * PAGE_SIZE`. Released page numbers
/// are remembered in an in-memory free list and handed out again by
/// `allocate_page` before the file is grown; the free list is not persisted,
/// which is fine for a single-process engine (disposed pages are simply not
/// reused after a restart).
#[derive(Debug)]
pub struct DiskFileManager {
    files: RwLock<HashMap<FileId, Arc<File>>>,
    free_pages: Mutex<HashMap<FileId, Vec<u32>>>,
    file_catalog: Arc<FileCatalog>,
}

impl DiskFileManager {
    /// Creates a disk file manager resolving file IDs through `file_catalog`.
    pub fn new(file_catalog: Arc<FileCatalog>) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            free_pages: Mutex::new(HashMap::new()),
            file_catalog,
        }
    }
}

impl FileManager for DiskFileManager {
    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> FileResult<()> {
        let file = self.get_or_open_file(page_id.file_id)?;
        let offset = page_offset(page_id);

        let mut read = 0;
        while read < PAGE_SIZE {
            let n = Self::read_at(file.as_ref(), &mut destination[read..], offset + read as u64)
                .map_err(|source| FileError::Io {
                    file_id: page_id.file_id,
                    source,
                })?;

            if n == 0 {
                // Hit end of file before a full page: the page was never
                // allocated in this file.
                return Err(FileError::NoSuchPage(page_id));
            }

            read += n;
        }

        Ok(())
    }

    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> FileResult<()> {
        let file = self.get_or_open_file(page_id.file_id)?;
        let offset = page_offset(page_id);

        let mut written = 0;
        while written < PAGE_SIZE {
            let n = Self::write_at(
                file.as_ref(),
                &page_data[written..],
                offset + written as u64,
            )
            .map_err(|source| FileError::Io {
                file_id: page_id.file_id,
                source,
            })?;

            if n == 0 {
                return Err(FileError::Io {
                    file_id: page_id.file_id,
                    source: std::io::Error::new(
                        std::io::ErrorKind::WriteZero,
                        "disk write made no progress",
                    ),
                });
            }

            written += n;
        }

        Ok(())
    }

    fn allocate_page(&self, file_id: FileId) -> FileResult<PageId> {
        let file = self.get_or_open_file(file_id)?;

        let recycled = {
            let mut free_pages = self
                .free_pages
                .lock()
                .expect("free list poisoned: another thread panicked while holding the lock");
            free_pages.get_mut(&file_id).and_then(Vec::pop)
        };

        let page_number = match recycled {
            Some(page_number) => page_number,
            None => {
                let len = file
                    .metadata()
                    .map_err(|source| FileError::Io { file_id, source })?
                    .len();
                (len as usize / PAGE_SIZE) as u32
            }
        };

        // Zero the page on storage so it reads back as a fresh page whether
        // the number was recycled or the file just grew.
        let page_id = PageId::new(file_id, page_number);
        self.write_page(page_id, &[0; PAGE_SIZE])?;
        Ok(page_id)
    }

    fn dispose_page(&self, page_id: PageId) -> FileResult<()> {
        let file = self.get_or_open_file(page_id.file_id)?;
        let len = file
            .metadata()
            .map_err(|source| FileError::Io {
                file_id: page_id.file_id,
                source,
            })?
            .len();

        let mut free_pages = self
            .free_pages
            .lock()
            .expect("free list poisoned: another thread panicked while holding the lock");
        let file_free_pages = free_pages.entry(page_id.file_id).or_default();

        let past_end = page_offset(page_id) >= len;
        if past_end || file_free_pages.contains(&page_id.page_number) {
            return Err(FileError::NoSuchPage(page_id));
        }

        file_free_pages.push(page_id.page_number);
        Ok(())
    }
}

fn page_offset(page_id: PageId) -> u64 {
    (page_id.page_number as usize * PAGE_SIZE) as u64
}

impl DiskFileManager {
    fn get_or_open_file(&self, file_id: FileId) -> FileResult<Arc<File>> {
        // 1. Fast path — read lock
        {
            let files = self
                .files
                .read()
                .expect("file table poisoned: another thread panicked while holding the lock");
            if let Some(file) = files.get(&file_id) {
                return Ok(Arc::clone(file));
            }
        }

        // 2. Slow path — write lock
        let mut files = self
            .files
            .write()
            .expect("file table poisoned: another thread panicked while holding the lock");

        // 3. Double-check
        if let Some(file) = files.get(&file_id) {
            return Ok(Arc::clone(file));
        }

        // 4. Actually open file
        let path = self
            .file_catalog
            .get_file_name(file_id)
            .ok_or(FileError::UnknownFile(file_id))?;

        Self::ensure_parent_dir(&path).map_err(|source| FileError::Io { file_id, source })?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| FileError::Io { file_id, source })?;

        let file = Arc::new(file);

        files.insert(file_id, Arc::clone(&file));

        Ok(file)
    }

    #[inline]
    fn read_at(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        #[cfg(unix)]
        {
            file.read_at(buf, offset)
        }

        #[cfg(windows)]
        {
            file.seek_read(buf, offset)
        }
    }

    #[inline]
    fn write_at(file: &File, buf: &[u8], offset: u64) -> std::io::Result<usize> {
        #[cfg(unix)]
        {
            file.write_at(buf, offset)
        }

        #[cfg(windows)]
        {
            file.seek_write(buf, offset)
        }
    }

    fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(())
    }
}
