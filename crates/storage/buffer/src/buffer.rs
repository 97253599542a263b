//! Provides the implementation for the buffer pool manager leveraged by the engine

use crate::clock::{Candidate, ClockSweep};
use crate::errors::{BufferError, BufferResult};
use crate::frame::{FrameDescriptor, FrameId, FrameSnapshot};
use crate::guards::{PageReadGuard, PageWriteGuard};
use file::api::FileManager;
use page::page::Page;
use page::page_id::{FileId, PageId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Proof of one outstanding pin on a cached page.
///
/// A handle is plain data, not a RAII guard: the client that obtained it
/// owes the pool exactly one `unpin_page` call for the pin it represents.
/// While the pin is outstanding the frame cannot be evicted, so the handle
/// stays usable with `BufferPool::page` / `BufferPool::page_mut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle {
    frame_id: FrameId,
    page_id: PageId,
}

impl PageHandle {
    /// Identity of the pinned page.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }
}

/// The coherent unit of shared bookkeeping. Descriptor table, page directory
/// and clock hand always mutate together, so they live under one lock.
#[derive(Debug)]
struct PoolState {
    /// One descriptor per frame, index-aligned with `BufferPool::frames`.
    descriptors: Vec<FrameDescriptor>,
    /// Maps each cached page to its frame. Entries exist exactly for frames
    /// whose descriptor is valid.
    directory: HashMap<PageId, FrameId>,
    /// The replacement engine; the clock hand is owned by it alone.
    clock: ClockSweep,
}

/// The buffer pool manager: cached, pin-counted access to disk pages.
///
/// All page traffic between the engine and a `FileManager` goes through
/// here. A bounded number of page-sized frames cache the hottest pages;
/// when the pool is full, a second-chance clock sweep picks the frame to
/// evict, writing it back through its owning file first if it is dirty.
/// A frame with outstanding pins is never evicted.
///
/// The bookkeeping lives under one coarse mutex and is held across
/// collaborator I/O; the frame byte buffers sit outside it behind per-frame
/// `RwLock`s, so clients holding pins can read and write page bytes without
/// contending on the pool state.
#[derive(Debug)]
pub struct BufferPool<F: FileManager> {
    file_manager: Arc<F>,
    frames: Vec<RwLock<Page>>,
    state: Mutex<PoolState>,
}

impl<F: FileManager> BufferPool<F> {
    /// Creates a pool of `pool_size` empty frames in front of `file_manager`.
    pub fn new(file_manager: Arc<F>, pool_size: usize) -> Self {
        let mut frames = Vec::with_capacity(pool_size);
        let mut descriptors = Vec::with_capacity(pool_size);
        for frame_id in 0..pool_size {
            frames.push(RwLock::new(Page::new_zeroed()));
            descriptors.push(FrameDescriptor::new(frame_id));
        }
        Self {
            file_manager,
            frames,
            state: Mutex::new(PoolState {
                descriptors,
                directory: HashMap::new(),
                clock: ClockSweep::new(pool_size),
            }),
        }
    }

    /// Number of frames in the pool.
    pub fn pool_size(&self) -> usize {
        self.frames.len()
    }

    /// Pins the page identified by `page_id` and returns a handle to its
    /// frame, reading the page in through the file collaborator on a miss.
    ///
    /// A miss may evict another page (including a dirty write-back). If the
    /// collaborator read fails, the claimed frame is left invalid and no
    /// directory entry is created. `BufferError::BufferExhausted` means
    /// every frame is pinned; retrying after pins are released is up to the
    /// caller.
    pub fn read_page(&self, page_id: PageId) -> BufferResult<PageHandle> {
        let mut state = self.lock_state();

        // Hit: bump the pin and re-arm the second-chance bit.
        if let Some(&frame_id) = state.directory.get(&page_id) {
            let descriptor = &mut state.descriptors[frame_id];
            descriptor.pin_count += 1;
            descriptor.referenced = true;
            return Ok(PageHandle { frame_id, page_id });
        }

        // Miss: claim a frame and read through the collaborator.
        let frame_id = self.take_frame(&mut state)?;
        {
            let mut page = self.frame_mut(frame_id);
            self.file_manager.read_page(page_id, page.data_mut())?;
        }
        state.descriptors[frame_id].assign(page_id);
        state.directory.insert(page_id, frame_id);
        tracing::debug!(%page_id, frame_id, "page read into frame");
        Ok(PageHandle { frame_id, page_id })
    }

    /// Releases one pin on the page, optionally marking it dirty.
    ///
    /// The dirty flag is sticky: unpinning with `mark_dirty = false` never
    /// clears a flag set earlier, only a successful write-back does. No I/O
    /// happens here.
    pub fn unpin_page(&self, page_id: PageId, mark_dirty: bool) -> BufferResult<()> {
        let mut state = self.lock_state();
        let Some(&frame_id) = state.directory.get(&page_id) else {
            return Err(BufferError::PageNotFound(page_id));
        };
        let descriptor = &mut state.descriptors[frame_id];
        if descriptor.pin_count == 0 {
            return Err(BufferError::PageNotPinned(page_id));
        }
        descriptor.pin_count -= 1;
        if mark_dirty {
            descriptor.dirty = true;
        }
        Ok(())
    }

    /// Reserves a fresh page in `file_id` on stable storage and returns it
    /// cached, zero-filled, pinned once and already marked dirty (a fresh
    /// page is considered modified until written out).
    ///
    /// If no frame can be claimed, the page allocated on stable storage is
    /// not reclaimed; the caller sees the error and decides whether to retry
    /// or compensate.
    pub fn allocate_page(&self, file_id: FileId) -> BufferResult<PageHandle> {
        let mut state = self.lock_state();
        let page_id = self.file_manager.allocate_page(file_id)?;
        let frame_id = self.take_frame(&mut state)?;
        self.frame_mut(frame_id).zero();
        let descriptor = &mut state.descriptors[frame_id];
        descriptor.assign(page_id);
        descriptor.dirty = true;
        state.directory.insert(page_id, frame_id);
        tracing::debug!(%page_id, frame_id, "fresh page allocated into frame");
        Ok(PageHandle { frame_id, page_id })
    }

    /// Drops the page from the cache (if present) and releases its identity
    /// through the file collaborator.
    ///
    /// A pinned page is refused with `BufferError::PagePinned` and nothing
    /// is touched. A collaborator failure after the cache-side removal is
    /// surfaced, not rolled back.
    pub fn dispose_page(&self, page_id: PageId) -> BufferResult<()> {
        let mut state = self.lock_state();
        if let Some(&frame_id) = state.directory.get(&page_id) {
            if state.descriptors[frame_id].pin_count > 0 {
                return Err(BufferError::PagePinned(page_id));
            }
            state.descriptors[frame_id].reset();
            state.directory.remove(&page_id);
            tracing::debug!(%page_id, frame_id, "cached page disposed");
        }
        self.file_manager.dispose_page(page_id)?;
        Ok(())
    }

    /// Writes back and evicts every cached page belonging to `file_id`.
    ///
    /// Encountering a pinned page of the file aborts the whole operation
    /// with `BufferError::PagePinned`; pages of the file processed before
    /// that point stay flushed and evicted, later ones are untouched.
    /// Re-running after pins are released is the recovery path. A frame
    /// recorded for the file but not marked valid means the bookkeeping is
    /// inconsistent and is reported as `BufferError::BadBufferState`.
    pub fn flush_file(&self, file_id: FileId) -> BufferResult<()> {
        let mut state = self.lock_state();
        for frame_id in 0..state.descriptors.len() {
            let (page_id, valid, pinned, dirty) = {
                let descriptor = &state.descriptors[frame_id];
                match descriptor.page_id {
                    Some(page_id) if page_id.file_id == file_id => (
                        page_id,
                        descriptor.valid,
                        descriptor.pin_count > 0,
                        descriptor.dirty,
                    ),
                    _ => continue,
                }
            };

            if !valid {
                return Err(BufferError::BadBufferState(file_id));
            }
            if pinned {
                return Err(BufferError::PagePinned(page_id));
            }
            if dirty {
                let page = self.frame(frame_id);
                self.file_manager.write_page(page_id, page.data())?;
                tracing::debug!(%page_id, frame_id, "dirty page written back by flush");
            }
            state.descriptors[frame_id].reset();
            state.directory.remove(&page_id);
        }
        Ok(())
    }

    /// Writes back every dirty valid frame, ignoring pin counts.
    ///
    /// Teardown path: frames stay cached and pinned pages stay pinned, only
    /// the dirty flags are cleared. `Drop` runs this best-effort.
    pub fn flush_all(&self) -> BufferResult<()> {
        let mut state = self.lock_state();
        for frame_id in 0..state.descriptors.len() {
            let page_id = {
                let descriptor = &state.descriptors[frame_id];
                match descriptor.page_id {
                    Some(page_id) if descriptor.valid && descriptor.dirty => page_id,
                    _ => continue,
                }
            };
            let page = self.frame(frame_id);
            self.file_manager.write_page(page_id, page.data())?;
            drop(page);
            state.descriptors[frame_id].dirty = false;
        }
        Ok(())
    }

    /// Latches the pinned frame's bytes for reading.
    pub fn page(&self, handle: &PageHandle) -> PageReadGuard<'_> {
        PageReadGuard {
            guard: self.frame(handle.frame_id),
        }
    }

    /// Latches the pinned frame's bytes for writing.
    ///
    /// Mutating the bytes does not mark the frame dirty; pass `mark_dirty`
    /// to `unpin_page` once done.
    pub fn page_mut(&self, handle: &PageHandle) -> PageWriteGuard<'_> {
        PageWriteGuard {
            guard: self.frame_mut(handle.frame_id),
        }
    }

    /// Point-in-time copy of every frame's occupancy and pin state.
    /// Operational inspection only, not part of the functional contract.
    pub fn dump(&self) -> Vec<FrameSnapshot> {
        let state = self.lock_state();
        state
            .descriptors
            .iter()
            .map(FrameDescriptor::snapshot)
            .collect()
    }

    /// Claims a usable frame through the clock sweep, writing a dirty victim
    /// back through its owning file first. On success the returned frame is
    /// invalid and absent from the directory.
    ///
    /// A failed victim write-back aborts the claim: the victim keeps its
    /// contents, stays cached and stays dirty.
    fn take_frame(&self, state: &mut PoolState) -> BufferResult<FrameId> {
        let candidate = state
            .clock
            .find_frame(&mut state.descriptors)
            .ok_or(BufferError::BufferExhausted)?;

        let frame_id = match candidate {
            Candidate::Free(frame_id) => frame_id,
            Candidate::Victim(frame_id) => {
                let page_id = state.descriptors[frame_id]
                    .page_id
                    .expect("valid victim frame must cache a page");
                if state.descriptors[frame_id].dirty {
                    let page = self.frame(frame_id);
                    self.file_manager.write_page(page_id, page.data())?;
                }
                state.directory.remove(&page_id);
                state.descriptors[frame_id].reset();
                tracing::debug!(%page_id, frame_id, "page evicted");
                frame_id
            }
        };
        Ok(frame_id)
    }

    fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        self.state
            .lock()
            .expect("buffer pool state poisoned: another thread panicked while holding the lock")
    }

    fn frame(&self, frame_id: FrameId) -> RwLockReadGuard<'_, Page> {
        self.frames[frame_id]
            .read()
            .expect("frame latch poisoned: another thread panicked while holding it")
    }

    fn frame_mut(&self, frame_id: FrameId) -> RwLockWriteGuard<'_, Page> {
        self.frames[frame_id]
            .write()
            .expect("frame latch poisoned: another thread panicked while holding it")
    }
}

impl<F: FileManager> Drop for BufferPool<F> {
    fn drop(&mut self) {
        // No caller is left to propagate a failure to; log and move on.
        if let Err(error) = self.flush_all() {
            tracing::error!(%error, "write-back during buffer pool teardown failed");
        }
    }
}

// ------------------------------------------------------------------------------------------------
