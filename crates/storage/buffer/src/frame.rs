use page::page_id::PageId;

/// The ID of a frame is basically just its index in the pool's vectors
pub type FrameId = usize;

/// Per-frame bookkeeping, index-aligned with the frame it describes.
///
/// A descriptor tracks which page (if any) its frame currently caches plus
/// the lifecycle state the pool needs: the pin count keeping the frame
/// resident, the sticky dirty flag cleared only by a successful write-back,
/// and the reference bit granting the frame its second chance during a clock
/// sweep. `page_id` is only meaningful while `valid` is true.
///
/// Descriptors are never handed out to clients; the buffer manager mutates
/// them in place through their index, under its state lock.
#[derive(Debug)]
pub(crate) struct FrameDescriptor {
    /// Index of the described frame. Immutable for the descriptor's lifetime.
    pub(crate) frame_id: FrameId,

    /// Identity of the cached page, `None` while the frame is invalid.
    pub(crate) page_id: Option<PageId>,

    /// Number of outstanding clients holding this frame. A frame with a
    /// non-zero pin count must never be selected for eviction.
    pub(crate) pin_count: u32,

    /// The frame's contents differ from what is on stable storage.
    pub(crate) dirty: bool,

    /// Second-chance bit, set on every (re-)acquisition of the page.
    pub(crate) referenced: bool,

    /// The frame caches a real page right now.
    pub(crate) valid: bool,
}

impl FrameDescriptor {
    pub(crate) fn new(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            page_id: None,
            pin_count: 0,
            dirty: false,
            referenced: false,
            valid: false,
        }
    }

    /// Marks the frame as caching `page_id`, pinned once by the caller that
    /// loaded it and clean until proven otherwise.
    pub(crate) fn assign(&mut self, page_id: PageId) {
        self.page_id = Some(page_id);
        self.pin_count = 1;
        self.dirty = false;
        self.referenced = true;
        self.valid = true;
    }

    /// Returns the frame to the invalid state.
    pub(crate) fn reset(&mut self) {
        self.page_id = None;
        self.pin_count = 0;
        self.dirty = false;
        self.referenced = false;
        self.valid = false;
    }

    pub(crate) fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame_id: self.frame_id,
            page_id: self.page_id,
            pin_count: self.pin_count,
            dirty: self.dirty,
            referenced: self.referenced,
            valid: self.valid,
        }
    }
}

/// A point-in-time copy of one frame's bookkeeping.
///
/// Produced by `BufferPool::dump` for operational inspection; not part of
/// the functional contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    /// Index of the frame in the pool.
    pub frame_id: FrameId,
    /// Identity of the cached page, if any.
    pub page_id: Option<PageId>,
    /// Outstanding pins on the frame.
    pub pin_count: u32,
    /// Whether the frame's contents are newer than stable storage.
    pub dirty: bool,
    /// Whether the frame currently holds its second-chance bit.
    pub referenced: bool,
    /// Whether the frame caches a real page.
    pub valid: bool,
}
