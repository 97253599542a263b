//! The replacement engine: a second-chance (clock) sweep over the frame
//! descriptors.

use crate::frame::{FrameDescriptor, FrameId};

/// What a sweep found.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Candidate {
    /// An invalid frame, usable as-is with no write-back.
    Free(FrameId),
    /// A valid, unpinned, unreferenced frame. The caller must write it back
    /// if dirty and drop its directory entry before reusing it.
    Victim(FrameId),
}

/// The clock hand and its sweep.
///
/// The hand is owned here and mutated only through `find_frame`, which keeps
/// the bounded-sweep invariant local to this type. Every examination
/// advances the hand by one position, including the examination that selects
/// the returned frame.
#[derive(Debug)]
pub(crate) struct ClockSweep {
    hand: FrameId,
    pool_size: usize,
}

impl ClockSweep {
    pub(crate) fn new(pool_size: usize) -> Self {
        Self { hand: 0, pool_size }
    }

    /// Scans the descriptors in circular order for a usable frame.
    ///
    /// At most `2 * pool_size` frames are examined, so every frame gets at
    /// most one second chance. `None` means the sweep is exhausted: every
    /// frame is pinned.
    pub(crate) fn find_frame(
        &mut self,
        descriptors: &mut [FrameDescriptor],
    ) -> Option<Candidate> {
        debug_assert_eq!(descriptors.len(), self.pool_size);

        for _ in 0..2 * self.pool_size {
            let examined = self.hand;
            self.hand = (self.hand + 1) % self.pool_size;

            // Work on the authoritative descriptor through its index. A
            // snapshot copy here would lose the cleared reference bits and
            // the sweep could spin on the same frames forever.
            let descriptor = &mut descriptors[examined];

            if !descriptor.valid {
                return Some(Candidate::Free(examined));
            }

            if descriptor.referenced {
                // Second chance. The bit is cleared even on pinned frames.
                descriptor.referenced = false;
                continue;
            }

            if descriptor.pin_count > 0 {
                continue;
            }

            return Some(Candidate::Victim(examined));
        }

        None
    }
}
