use crate::PAGE_SIZE;

/// A page-sized, heap-allocated byte buffer.
///
/// A `Page` is pure storage: it carries no metadata and no interpretation of
/// its bytes. The buffer crate owns one `Page` per frame and lends its bytes
/// out through guards; the file crate fills it from and persists it to
/// stable storage.
#[derive(Debug)]
pub struct Page {
    data: Box<[u8; PAGE_SIZE]>,
}

impl Page {
    /// Creates a zero-filled page buffer.
    pub fn new_zeroed() -> Self {
        Self {
            data: Box::new([0; PAGE_SIZE]),
        }
    }

    /// Immutable view of the raw page bytes.
    pub fn data(&self) -> &[u8] {
        &self.data[..]
    }

    /// Mutable view of the raw page bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data[..]
    }

    /// Overwrites the whole buffer with zeroes.
    pub fn zero(&mut self) {
        self.data.fill(0);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new_zeroed()
    }
}
