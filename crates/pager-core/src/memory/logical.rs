use crate::error::{Error, Result};
use rand::RngCore;

/// The contents of a simulated process.
///
/// Logical memory is filled with pseudo-random bytes once at construction and
/// is read-only afterwards. It is split into pages of `page_size` bytes; the
/// last page is shorter when the size is not a multiple of the page size.
#[derive(Clone, Debug)]
pub struct LogicalMemory {
    data: Box<[u8]>,
    page_size: usize,
}

impl LogicalMemory {
    /// Creates logical memory of `process_length` bytes filled from the thread RNG.
    ///
    /// # Errors
    ///
    /// See [`LogicalMemory::with_rng`].
    pub fn new(process_length: usize, page_size: usize) -> Result<Self> {
        Self::with_rng(process_length, page_size, &mut rand::rng())
    }

    /// Creates logical memory of `process_length` bytes filled from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if `process_length` is zero, or
    /// [`Error::InvalidConfiguration`] if `page_size` is zero.
    pub fn with_rng(
        process_length: usize,
        page_size: usize,
        rng: &mut impl RngCore,
    ) -> Result<Self> {
        if process_length == 0 {
            return Err(Error::InvalidSize {
                size: process_length,
                reason: "process length must be positive",
            });
        }
        if page_size == 0 {
            return Err(Error::InvalidConfiguration(
                "page size must be positive".into(),
            ));
        }
        let mut data = vec![0u8; process_length].into_boxed_slice();
        rng.fill_bytes(&mut data);
        Ok(LogicalMemory { data, page_size })
    }

    /// Returns the size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the page size in bytes.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of pages needed to hold every byte.
    pub fn number_of_pages(&self) -> usize {
        self.data.len().div_ceil(self.page_size)
    }

    /// Returns a copy of the bytes of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPage`] if `page` is out of range.
    pub fn read_page(&self, page: usize) -> Result<Vec<u8>> {
        let page_count = self.number_of_pages();
        if page >= page_count {
            return Err(Error::InvalidPage { page, page_count });
        }
        let start = page * self.page_size;
        let end = (start + self.page_size).min(self.data.len());
        Ok(self.data[start..end].to_vec())
    }
}
