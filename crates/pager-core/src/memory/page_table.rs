use crate::error::{Error, Result};

/// Mapping from a process's page numbers to frame numbers.
///
/// The table has a fixed number of slots. Slots start unmapped and are filled
/// while the process is allocated. Remapping a slot overwrites the old frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTable {
    frames: Vec<Option<usize>>,
}

impl PageTable {
    /// Creates a table with `page_count` unmapped slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if `page_count` is zero.
    pub fn new(page_count: usize) -> Result<Self> {
        if page_count == 0 {
            return Err(Error::InvalidSize {
                size: page_count,
                reason: "page count must be positive",
            });
        }
        Ok(PageTable {
            frames: vec![None; page_count],
        })
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page >= self.frames.len() {
            return Err(Error::InvalidPage {
                page,
                page_count: self.frames.len(),
            });
        }
        Ok(())
    }

    /// Maps `page` to `frame`, replacing any previous mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPage`] if `page` is out of range.
    pub fn map_page_to_frame(&mut self, page: usize, frame: usize) -> Result<()> {
        self.check_page(page)?;
        self.frames[page] = Some(frame);
        Ok(())
    }

    /// Returns the frame `page` is mapped to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPage`] if `page` is out of range, or
    /// [`Error::UnmappedPage`] if it was never mapped.
    pub fn get_page_frame(&self, page: usize) -> Result<usize> {
        self.check_page(page)?;
        self.frames[page].ok_or(Error::UnmappedPage(page))
    }

    /// Returns the number of slots.
    pub fn size(&self) -> usize {
        self.frames.len()
    }

    /// Iterates over mapped `(page, frame)` pairs in page order.
    pub fn mappings(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(page, frame)| frame.map(|frame| (page, frame)))
    }
}

#[cfg(test)]
mod tests {
    use super::PageTable;
    use crate::Error;

    #[test]
    fn test_map_and_get() {
        let mut table = PageTable::new(3).unwrap();
        assert_eq!(table.size(), 3);
        table.map_page_to_frame(0, 7).unwrap();
        table.map_page_to_frame(2, 1).unwrap();
        assert_eq!(table.get_page_frame(0).unwrap(), 7);
        assert_eq!(table.get_page_frame(2).unwrap(), 1);
        assert_eq!(table.mappings().collect::<Vec<_>>(), vec![(0, 7), (2, 1)]);
    }

    #[test]
    fn test_unmapped_page() {
        let table = PageTable::new(2).unwrap();
        assert!(matches!(table.get_page_frame(1), Err(Error::UnmappedPage(1))));
    }

    #[test]
    fn test_remap_overwrites() {
        let mut table = PageTable::new(1).unwrap();
        table.map_page_to_frame(0, 3).unwrap();
        table.map_page_to_frame(0, 5).unwrap();
        assert_eq!(table.get_page_frame(0).unwrap(), 5);
    }

    #[test]
    fn test_invalid_page() {
        let mut table = PageTable::new(2).unwrap();
        assert!(matches!(
            table.map_page_to_frame(2, 0),
            Err(Error::InvalidPage {
                page: 2,
                page_count: 2
            })
        ));
        assert!(matches!(
            table.get_page_frame(5),
            Err(Error::InvalidPage { page: 5, .. })
        ));
    }

    #[test]
    fn test_zero_pages() {
        assert!(matches!(
            PageTable::new(0),
            Err(Error::InvalidSize { size: 0, .. })
        ));
    }
}
