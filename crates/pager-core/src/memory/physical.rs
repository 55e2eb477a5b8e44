use std::ops::Range;

use crate::error::{Error, Result};
use log::trace;

/// Simulated physical memory.
///
/// A byte buffer of `total_size` bytes split into frames of `frame_size` bytes.
/// The geometry is fixed at construction; only frame contents change.
#[derive(Clone, Debug)]
pub struct PhysicalMemory {
    data: Box<[u8]>,
    frame_size: usize,
}

impl PhysicalMemory {
    /// Creates a zeroed physical memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if either size is zero or `size`
    /// is not a multiple of `frame_size`.
    pub fn new(size: usize, frame_size: usize) -> Result<Self> {
        if size == 0 || frame_size == 0 {
            return Err(Error::InvalidConfiguration(
                "memory size and frame size must be positive".into(),
            ));
        }
        if !size.is_multiple_of(frame_size) {
            return Err(Error::InvalidConfiguration(format!(
                "physical memory size {} must be a multiple of frame size {}",
                size, frame_size
            )));
        }
        Ok(PhysicalMemory {
            data: vec![0u8; size].into_boxed_slice(),
            frame_size,
        })
    }

    /// Returns the total size in bytes.
    pub fn total_size(&self) -> usize {
        self.data.len()
    }

    /// Returns the size of one frame in bytes.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Returns the number of frames.
    pub fn number_of_frames(&self) -> usize {
        self.data.len() / self.frame_size
    }

    /// Returns the byte address at which `frame` starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if `frame` is out of range.
    pub fn frame_start_address(&self, frame: usize) -> Result<usize> {
        let frame_count = self.number_of_frames();
        if frame >= frame_count {
            return Err(Error::InvalidFrame { frame, frame_count });
        }
        Ok(frame * self.frame_size)
    }

    fn frame_range(&self, frame: usize) -> Result<Range<usize>> {
        let start = self.frame_start_address(frame)?;
        Ok(start..start + self.frame_size)
    }

    /// Returns a copy of the bytes stored in `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if `frame` is out of range.
    pub fn read_frame(&self, frame: usize) -> Result<Vec<u8>> {
        let range = self.frame_range(frame)?;
        Ok(self.data[range].to_vec())
    }

    /// Copies `data` to the start of `frame` and zero-fills the rest of the frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataTooLarge`] if `data` does not fit into one frame, or
    /// [`Error::InvalidFrame`] if `frame` is out of range.
    pub fn write_frame(&mut self, frame: usize, data: &[u8]) -> Result<()> {
        if data.len() > self.frame_size {
            return Err(Error::DataTooLarge {
                len: data.len(),
                frame_size: self.frame_size,
            });
        }
        let range = self.frame_range(frame)?;
        trace!("write {} bytes to frame {}", data.len(), frame);
        let (head, tail) = self.data[range].split_at_mut(data.len());
        head.copy_from_slice(data);
        tail.fill(0);
        Ok(())
    }

    /// Zero-fills `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if `frame` is out of range.
    pub fn clear_frame(&mut self, frame: usize) -> Result<()> {
        let range = self.frame_range(frame)?;
        trace!("clear frame {}", frame);
        self.data[range].fill(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PhysicalMemory;
    use crate::Error;

    #[test]
    fn test_geometry() {
        let pm = PhysicalMemory::new(64, 16).unwrap();
        assert_eq!(pm.total_size(), 64);
        assert_eq!(pm.frame_size(), 16);
        assert_eq!(pm.number_of_frames(), 4);
        assert_eq!(pm.frame_start_address(0).unwrap(), 0);
        assert_eq!(pm.frame_start_address(3).unwrap(), 48);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            PhysicalMemory::new(0, 16),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            PhysicalMemory::new(64, 0),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            PhysicalMemory::new(60, 16),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_initialized_to_zero() {
        let pm = PhysicalMemory::new(32, 16).unwrap();
        assert_eq!(pm.read_frame(0).unwrap(), vec![0u8; 16]);
        assert_eq!(pm.read_frame(1).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_write_read_frame() {
        let mut pm = PhysicalMemory::new(32, 4).unwrap();
        pm.write_frame(2, &[1, 2, 3, 4]).unwrap();
        assert_eq!(pm.read_frame(2).unwrap(), vec![1, 2, 3, 4]);
        // neighbours untouched
        assert_eq!(pm.read_frame(1).unwrap(), vec![0; 4]);
        assert_eq!(pm.read_frame(3).unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_short_write_zero_fills_tail() {
        let mut pm = PhysicalMemory::new(16, 4).unwrap();
        pm.write_frame(1, &[0xFF; 4]).unwrap();
        pm.write_frame(1, &[7]).unwrap();
        assert_eq!(pm.read_frame(1).unwrap(), vec![7, 0, 0, 0]);
        pm.write_frame(1, &[]).unwrap();
        assert_eq!(pm.read_frame(1).unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_write_too_large() {
        let mut pm = PhysicalMemory::new(16, 4).unwrap();
        assert!(matches!(
            pm.write_frame(0, &[0; 5]),
            Err(Error::DataTooLarge {
                len: 5,
                frame_size: 4
            })
        ));
        assert_eq!(pm.read_frame(0).unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_clear_frame() {
        let mut pm = PhysicalMemory::new(16, 4).unwrap();
        pm.write_frame(3, &[9, 9, 9, 9]).unwrap();
        pm.clear_frame(3).unwrap();
        assert_eq!(pm.read_frame(3).unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_read_copy_is_independent() {
        let mut pm = PhysicalMemory::new(16, 4).unwrap();
        pm.write_frame(0, &[1, 2, 3, 4]).unwrap();
        let mut copy = pm.read_frame(0).unwrap();
        copy[0] = 42;
        assert_eq!(pm.read_frame(0).unwrap()[0], 1);
    }

    #[test]
    fn test_invalid_frame() {
        let mut pm = PhysicalMemory::new(16, 4).unwrap();
        let invalid = |r: crate::Result<()>| {
            matches!(
                r,
                Err(Error::InvalidFrame {
                    frame: 4,
                    frame_count: 4
                })
            )
        };
        assert!(invalid(pm.frame_start_address(4).map(|_| ())));
        assert!(invalid(pm.read_frame(4).map(|_| ())));
        assert!(invalid(pm.write_frame(4, &[1])));
        assert!(invalid(pm.clear_frame(4)));
    }
}
