use crate::manager::Pid;
use thiserror::Error;

/// Errors that can occur while configuring memory or allocating processes.
///
/// Every failure is local: an operation that returns an error leaves the
/// [`MemoryManager`](crate::MemoryManager) in the state it had before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction parameters violate a geometry rule
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A process or page count size is zero or above the allowed limit
    #[error("Invalid size {size}: {reason}")]
    InvalidSize {
        /// The rejected size
        size: usize,
        /// Which limit was violated
        reason: &'static str,
    },
    /// Page index outside the declared page range
    #[error("Invalid page number {page} (page count {page_count})")]
    InvalidPage {
        /// The rejected page index
        page: usize,
        /// Number of pages in the queried structure
        page_count: usize,
    },
    /// Frame index outside the physical memory
    #[error("Invalid frame number {frame} (frame count {frame_count})")]
    InvalidFrame {
        /// The rejected frame index
        frame: usize,
        /// Number of frames in physical memory
        frame_count: usize,
    },
    /// A valid page table slot was queried before it was mapped
    #[error("Page {0} is not mapped to any frame")]
    UnmappedPage(usize),
    /// A process with this pid is already registered
    #[error("Process with PID {0} already exists")]
    DuplicatePid(Pid),
    /// Not enough free frames to hold every page of a process
    #[error("Not enough physical memory frames available: {needed} needed, {free} free")]
    InsufficientMemory {
        /// Frames required by the request
        needed: usize,
        /// Frames currently in the free pool
        free: usize,
    },
    /// Data written to a frame exceeds the frame size
    #[error("Frame data of {len} bytes larger than frame size {frame_size}")]
    DataTooLarge {
        /// Length of the rejected data
        len: usize,
        /// Capacity of a frame
        frame_size: usize,
    },
    /// Reading a configuration file or writing a snapshot failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A configuration file or snapshot could not be (de)serialized
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for pager operations.
pub type Result<T> = std::result::Result<T, Error>;
