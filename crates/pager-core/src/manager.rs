use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::memory::{LogicalMemory, PageTable, PhysicalMemory};
use crate::process::Process;
use crate::util::Rng;
use log::{debug, info, warn};
use serde::Serialize;

/// Process identifier.
pub type Pid = u32;

/// Owner of a physical frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FrameOwner {
    /// The frame is in the free pool
    Free,
    /// The frame holds a page of the process with this pid
    Process(Pid),
}

impl FrameOwner {
    /// Returns `true` if the frame is not owned by any process.
    pub fn is_free(&self) -> bool {
        matches!(self, FrameOwner::Free)
    }

    /// Returns the owning pid, if any.
    pub fn pid(&self) -> Option<Pid> {
        match self {
            FrameOwner::Free => None,
            FrameOwner::Process(pid) => Some(*pid),
        }
    }
}

impl fmt::Display for FrameOwner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrameOwner::Free => write!(f, "free"),
            FrameOwner::Process(pid) => write!(f, "PID {}", pid),
        }
    }
}

/// Frame owner table and FIFO free-frame pool.
///
/// A frame is in `free` exactly when its owner is [`FrameOwner::Free`].
#[derive(Debug)]
struct FrameTable {
    owners: Vec<FrameOwner>,
    free: VecDeque<usize>,
}

impl FrameTable {
    fn new(frame_count: usize) -> Self {
        FrameTable {
            owners: vec![FrameOwner::Free; frame_count],
            free: (0..frame_count).collect(),
        }
    }

    fn owner(&self, frame: usize) -> Result<FrameOwner> {
        self.owners.get(frame).copied().ok_or(Error::InvalidFrame {
            frame,
            frame_count: self.owners.len(),
        })
    }

    fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Takes the oldest free frame and assigns it to `pid`.
    fn claim(&mut self, pid: Pid) -> Option<usize> {
        let frame = self.free.pop_front()?;
        self.owners[frame] = FrameOwner::Process(pid);
        Some(frame)
    }

    /// Marks `frame` free and appends it to the pool.
    fn release(&mut self, frame: usize) {
        self.owners[frame] = FrameOwner::Free;
        self.free.push_back(frame);
    }
}

/// Frames claimed by one in-progress allocation.
///
/// Dropping the claim without calling [`FrameClaim::commit`] releases every
/// claimed frame: its owner is reset, its bytes are cleared and it rejoins
/// the back of the free pool in claim order.
struct FrameClaim<'a> {
    physical_memory: &'a mut PhysicalMemory,
    frames: &'a mut FrameTable,
    pid: Pid,
    claimed: Vec<usize>,
}

impl<'a> FrameClaim<'a> {
    fn new(physical_memory: &'a mut PhysicalMemory, frames: &'a mut FrameTable, pid: Pid) -> Self {
        FrameClaim {
            physical_memory,
            frames,
            pid,
            claimed: vec![],
        }
    }

    /// Claims the next free frame and stores `data` in it.
    fn claim_frame(&mut self, data: &[u8]) -> Result<usize> {
        let frame = self
            .frames
            .claim(self.pid)
            .ok_or(Error::InsufficientMemory { needed: 1, free: 0 })?;
        self.claimed.push(frame);
        debug!("PID {}: claimed frame {}", self.pid, frame);
        self.physical_memory.write_frame(frame, data)?;
        Ok(frame)
    }

    /// Keeps the claimed frames and returns them.
    fn commit(mut self) -> Vec<usize> {
        std::mem::take(&mut self.claimed)
    }
}

impl Drop for FrameClaim<'_> {
    fn drop(&mut self) {
        if self.claimed.is_empty() {
            return;
        }
        debug!(
            "PID {}: releasing {} claimed frames",
            self.pid,
            self.claimed.len()
        );
        for frame in self.claimed.drain(..) {
            if let Err(e) = self.physical_memory.clear_frame(frame) {
                warn!("Failed to clear frame {}: {}", frame, e);
            }
            self.frames.release(frame);
        }
    }
}

/// Copies every page of `logical_memory` into a freshly claimed frame.
///
/// Either all pages are placed and the filled page table is returned, or no
/// frame stays claimed.
fn allocate_pages(
    physical_memory: &mut PhysicalMemory,
    frames: &mut FrameTable,
    pid: Pid,
    logical_memory: &LogicalMemory,
) -> Result<(PageTable, Vec<usize>)> {
    let mut page_table = PageTable::new(logical_memory.number_of_pages())?;
    let mut claim = FrameClaim::new(physical_memory, frames, pid);
    for page in 0..logical_memory.number_of_pages() {
        let data = logical_memory.read_page(page)?;
        let frame = claim.claim_frame(&data)?;
        page_table.map_page_to_frame(page, frame)?;
    }
    Ok((page_table, claim.commit()))
}

/// Owner of the simulated physical memory.
///
/// The manager hands frames out to processes from a FIFO free pool: the pool
/// starts with every frame in ascending order, allocations take from the front
/// and released frames rejoin at the back. A frame is owned by at most one
/// process, and the number of free frames plus the pages of all processes
/// always equals the number of frames.
///
/// # Examples
///
/// ```
/// use pager_core::{FrameOwner, MemoryManager};
///
/// let mut manager = MemoryManager::new(64, 16, 64)?;
/// assert_eq!(manager.free_memory_percentage(), 100.0);
///
/// let process = manager.create_process(1, 16)?;
/// let frame = process.page_table().get_page_frame(0)?;
/// assert_eq!(manager.frame_owner(frame)?, FrameOwner::Process(1));
/// assert_eq!(manager.free_memory_percentage(), 75.0);
/// # Ok::<(), pager_core::Error>(())
/// ```
#[derive(Debug)]
pub struct MemoryManager {
    physical_memory: PhysicalMemory,
    frames: FrameTable,
    page_size: usize,
    max_process_size: usize,
    processes: Vec<Process>,
    pid_index: HashMap<Pid, usize>,
    rng: Rng,
}

impl MemoryManager {
    /// Creates a manager with randomly seeded process contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the sizes violate the rules of
    /// [`ManagerConfig::validate`].
    pub fn new(
        physical_memory_size: usize,
        page_size: usize,
        max_process_size: usize,
    ) -> Result<Self> {
        Self::from_config(ManagerConfig::new(
            physical_memory_size,
            page_size,
            max_process_size,
        ))
    }

    /// Creates a manager from a configuration.
    ///
    /// Physical memory is built with one frame per page size and every frame
    /// starts free.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration is invalid.
    pub fn from_config(config: ManagerConfig) -> Result<Self> {
        config.validate()?;
        let physical_memory = PhysicalMemory::new(config.physical_memory_size, config.page_size)?;
        let frames = FrameTable::new(physical_memory.number_of_frames());
        let rng = config.seed.map_or_else(Rng::from_entropy, Rng::from_seed);
        info!(
            "Physical memory of {} bytes with {} frames of {} bytes (seed {})",
            physical_memory.total_size(),
            physical_memory.number_of_frames(),
            config.page_size,
            rng.seed()
        );
        Ok(MemoryManager {
            physical_memory,
            frames,
            page_size: config.page_size,
            max_process_size: config.max_process_size,
            processes: vec![],
            pid_index: HashMap::new(),
            rng,
        })
    }

    /// Creates a process of `process_size` random bytes and places its pages.
    ///
    /// Frames are taken from the front of the free pool, one per page in page
    /// order. The final page is zero-padded to a whole frame.
    ///
    /// # Errors
    ///
    /// * [`Error::DuplicatePid`] if `pid` is already registered
    /// * [`Error::InvalidSize`] if `process_size` is zero or above the maximum
    /// * [`Error::InsufficientMemory`] if there are fewer free frames than pages
    ///
    /// On error no process is registered and frame ownership, frame contents
    /// and the free pool are as before the call.
    pub fn create_process(&mut self, pid: Pid, process_size: usize) -> Result<&Process> {
        if self.pid_index.contains_key(&pid) {
            return Err(Error::DuplicatePid(pid));
        }
        if process_size == 0 {
            return Err(Error::InvalidSize {
                size: process_size,
                reason: "process size must be positive",
            });
        }
        if process_size > self.max_process_size {
            return Err(Error::InvalidSize {
                size: process_size,
                reason: "process size exceeds maximum allowed size",
            });
        }

        let logical_memory = LogicalMemory::with_rng(process_size, self.page_size, &mut self.rng)?;
        let pages_needed = logical_memory.number_of_pages();
        if self.frames.free_count() < pages_needed {
            return Err(Error::InsufficientMemory {
                needed: pages_needed,
                free: self.frames.free_count(),
            });
        }

        let (page_table, frames) = match allocate_pages(
            &mut self.physical_memory,
            &mut self.frames,
            pid,
            &logical_memory,
        ) {
            Ok(allocation) => allocation,
            Err(e) => {
                warn!("Allocation for PID {} rolled back: {}", pid, e);
                return Err(e);
            }
        };
        info!(
            "Created PID {} with {} bytes in {} pages, frames {:?}",
            pid, process_size, pages_needed, frames
        );

        let idx = self.processes.len();
        self.processes.push(Process::new(pid, logical_memory, page_table));
        self.pid_index.insert(pid, idx);
        Ok(&self.processes[idx])
    }

    /// Looks up a process by pid.
    pub fn find_process(&self, pid: Pid) -> Option<&Process> {
        self.pid_index.get(&pid).map(|&idx| &self.processes[idx])
    }

    /// Returns all processes in creation order.
    pub fn list_processes(&self) -> &[Process] {
        &self.processes
    }

    /// Returns the owner of `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if `frame` is out of range.
    pub fn frame_owner(&self, frame: usize) -> Result<FrameOwner> {
        self.frames.owner(frame)
    }

    /// Returns the number of frames in the free pool.
    pub fn free_frame_count(&self) -> usize {
        self.frames.free_count()
    }

    /// Returns the share of physical memory not owned by any process, in percent.
    pub fn free_memory_percentage(&self) -> f64 {
        let total = self.physical_memory.total_size();
        if total == 0 {
            return 0.0;
        }
        let free_bytes = self.frames.free_count() * self.page_size;
        (free_bytes as f64 * 100.0) / total as f64
    }

    /// Returns the page (and frame) size in bytes.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the largest process size accepted by [`MemoryManager::create_process`].
    pub fn max_process_size(&self) -> usize {
        self.max_process_size
    }

    /// Returns the seed used for process contents.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Returns the physical memory.
    pub fn physical_memory(&self) -> &PhysicalMemory {
        &self.physical_memory
    }
}
