//! # Pager
//!
//! Pager simulates fixed-size paging: a process's logical memory is split into
//! equal-size pages and every page is placed in a frame of a finite physical
//! memory pool.
//!
//! ## Modules
//!
//! - `memory`: physical memory, logical memory and page tables.
//! - `manager`: the [`MemoryManager`] that owns the frame pool and creates processes.
//! - `util`: [`util::Size`] and the seedable [`util::Rng`].
//!
//! All types are re-exported from `pager-core`. The interactive front end lives
//! in the `pager-bin` crate.
//!
//! ```
//! use pager::MemoryManager;
//!
//! let mut manager = MemoryManager::new(64, 16, 64).unwrap();
//! let process = manager.create_process(1, 30).unwrap();
//! assert_eq!(process.page_count(), 2);
//! assert_eq!(manager.free_memory_percentage(), 50.0);
//! ```

pub use pager_core::*;
