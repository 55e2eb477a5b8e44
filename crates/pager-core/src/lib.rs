//! # Pager Core
//!
//! `pager-core` is the allocation engine of the Pager paging simulator. It models
//! physical memory as a pool of equal-size frames and hands those frames out to
//! simulated processes, one frame per logical page.
//!
//! ## Architecture Overview
//!
//! The crate is organised leaf-first:
//!
//! - [`memory::PhysicalMemory`] - A byte buffer partitioned into frames that can be
//!   read, written and cleared one frame at a time.
//!
//! - [`memory::LogicalMemory`] - The byte contents of a single process, partitioned
//!   into pages of the same size as a frame.
//!
//! - [`memory::PageTable`] - The per-process mapping from page number to frame number.
//!
//! - [`Process`] - A process identifier bundled with its logical memory and page table.
//!
//! - [`MemoryManager`] - Owns the physical memory, the frame owner table and the FIFO
//!   free-frame pool. Process creation either succeeds wholly or is rolled back.
//!
//! ## Supporting Components
//!
//! - [`ManagerConfig`] - Serializable construction parameters, loadable from JSON.
//!
//! - [`MemorySnapshot`] - A serializable view of the manager's state.
//!
//! - [`util`] module - [`util::Size`] for human readable sizes and the seedable
//!   [`util::Rng`] used to fill logical memory.
//!
//! ## Concurrency
//!
//! The manager is single-threaded. Every mutating operation takes `&mut self`; a
//! multi-threaded host must guard the whole manager with one lock.

#![warn(missing_docs)]

mod config;
mod error;
mod manager;
pub mod memory;
mod process;
mod snapshot;
pub mod util;

pub use crate::config::ManagerConfig;
pub use crate::error::{Error, Result};
pub use crate::manager::{FrameOwner, MemoryManager, Pid};
pub use crate::process::Process;
pub use crate::snapshot::{FrameSnapshot, MemorySnapshot, ProcessSnapshot};
