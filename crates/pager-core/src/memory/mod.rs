//! The `memory` module provides the building blocks of the paging model.
//!
//! The `memory` module provides the following abstractions:
//! - `PhysicalMemory`: A fixed byte buffer partitioned into equal-size frames.
//! - `LogicalMemory`: The contents of one process, partitioned into pages.
//! - `PageTable`: The mapping from a process's page numbers to frame numbers.
mod logical;
mod page_table;
mod physical;

pub use self::logical::LogicalMemory;
pub use self::page_table::PageTable;
pub use self::physical::PhysicalMemory;
