use crate::manager::Pid;
use crate::memory::{LogicalMemory, PageTable};

/// A simulated process.
///
/// Binds a process identifier to its logical memory and the page table that
/// places each of its pages in a frame. Processes are only created through
/// [`MemoryManager::create_process`](crate::MemoryManager::create_process).
#[derive(Clone, Debug)]
pub struct Process {
    pid: Pid,
    logical_memory: LogicalMemory,
    page_table: PageTable,
}

impl Process {
    pub(crate) fn new(pid: Pid, logical_memory: LogicalMemory, page_table: PageTable) -> Self {
        debug_assert_eq!(logical_memory.number_of_pages(), page_table.size());
        Process {
            pid,
            logical_memory,
            page_table,
        }
    }

    /// Returns the process identifier.
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Returns the size of the process in bytes.
    pub fn size_in_bytes(&self) -> usize {
        self.logical_memory.size()
    }

    /// Returns the number of pages the process occupies.
    pub fn page_count(&self) -> usize {
        self.logical_memory.number_of_pages()
    }

    /// Returns the process's logical memory.
    pub fn logical_memory(&self) -> &LogicalMemory {
        &self.logical_memory
    }

    /// Returns the process's page table.
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }
}
