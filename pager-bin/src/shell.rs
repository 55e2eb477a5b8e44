//! Configuration dialog and menu loop.

use std::io::{self, BufRead, ErrorKind, Write};

use log::{debug, info};
use pager_core::util::format_hex;
use pager_core::{Error, ManagerConfig, MemoryManager, Pid};

use crate::prompt::Prompt;

fn to_io(e: Error) -> io::Error {
    io::Error::other(e)
}

/// Asks for the memory geometry until it forms a valid manager configuration.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, including end of input.
pub fn configure<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    seed: Option<u64>,
) -> io::Result<MemoryManager> {
    writeln!(prompt.output(), "=== Simulator configuration ===")?;
    loop {
        let physical_memory_size = prompt.read_size("Physical memory size (bytes): ")?;
        let page_size = prompt.read_size("Page/frame size (bytes): ")?;
        let max_process_size = prompt.read_size("Maximum process size (bytes): ")?;
        let config = ManagerConfig {
            physical_memory_size: physical_memory_size.bytes(),
            page_size: page_size.bytes(),
            max_process_size: max_process_size.bytes(),
            seed,
        };
        match MemoryManager::from_config(config) {
            Ok(manager) => return Ok(manager),
            Err(e) => {
                debug!("Rejected configuration {:?}: {}", config, e);
                writeln!(prompt.output(), "{}", e)?;
                writeln!(prompt.output(), "Try again.\n")?;
            }
        }
    }
}

/// Interactive menu over a [`MemoryManager`].
pub struct Shell<R, W> {
    prompt: Prompt<R, W>,
    manager: MemoryManager,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell over a configured manager.
    pub fn new(prompt: Prompt<R, W>, manager: MemoryManager) -> Self {
        Self { prompt, manager }
    }

    /// Returns the manager.
    pub fn manager(&self) -> &MemoryManager {
        &self.manager
    }

    /// Runs the menu until the user exits or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading or writing fails for any reason other
    /// than end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    info!("Input closed");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        writeln!(self.prompt.output(), "Simulator finished.")?;
        Ok(())
    }

    /// Shows the menu and runs one action. Returns `false` on exit.
    fn step(&mut self) -> io::Result<bool> {
        let out = self.prompt.output();
        writeln!(out, "\n=== Menu ===")?;
        writeln!(out, "1 - View physical memory")?;
        writeln!(out, "2 - Create process")?;
        writeln!(out, "3 - View page table of a process")?;
        writeln!(out, "4 - Exit")?;

        match self.prompt.read_positive("Select an option: ")? {
            1 => self.view_physical_memory()?,
            2 => self.create_process()?,
            3 => self.view_page_table()?,
            4 => return Ok(false),
            _ => writeln!(
                self.prompt.output(),
                "Invalid option. Choose between 1 and 4."
            )?,
        }
        Ok(true)
    }

    fn read_pid(&mut self) -> io::Result<Option<Pid>> {
        let pid = self.prompt.read_positive("Process PID: ")?;
        match Pid::try_from(pid) {
            Ok(pid) => Ok(Some(pid)),
            Err(_) => {
                writeln!(self.prompt.output(), "PID {} is out of range.", pid)?;
                Ok(None)
            }
        }
    }

    fn view_physical_memory(&mut self) -> io::Result<()> {
        let out = self.prompt.output();
        writeln!(
            out,
            "Free memory: {:.2}%",
            self.manager.free_memory_percentage()
        )?;
        let physical_memory = self.manager.physical_memory();
        for frame in 0..physical_memory.number_of_frames() {
            let owner = self.manager.frame_owner(frame).map_err(to_io)?;
            let data = physical_memory.read_frame(frame).map_err(to_io)?;
            writeln!(out, "Frame {} [{}]: [{}]", frame, owner, format_hex(&data))?;
        }
        Ok(())
    }

    fn create_process(&mut self) -> io::Result<()> {
        let Some(pid) = self.read_pid()? else {
            return Ok(());
        };
        if self.manager.find_process(pid).is_some() {
            writeln!(
                self.prompt.output(),
                "A process with this PID already exists."
            )?;
            return Ok(());
        }

        let max_process_size = self.manager.max_process_size();
        let size = loop {
            let size = self.prompt.read_positive("Process size (bytes): ")?;
            match usize::try_from(size) {
                Ok(size) if size <= max_process_size => break size,
                _ => writeln!(
                    self.prompt.output(),
                    "The size exceeds the limit of {} bytes. Enter another value.",
                    max_process_size
                )?,
            }
        };

        match self.manager.create_process(pid, size) {
            Ok(process) => writeln!(
                self.prompt.output(),
                "Process {} created with {} pages.",
                pid,
                process.page_count()
            )?,
            Err(Error::InsufficientMemory { .. }) => writeln!(
                self.prompt.output(),
                "Not enough memory to allocate the process."
            )?,
            Err(e) => writeln!(self.prompt.output(), "Failed to create process: {}", e)?,
        }
        Ok(())
    }

    fn view_page_table(&mut self) -> io::Result<()> {
        let Some(pid) = self.read_pid()? else {
            return Ok(());
        };
        let out = self.prompt.output();
        let Some(process) = self.manager.find_process(pid) else {
            writeln!(out, "Process not found.")?;
            return Ok(());
        };

        writeln!(
            out,
            "Process {} - size: {} bytes ({} pages)",
            process.pid(),
            process.size_in_bytes(),
            process.page_count()
        )?;
        let page_table = process.page_table();
        for page in 0..page_table.size() {
            let frame = page_table.get_page_frame(page).map_err(to_io)?;
            writeln!(out, "Page {} -> Frame {}", page, frame)?;
        }
        Ok(())
    }
}
