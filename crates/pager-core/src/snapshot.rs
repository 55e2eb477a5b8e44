use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::manager::{FrameOwner, MemoryManager, Pid};
use crate::util::format_hex;
use log::info;
use serde::Serialize;

/// Serializable view of a [`MemoryManager`].
#[derive(Debug, Serialize)]
pub struct MemorySnapshot {
    /// RFC 3339 timestamp of when the snapshot was taken
    pub date: String,
    /// Total physical memory in bytes
    pub physical_memory_size: usize,
    /// Page and frame size in bytes
    pub page_size: usize,
    /// Largest accepted process size in bytes
    pub max_process_size: usize,
    /// Seed of the content generator
    pub seed: u64,
    /// Free physical memory in percent
    pub free_memory_percentage: f64,
    /// Every frame in index order
    pub frames: Vec<FrameSnapshot>,
    /// Every process in creation order
    pub processes: Vec<ProcessSnapshot>,
}

/// One frame of a [`MemorySnapshot`].
#[derive(Debug, Serialize)]
pub struct FrameSnapshot {
    /// Frame index
    pub frame: usize,
    /// Owning process or free
    pub owner: FrameOwner,
    /// Frame contents as hexadecimal pairs
    pub data: String,
}

/// One process of a [`MemorySnapshot`].
#[derive(Debug, Serialize)]
pub struct ProcessSnapshot {
    /// Process identifier
    pub pid: Pid,
    /// Process size in bytes
    pub size: usize,
    /// Frame of every page, indexed by page number
    pub page_table: Vec<usize>,
}

impl MemoryManager {
    /// Captures the current frames and processes.
    ///
    /// # Errors
    ///
    /// Returns an error if a frame cannot be read.
    pub fn snapshot(&self) -> Result<MemorySnapshot> {
        let physical_memory = self.physical_memory();
        let frames = (0..physical_memory.number_of_frames())
            .map(|frame| {
                Ok(FrameSnapshot {
                    frame,
                    owner: self.frame_owner(frame)?,
                    data: format_hex(&physical_memory.read_frame(frame)?),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let processes = self
            .list_processes()
            .iter()
            .map(|process| ProcessSnapshot {
                pid: process.pid(),
                size: process.size_in_bytes(),
                page_table: process
                    .page_table()
                    .mappings()
                    .map(|(_, frame)| frame)
                    .collect(),
            })
            .collect();
        Ok(MemorySnapshot {
            date: chrono::Local::now().to_rfc3339(),
            physical_memory_size: physical_memory.total_size(),
            page_size: self.page_size(),
            max_process_size: self.max_process_size(),
            seed: self.seed(),
            free_memory_percentage: self.free_memory_percentage(),
            frames,
            processes,
        })
    }
}

impl MemorySnapshot {
    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> Result<()> {
        let file = File::create(filename.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!("Snapshot saved to {}", filename.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{FrameOwner, ManagerConfig, MemoryManager};

    #[test]
    fn test_snapshot_contents() -> anyhow::Result<()> {
        let mut config = ManagerConfig::new(64, 16, 64);
        config.seed = Some(3);
        let mut manager = MemoryManager::from_config(config)?;
        manager.create_process(9, 20)?;

        let snapshot = manager.snapshot()?;
        assert_eq!(snapshot.physical_memory_size, 64);
        assert_eq!(snapshot.page_size, 16);
        assert_eq!(snapshot.seed, 3);
        assert_eq!(snapshot.free_memory_percentage, 50.0);
        assert_eq!(snapshot.frames.len(), 4);
        assert_eq!(snapshot.frames[0].owner, FrameOwner::Process(9));
        assert_eq!(snapshot.frames[2].owner, FrameOwner::Free);
        assert_eq!(snapshot.frames[2].data, vec!["00"; 16].join(" "));
        // 4 bytes of page 1, then 12 bytes of padding
        assert!(snapshot.frames[1].data.ends_with(&vec!["00"; 12].join(" ")));
        assert_eq!(snapshot.processes.len(), 1);
        assert_eq!(snapshot.processes[0].pid, 9);
        assert_eq!(snapshot.processes[0].size, 20);
        assert_eq!(snapshot.processes[0].page_table, vec![0, 1]);
        Ok(())
    }

    #[test]
    fn test_snapshot_json() -> anyhow::Result<()> {
        let mut manager = MemoryManager::new(32, 16, 32)?;
        manager.create_process(1, 16)?;
        let json = serde_json::to_value(manager.snapshot()?)?;
        assert_eq!(json["frames"][0]["owner"]["Process"], 1);
        assert_eq!(json["frames"][1]["owner"], "Free");
        assert_eq!(json["processes"][0]["page_table"][0], 0);

        let path = std::env::temp_dir().join(format!("pager-snapshot-{}.json", std::process::id()));
        manager.snapshot()?.save_to_file(&path)?;
        let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        std::fs::remove_file(&path)?;
        assert_eq!(saved["free_memory_percentage"], 50.0);
        Ok(())
    }
}
