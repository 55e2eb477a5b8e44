use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Construction parameters of a [`MemoryManager`](crate::MemoryManager).
///
/// Can be loaded from a JSON file such as
///
/// ```json
/// { "physical_memory_size": 1024, "page_size": 64, "max_process_size": 256, "seed": 42 }
/// ```
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Total physical memory in bytes (power of two)
    pub physical_memory_size: usize,
    /// Page and frame size in bytes (power of two)
    pub page_size: usize,
    /// Largest process accepted by `create_process`, in bytes
    pub max_process_size: usize,
    /// Seed for logical memory contents; random if absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ManagerConfig {
    /// Creates a configuration without a fixed seed.
    pub fn new(physical_memory_size: usize, page_size: usize, max_process_size: usize) -> Self {
        Self {
            physical_memory_size,
            page_size,
            max_process_size,
            seed: None,
        }
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed. The loaded values
    /// are not validated; see [`ManagerConfig::validate`].
    pub fn from_jsonfile(filepath: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(filepath)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Checks the geometry rules of a memory manager.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the physical memory size or
    /// page size is not a power of two, if the maximum process size is zero, or
    /// if it exceeds the physical memory size.
    pub fn validate(&self) -> Result<()> {
        if !self.physical_memory_size.is_power_of_two() || !self.page_size.is_power_of_two() {
            return Err(Error::InvalidConfiguration(format!(
                "memory size ({}) and page size ({}) must be powers of two",
                self.physical_memory_size, self.page_size
            )));
        }
        if self.max_process_size == 0 {
            return Err(Error::InvalidConfiguration(
                "maximum process size must be positive".into(),
            ));
        }
        if self.max_process_size > self.physical_memory_size {
            return Err(Error::InvalidConfiguration(format!(
                "maximum process size ({}) cannot exceed physical memory size ({})",
                self.max_process_size, self.physical_memory_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ManagerConfig;
    use crate::Error;

    #[test]
    fn test_valid() {
        assert!(ManagerConfig::new(64, 16, 64).validate().is_ok());
        assert!(ManagerConfig::new(64, 64, 1).validate().is_ok());
    }

    #[test]
    fn test_not_power_of_two() {
        for (phys, page) in [(48, 16), (64, 12), (0, 16), (64, 0)] {
            assert!(
                matches!(
                    ManagerConfig::new(phys, page, 16).validate(),
                    Err(Error::InvalidConfiguration(_))
                ),
                "({}, {}) should be rejected",
                phys,
                page
            );
        }
    }

    #[test]
    fn test_max_process_size() {
        assert!(matches!(
            ManagerConfig::new(64, 16, 0).validate(),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ManagerConfig::new(64, 16, 65).validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_from_json() -> anyhow::Result<()> {
        let config: ManagerConfig = serde_json::from_str(
            r#"{ "physical_memory_size": 1024, "page_size": 64, "max_process_size": 256 }"#,
        )?;
        assert_eq!(config, ManagerConfig::new(1024, 64, 256));

        let seeded: ManagerConfig = serde_json::from_str(
            r#"{ "physical_memory_size": 64, "page_size": 16, "max_process_size": 64, "seed": 5 }"#,
        )?;
        assert_eq!(seeded.seed, Some(5));
        Ok(())
    }

    #[test]
    fn test_from_jsonfile() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("pager-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "physical_memory_size": 128, "page_size": 32, "max_process_size": 96, "seed": 1 }"#,
        )?;
        let config = ManagerConfig::from_jsonfile(&path)?;
        std::fs::remove_file(&path)?;
        assert_eq!(config.physical_memory_size, 128);
        assert_eq!(config.page_size, 32);
        assert_eq!(config.max_process_size, 96);
        assert_eq!(config.seed, Some(1));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ManagerConfig::from_jsonfile("/nonexistent/pager.json"),
            Err(Error::Io(_))
        ));
    }
}
