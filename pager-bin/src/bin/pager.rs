use std::io::{self, Write};

use anyhow::{Result, anyhow};
use clap::Parser;
use log::{info, warn};
use pager_bin::init_logging;
use pager_bin::prompt::Prompt;
use pager_bin::shell::{Shell, configure};
use pager_core::util::Size;
use pager_core::{ManagerConfig, MemoryManager};

/// CLI arguments for the `pager` binary.
///
/// Sizes that are neither given here nor in the config file are asked for
/// interactively.
#[derive(Debug, Parser)]
struct CliArgs {
    /// JSON file with the manager configuration.
    #[clap(long = "config")]
    config: Option<String>,
    /// Physical memory size, e.g. `1KB`. Must be a power of two.
    #[clap(long = "physical-size")]
    physical_size: Option<Size>,
    /// Page and frame size, e.g. `64`. Must be a power of two.
    #[clap(long = "page-size")]
    page_size: Option<Size>,
    /// Largest process size accepted.
    #[clap(long = "max-process-size")]
    max_process_size: Option<Size>,
    /// Seed for the random process contents.
    #[clap(long = "seed")]
    seed: Option<u64>,
    /// Write a JSON snapshot of the memory state to this file on exit.
    #[clap(long = "output")]
    output: Option<String>,
}

fn size_arg(size: Option<Size>) -> Result<Option<usize>> {
    size.map(|s| {
        s.checked_bytes()
            .ok_or_else(|| anyhow!("Size {} does not fit in memory", s))
    })
    .transpose()
}

/// Merges the config file with the command line. Returns `None` unless all sizes are known.
fn initial_config(args: &CliArgs) -> Result<Option<ManagerConfig>> {
    let file = match &args.config {
        Some(path) => Some(ManagerConfig::from_jsonfile(path)?),
        None => None,
    };
    let physical_memory_size =
        size_arg(args.physical_size)?.or(file.map(|c| c.physical_memory_size));
    let page_size = size_arg(args.page_size)?.or(file.map(|c| c.page_size));
    let max_process_size = size_arg(args.max_process_size)?.or(file.map(|c| c.max_process_size));
    let seed = args.seed.or(file.and_then(|c| c.seed));

    Ok(match (physical_memory_size, page_size, max_process_size) {
        (Some(physical_memory_size), Some(page_size), Some(max_process_size)) => {
            Some(ManagerConfig {
                physical_memory_size,
                page_size,
                max_process_size,
                seed,
            })
        }
        _ => None,
    })
}

fn main() -> Result<()> {
    init_logging();

    let args = CliArgs::parse();
    info!("CLI args: {:?}", args);

    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
    let manager = match initial_config(&args)? {
        Some(config) => match MemoryManager::from_config(config) {
            Ok(manager) => manager,
            Err(e) => {
                warn!("Invalid configuration {:?}: {}", config, e);
                writeln!(prompt.output(), "{}", e)?;
                configure(&mut prompt, config.seed)?
            }
        },
        None => configure(&mut prompt, args.seed)?,
    };

    let mut shell = Shell::new(prompt, manager);
    shell.run()?;

    if let Some(output) = &args.output {
        shell.manager().snapshot()?.save_to_file(output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, initial_config};
    use clap::Parser;
    use pager_core::util::Size;

    #[test]
    fn test_initial_config_from_args() {
        let args = CliArgs::try_parse_from([
            "pager",
            "--physical-size",
            "1KB",
            "--page-size",
            "64",
            "--max-process-size",
            "256",
            "--seed",
            "7",
        ])
        .unwrap();
        let config = initial_config(&args).unwrap().unwrap();
        assert_eq!(config.physical_memory_size, 1024);
        assert_eq!(config.page_size, 64);
        assert_eq!(config.max_process_size, 256);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_missing_sizes_are_asked_for() {
        let args = CliArgs::try_parse_from(["pager", "--page-size", "64"]).unwrap();
        assert!(initial_config(&args).unwrap().is_none());
    }

    #[test]
    fn test_oversized_argument_is_an_error() {
        assert!(CliArgs::try_parse_from(["pager", "--physical-size", "99999999999999999GB"]).is_err());

        let mut args = CliArgs::try_parse_from(["pager"]).unwrap();
        args.physical_size = Some(Size::GB(usize::MAX));
        assert!(initial_config(&args).is_err());
    }
}
