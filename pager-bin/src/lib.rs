//! # Pager front end
//!
//! Interactive command line front end for the Pager paging simulator.
//!
//! ## Quickstart guide
//!
//! ```sh
//! # Prompt for every size
//! cargo run --release --bin=pager
//!
//! # Fixed geometry, reproducible contents, snapshot on exit
//! cargo run --release --bin=pager -- --physical-size 1KB --page-size 64 \
//!     --max-process-size 256 --seed 42 --output snapshot.json
//! ```
//!
//! The menu offers four actions: view physical memory, create a process, view
//! the page table of a process, and exit. Set `RUST_LOG=debug` to follow frame
//! allocation in the log.
//!
//! ## Modules
//!
//! - `prompt`: Reading validated integers and sizes from an input stream.
//! - `shell`: Manager configuration dialog and the menu loop.
pub mod prompt;
pub mod shell;

/// Initializes `env_logger`, logging warnings and errors unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
