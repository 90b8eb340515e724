//! # glbpack
//!
//! Command-line front end for [`glbpack_core`]. Parses the arguments,
//! configures logging and runs one packing job.
//!
//! ## Example
//!
//! ```ignore
//! use clap::Parser;
//! use glbpack::{CliArgs, run};
//!
//! fn main() -> std::process::ExitCode {
//!     run(CliArgs::parse())
//! }
//! ```

mod app;
mod args;

pub use app::{execute, run};
pub use args::CliArgs;

/// App version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the tool version.
pub fn init() {
    log::info!("glbpack v{} initialized", VERSION);
}
