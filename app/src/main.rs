use std::process::ExitCode;

use clap::Parser;
use glbpack::{CliArgs, run};

fn main() -> ExitCode {
    run(CliArgs::parse())
}
