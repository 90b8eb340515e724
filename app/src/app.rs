//! Run loop of the command-line tool.

use std::process::ExitCode;

use glbpack_core::{PackOptions, PackReport, pack_asset};

use crate::args::CliArgs;

/// Initialize logging, pack the requested asset and map the outcome to an
/// exit code.
///
/// Logging honours `RUST_LOG` and defaults to `info`.
pub fn run(args: CliArgs) -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    glbpack_core::init();
    crate::init();

    match execute(args.into()) {
        Ok(report) => {
            log::info!(
                "Packed {} ({} bytes)",
                report.output_path.display(),
                report.bytes
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

/// Pack one asset without touching global logging state.
pub fn execute(options: PackOptions) -> Result<PackReport, glbpack_core::PackError> {
    log::info!(
        "Packing '{}' from {}",
        options.base_name,
        options.input_dir.display()
    );
    pack_asset(&options)
}

/// Render an error and all of its sources on one line.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        // Transparent wrappers repeat their source's message.
        if !message.ends_with(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
