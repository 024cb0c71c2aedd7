//! ev3native Binary
//!
//! Runs one command from the arguments, or serves commands from stdin.

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use ev3native::{Config, ResultCode, Runner};
use tracing_subscriber::{fmt, EnvFilter};

/// Native command helper for the EV3 VM
///
/// Help and version flags are disabled: with any arguments present the
/// exit status is a result code, and 0 would read as a byte value.
#[derive(Parser, Debug)]
#[command(name = "ev3native")]
#[command(about = "Byte-level table lookups for a VM, via exit code or stdin/stdout pipes")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Largest single relative seek, in bytes
    #[arg(long, default_value_t = ev3native::lookup::MAX_SEEK_STEP)]
    max_seek_step: u64,

    /// Longest accepted file path, in bytes
    #[arg(long, default_value_t = 999)]
    max_path_len: usize,

    /// Line printed when stdin is exhausted in persistent mode
    #[arg(long, default_value = "Ending native code process...")]
    farewell: String,

    /// Command to run once, e.g. `tablelookup data.bin 16 3 7`.
    /// Without it, commands are read line by line from stdin.
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    command: Vec<OsString>,
}

fn main() -> ExitCode {
    // stdout carries results only; logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    // Arguments are present whenever parsing fails, so this is single-invocation mode
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!("Rejected arguments: {}", e);
            return ResultCode::FAILURE.into();
        }
    };

    let config = match Config::builder()
        .max_seek_step(args.max_seek_step)
        .max_path_len(args.max_path_len)
        .farewell(args.farewell)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ResultCode::FAILURE.into();
        }
    };

    let runner = Runner::new(config);

    if !args.command.is_empty() {
        return runner.run_once(&args.command).into();
    }

    tracing::info!("ev3native v{} serving commands from stdin", ev3native::VERSION);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match runner.serve(stdin, stdout) {
        Ok(stats) => {
            tracing::info!(
                "Processed {} commands ({} answered 255)",
                stats.commands_processed,
                stats.failures
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Session error: {}", e);
            ExitCode::FAILURE
        }
    }
}
