pub mod amap;
pub mod commands;
pub mod config;
pub mod coords;
pub mod credential;
pub mod error;
pub mod format;
pub mod location;
pub mod travel;

use clap::Parser;
use std::process::ExitCode;

use commands::Cli;

pub use error::{AmapError, Result};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = std::io::stdout();
    match commands::execute(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_quota_exhausted() {
                log::warn!("API配额已耗尽");
            }
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
