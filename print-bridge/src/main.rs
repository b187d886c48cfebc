mod cli;
mod config;
mod dispatch;
mod logger;
mod response;

use config::Config;
use crab_spooler::PlatformSpooler;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    // Flushes the file writer on drop
    let _guard = logger::init_logger(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "print-bridge starting");

    let directory = dispatch::build_directory(PlatformSpooler::default(), &config);
    let outcome = dispatch::run(std::env::args_os(), &directory, &config);

    println!("{}", outcome.output);
    info!(exit_code = outcome.exit_code, "print-bridge finished");
    ExitCode::from(outcome.exit_code)
}
