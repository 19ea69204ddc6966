//! Binary entrypoint for the `capi-event-id` CLI.

use std::process::ExitCode;

use capi_event_id::config::Config;
use capi_event_id::EventIdError;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match Config::from_env().and_then(|config| capi_event_id::run(std::env::args(), &config)) {
        Ok(()) => ExitCode::SUCCESS,
        // --help and --version arrive here too; clap knows which stream they belong on.
        Err(EventIdError::Args(err)) => {
            let _ = err.print();
            if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
