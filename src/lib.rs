//! Deduplication event IDs for Conversions API (CAPI) events.
//!
//! A conversion reported both by the browser tag and by the server is only
//! counted once when both reports carry the same event ID. This crate
//! derives that ID ([`generate_event_id`]), ships the matching client-side
//! snippet ([`client_snippet`]), and provides the `capi-event-id` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod ports;
pub mod snippet;

pub use error::EventIdError;
pub use generator::{generate_event_id, EventDescriptor, EventIdGenerator, Method};
pub use snippet::client_snippet;

use clap::Parser;

/// Run the CLI with the provided arguments and configuration.
///
/// # Errors
///
/// Returns an error when argument parsing fails or a cassette cannot be
/// loaded or written.
pub fn run<I, T>(args: I, config: &config::Config) -> Result<(), EventIdError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(cli.command.as_ref(), config)
}
