//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `capi-event-id`.
#[derive(Debug, Parser)]
#[command(
    name = "capi-event-id",
    version,
    about = "Generate deduplication event IDs for Conversions API events"
)]
pub struct Cli {
    /// The command to execute. Runs the demo when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print an example event ID for a sample purchase.
    Demo,
    /// Generate an event ID.
    Generate(GenerateArgs),
    /// Print the client-side snippet for a tag manager custom variable.
    Snippet,
}

/// Arguments for `generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Conversion event name, e.g. `purchase`.
    pub event_name: String,
    /// User ID, hashed email, or session ID. Defaults to `anonymous`.
    #[arg(long, short)]
    pub user: Option<String>,
    /// Unix timestamp in seconds. Defaults to now.
    #[arg(long, short, allow_negative_numbers = true)]
    pub timestamp: Option<i64>,
    /// `hash` (deterministic) or `uuid` (random). Unknown values mean `hash`.
    #[arg(long, short, default_value = "hash")]
    pub method: String,
}
