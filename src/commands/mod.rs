//! Command dispatch and handlers.

pub mod demo;
pub mod generate;
pub mod snippet;

use crate::cli::Command;
use crate::config::Config;
use crate::context::{PortDemand, ServiceContext};
use crate::error::EventIdError;
use crate::generator::Method;

/// Dispatch a parsed command to its handler.
///
/// When recording is configured, the cassette is written after the command
/// output has been printed.
///
/// # Errors
///
/// Returns an error if the cassette cannot be loaded or written, or a replay
/// cassette holds fewer readings than the command needs.
pub fn dispatch(command: Option<&Command>, config: &Config) -> Result<(), EventIdError> {
    let (ctx, session) = ServiceContext::for_mode(&config.cassette, demand(command))?;

    let output = dispatch_with_context(command, &ctx);
    println!("{output}");

    if let Some(session) = session {
        drop(ctx);
        let path = session.finish()?;
        tracing::info!(path = %path.display(), "recording saved");
    }

    Ok(())
}

/// Port calls `command` will make, mirroring what its handler does.
#[must_use]
pub fn demand(command: Option<&Command>) -> PortDemand {
    match command {
        None | Some(Command::Demo) => PortDemand { clock_reads: 1, ids: 0 },
        Some(Command::Generate(args)) => PortDemand {
            clock_reads: usize::from(args.timestamp.is_none()),
            ids: usize::from(Method::parse(&args.method) == Method::Uuid),
        },
        Some(Command::Snippet) => PortDemand::NONE,
    }
}

/// Run a command against the given context and return what it prints.
#[must_use]
pub fn dispatch_with_context(command: Option<&Command>, ctx: &ServiceContext) -> String {
    match command {
        None | Some(Command::Demo) => demo::render(ctx),
        Some(Command::Generate(args)) => generate::render(ctx, args),
        Some(Command::Snippet) => snippet::render(),
    }
}
