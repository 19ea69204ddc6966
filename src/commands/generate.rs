//! `capi-event-id generate` command.

use crate::cli::GenerateArgs;
use crate::context::ServiceContext;
use crate::generator::{EventIdGenerator, Method};

/// Render the event ID for the given arguments.
#[must_use]
pub fn render(ctx: &ServiceContext, args: &GenerateArgs) -> String {
    EventIdGenerator::from_context(ctx).generate(
        &args.event_name,
        args.user.as_deref(),
        args.timestamp,
        Method::parse(&args.method),
    )
}
