//! Default demo: one hash-based ID for a sample purchase.

use crate::context::ServiceContext;
use crate::generator::{EventIdGenerator, Method};

const DEMO_EVENT: &str = "purchase";
const DEMO_USER: &str = "user@example.com";

/// Render the demo output. The timestamp comes from the context's clock.
#[must_use]
pub fn render(ctx: &ServiceContext) -> String {
    let id = EventIdGenerator::from_context(ctx).generate(
        DEMO_EVENT,
        Some(DEMO_USER),
        None,
        Method::Hash,
    );
    format!("=== LinkedIn Event ID Generator ===\nHash-based event ID: {id}")
}
