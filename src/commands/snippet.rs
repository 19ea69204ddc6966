//! `capi-event-id snippet` command.

use crate::snippet::client_snippet;

/// Render the client-side snippet, without surrounding blank lines.
#[must_use]
pub fn render() -> String {
    client_snippet().trim().to_string()
}
