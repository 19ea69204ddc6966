//! Client-side counterpart for tag-manager custom variables.
//!
//! The text below is pasted by hand into a tag manager's "Custom JavaScript
//! Variable" field. `{{Event Name}}`, `{{User ID}}` and `{{Client ID}}` are
//! tag-manager variables, resolved in the browser when the tag fires.
//!
//! The snippet does **not** compute the same ID as [`crate::generator`]:
//! it uses a 32-bit rolling character-code hash followed by the timestamp in
//! hex, not SHA-256. A browser event and a server event built from identical
//! inputs therefore get different IDs and will not deduplicate. Existing
//! deployed tags may depend on this exact text, so it is shipped unchanged;
//! see `DESIGN.md` before reconciling the two.

/// Tag-manager variables the snippet reads.
pub const PLACEHOLDERS: [&str; 3] = ["{{Event Name}}", "{{User ID}}", "{{Client ID}}"];

const CLIENT_SNIPPET: &str = r"
function() {
    var eventName = {{Event Name}} || 'conversion';
    var userId = {{User ID}} || {{Client ID}} || 'anonymous';
    var timestamp = Math.floor(Date.now() / 1000);
    
    var raw = eventName + '_' + userId + '_' + timestamp;
    
    var hash = 0;
    for (var i = 0; i < raw.length; i++) {
        var char = raw.charCodeAt(i);
        hash = ((hash << 5) - hash) + char;
        hash = hash & hash;
    }
    
    var hexHash = Math.abs(hash).toString(16);
    return (hexHash + timestamp.toString(16)).substring(0, 32);
}
";

/// Returns the client-side event ID snippet as opaque text.
#[must_use]
pub fn client_snippet() -> &'static str {
    CLIENT_SNIPPET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_a_single_anonymous_function() {
        let text = client_snippet().trim();
        assert!(text.starts_with("function() {"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn snippet_reads_every_placeholder() {
        for placeholder in PLACEHOLDERS {
            assert!(client_snippet().contains(placeholder), "missing {placeholder}");
        }
    }

    #[test]
    fn snippet_keeps_rolling_hash_and_truncation() {
        let text = client_snippet();
        assert!(text.contains("((hash << 5) - hash) + char"));
        assert!(text.contains("'anonymous'"));
        assert!(text.contains(".substring(0, 32)"));
    }

    #[test]
    fn blank_lines_keep_their_indentation() {
        let blanks: Vec<&str> = client_snippet()
            .lines()
            .filter(|line| !line.is_empty() && line.trim().is_empty())
            .collect();
        assert_eq!(blanks, ["    "; 3]);
        assert!(client_snippet().starts_with("\nfunction() {\n"));
        assert!(client_snippet().ends_with("\n}\n"));
    }

    #[test]
    fn snippet_is_stable_between_calls() {
        assert!(std::ptr::eq(client_snippet(), client_snippet()));
    }
}
