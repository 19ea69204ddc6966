//! Deduplication event IDs for Conversions API events.
//!
//! The same logical conversion is usually reported twice: once by the
//! browser tag and once by the server. The ad platform drops the second
//! report when both carry the same event ID, so the ID has to be derivable
//! on both sides from data both sides already have.
//!
//! Two strategies are offered:
//!
//! - [`Method::Hash`]: `sha256("{event}_{user}_{timestamp}")`, first 32 hex
//!   digits. Deterministic; the one to use for deduplication.
//! - [`Method::Uuid`]: `"{event}_{random hex}"`, capped at 64 characters.
//!   Unique per call, so it can never deduplicate across systems.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::adapters::live::{LiveClock, LiveIdGenerator};
use crate::context::ServiceContext;
use crate::ports::{Clock, IdGenerator};

/// Stand-in user identifier when none is supplied.
pub const ANONYMOUS: &str = "anonymous";

/// Upper bound on the length of any event ID, in characters.
pub const MAX_EVENT_ID_LEN: usize = 64;

/// Length of a hash-method event ID, in hex digits.
pub const HASH_ID_LEN: usize = 32;

/// How an event ID is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Truncated SHA-256 of the event descriptor.
    #[default]
    Hash,
    /// Event name plus a random v4 UUID.
    Uuid,
}

impl Method {
    /// Interprets a method name. `"uuid"` selects [`Method::Uuid`]; anything
    /// else, unknown names included, selects [`Method::Hash`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == "uuid" {
            Self::Uuid
        } else {
            Self::Hash
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Uuid => "uuid",
        }
    }
}

impl FromStr for Method {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inputs an event ID is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Conversion type, e.g. `"purchase"`. Not validated.
    pub event_name: String,
    /// User ID, hashed email, or session ID. `None` means anonymous.
    pub user_identifier: Option<String>,
    /// Unix seconds. `None` means "now" at generation time.
    pub timestamp: Option<i64>,
}

impl EventDescriptor {
    /// Describes an anonymous event happening now.
    pub fn new(event_name: impl Into<String>) -> Self {
        Self { event_name: event_name.into(), user_identifier: None, timestamp: None }
    }

    /// Attaches a user identifier.
    #[must_use]
    pub fn with_user(mut self, user_identifier: impl Into<String>) -> Self {
        self.user_identifier = Some(user_identifier.into());
        self
    }

    /// Attaches an explicit timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The user identifier that goes into the hash. Empty counts as absent.
    #[must_use]
    pub fn resolved_user(&self) -> &str {
        resolve_user(self.user_identifier.as_deref())
    }
}

/// Generates event IDs against an injected clock and random-ID source.
#[derive(Clone, Copy)]
pub struct EventIdGenerator<'a> {
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> EventIdGenerator<'a> {
    /// Builds a generator over the given ports.
    #[must_use]
    pub fn new(clock: &'a dyn Clock, ids: &'a dyn IdGenerator) -> Self {
        Self { clock, ids }
    }

    /// Builds a generator over a service context's ports.
    #[must_use]
    pub fn from_context(ctx: &'a ServiceContext) -> Self {
        Self::new(ctx.clock.as_ref(), ctx.id_gen.as_ref())
    }

    /// Generates an event ID. Never fails; any text is accepted.
    #[must_use]
    pub fn generate(
        &self,
        event_name: &str,
        user_identifier: Option<&str>,
        timestamp: Option<i64>,
        method: Method,
    ) -> String {
        let timestamp = timestamp.unwrap_or_else(|| self.clock.unix_seconds());

        let id = match method {
            Method::Uuid => {
                let unique = self.ids.generate_id();
                truncate_chars(&format!("{event_name}_{unique}"), MAX_EVENT_ID_LEN)
            }
            Method::Hash => {
                hash_event_id(&composite_key(event_name, resolve_user(user_identifier), timestamp))
            }
        };

        tracing::debug!(event_name, %method, timestamp, event_id = %id, "generated event id");
        id
    }

    /// Generates an event ID for a descriptor.
    #[must_use]
    pub fn generate_for(&self, event: &EventDescriptor, method: Method) -> String {
        self.generate(&event.event_name, event.user_identifier.as_deref(), event.timestamp, method)
    }
}

/// Generates an event ID using the system clock and `uuid` v4.
///
/// ```
/// use capi_event_id::{generate_event_id, Method};
///
/// let id = generate_event_id("purchase", Some("user123"), Some(1_703_980_800), Method::Hash);
/// assert_eq!(id, "31a99ceb613ba06947d0e7204e4ae6f0");
/// ```
#[must_use]
pub fn generate_event_id(
    event_name: &str,
    user_identifier: Option<&str>,
    timestamp: Option<i64>,
    method: Method,
) -> String {
    EventIdGenerator::new(&LiveClock, &LiveIdGenerator).generate(
        event_name,
        user_identifier,
        timestamp,
        method,
    )
}

/// The string both sides hash: `"{event}_{user}_{timestamp}"`.
#[must_use]
pub fn composite_key(event_name: &str, user_identifier: &str, timestamp: i64) -> String {
    format!("{event_name}_{user_identifier}_{timestamp}")
}

/// First [`HASH_ID_LEN`] lowercase hex digits of SHA-256 over `raw`.
#[must_use]
pub fn hash_event_id(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    let mut hex = format!("{digest:x}");
    hex.truncate(HASH_ID_LEN);
    hex
}

fn resolve_user(user_identifier: Option<&str>) -> &str {
    match user_identifier {
        Some(user) if !user.is_empty() => user,
        _ => ANONYMOUS,
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::FixedClock;

    struct CountingIds(std::sync::atomic::AtomicU32);

    impl IdGenerator for CountingIds {
        fn generate_id(&self) -> String {
            let n = self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            format!("{n:032x}")
        }
    }

    fn counting() -> CountingIds {
        CountingIds(std::sync::atomic::AtomicU32::new(0))
    }

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn debug_log_omits_user_identifier() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let clock = FixedClock::from_unix(1_703_980_800);
        let ids = counting();
        let gen = EventIdGenerator::new(&clock, &ids);
        let user = "jane.doe@example.com";

        let (hashed, random) = tracing::subscriber::with_default(subscriber, || {
            (
                gen.generate("purchase", Some(user), None, Method::Hash),
                gen.generate("purchase", Some(user), None, Method::Uuid),
            )
        });

        let text = logs.text();
        assert_eq!(text.matches("generated event id").count(), 2, "{text}");
        assert!(text.contains(&hashed), "{text}");
        assert!(text.contains(&random), "{text}");
        assert!(text.contains("purchase"), "{text}");
        assert!(!text.contains(user), "{text}");
        assert!(!text.contains("jane.doe"), "{text}");
    }

    #[test]
    fn known_purchase_digest() {
        // sha256("purchase_user123_1703980800"), checked with sha256sum
        let id = generate_event_id("purchase", Some("user123"), Some(1_703_980_800), Method::Hash);
        assert_eq!(id, "31a99ceb613ba06947d0e7204e4ae6f0");
    }

    #[test]
    fn hash_is_deterministic() {
        let a = generate_event_id("lead", Some("u-9"), Some(1_700_000_000), Method::Hash);
        let b = generate_event_id("lead", Some("u-9"), Some(1_700_000_000), Method::Hash);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_changes_with_each_input() {
        let base = generate_event_id("lead", Some("u-9"), Some(1), Method::Hash);
        assert_ne!(base, generate_event_id("signup", Some("u-9"), Some(1), Method::Hash));
        assert_ne!(base, generate_event_id("lead", Some("u-8"), Some(1), Method::Hash));
        assert_ne!(base, generate_event_id("lead", Some("u-9"), Some(2), Method::Hash));
    }

    #[test]
    fn hash_output_is_32_lowercase_hex() {
        for (name, user) in [("purchase", Some("a@b.c")), ("", None), ("ünïcødé 🎉", Some(""))] {
            let id = generate_event_id(name, user, Some(-5), Method::Hash);
            assert_eq!(id.len(), HASH_ID_LEN, "{name:?}");
            assert!(is_lower_hex(&id), "{id}");
        }
    }

    #[test]
    fn missing_user_means_anonymous() {
        let omitted = generate_event_id("purchase", None, Some(1_703_980_800), Method::Hash);
        let explicit =
            generate_event_id("purchase", Some(ANONYMOUS), Some(1_703_980_800), Method::Hash);
        assert_eq!(omitted, explicit);
        // sha256("purchase_anonymous_1703980800")
        assert_eq!(omitted, "425af13791a686984606955fed86fd2d");
    }

    #[test]
    fn empty_user_means_anonymous() {
        let empty = generate_event_id("purchase", Some(""), Some(10), Method::Hash);
        let omitted = generate_event_id("purchase", None, Some(10), Method::Hash);
        assert_eq!(empty, omitted);
    }

    #[test]
    fn missing_timestamp_comes_from_clock() {
        let clock = FixedClock::from_unix(1_703_980_800);
        let ids = counting();
        let gen = EventIdGenerator::new(&clock, &ids);

        let first = gen.generate("signup", None, None, Method::Hash);
        let second = gen.generate("signup", None, None, Method::Hash);

        assert_eq!(first, second);
        assert_eq!(
            first,
            gen.generate("signup", Some(ANONYMOUS), Some(1_703_980_800), Method::Hash)
        );
        // sha256("signup_anonymous_1703980800")
        assert_eq!(first, "cd73900f769d8c253d490e0a7227f025");
    }

    #[test]
    fn explicit_timestamp_ignores_clock() {
        let ids = counting();
        let early_clock = FixedClock::from_unix(1);
        let late_clock = FixedClock::from_unix(2_000_000_000);
        let early = EventIdGenerator::new(&early_clock, &ids);
        let late = EventIdGenerator::new(&late_clock, &ids);
        assert_eq!(
            early.generate("purchase", Some("user123"), Some(1_703_980_800), Method::Hash),
            late.generate("purchase", Some("user123"), Some(1_703_980_800), Method::Hash),
        );
    }

    #[test]
    fn uuid_prefixes_event_name() {
        let clock = FixedClock::from_unix(0);
        let ids = counting();
        let gen = EventIdGenerator::new(&clock, &ids);

        let id = gen.generate("purchase", Some("user123"), None, Method::Uuid);
        assert_eq!(id, format!("purchase_{:032x}", 0));
    }

    #[test]
    fn uuid_is_random_per_call() {
        let a = generate_event_id("purchase", Some("user123"), Some(1), Method::Uuid);
        let b = generate_event_id("purchase", Some("user123"), Some(1), Method::Uuid);
        assert_ne!(a, b);
        assert!(a.starts_with("purchase_"));
        assert_eq!(a.len(), "purchase_".len() + 32);
    }

    #[test]
    fn uuid_is_capped_at_64_chars() {
        let long_name = "x".repeat(50);
        let id = generate_event_id(&long_name, None, None, Method::Uuid);
        assert_eq!(id.chars().count(), MAX_EVENT_ID_LEN);
        assert!(id.starts_with(&format!("{long_name}_")));

        let huge_name = "y".repeat(100);
        let id = generate_event_id(&huge_name, None, None, Method::Uuid);
        assert_eq!(id, "y".repeat(MAX_EVENT_ID_LEN));
    }

    #[test]
    fn uuid_truncation_respects_char_boundaries() {
        let name = "é".repeat(40);
        let id = generate_event_id(&name, None, None, Method::Uuid);
        assert_eq!(id.chars().count(), MAX_EVENT_ID_LEN);
    }

    #[test]
    fn method_parsing_defaults_to_hash() {
        assert_eq!(Method::parse("uuid"), Method::Uuid);
        assert_eq!(Method::parse("hash"), Method::Hash);
        assert_eq!(Method::parse("UUID"), Method::Hash);
        assert_eq!(Method::parse("whatever"), Method::Hash);
        assert_eq!("uuid".parse::<Method>(), Ok(Method::Uuid));
        assert_eq!(Method::default(), Method::Hash);
        assert_eq!(Method::Uuid.to_string(), "uuid");
    }

    #[test]
    fn descriptor_builds_and_resolves() {
        let clock = FixedClock::from_unix(1_703_980_800);
        let ids = counting();
        let gen = EventIdGenerator::new(&clock, &ids);

        let event = EventDescriptor::new("purchase").with_user("user123").at(1_703_980_800);
        assert_eq!(event.resolved_user(), "user123");
        assert_eq!(gen.generate_for(&event, Method::Hash), "31a99ceb613ba06947d0e7204e4ae6f0");

        let anon = EventDescriptor::new("purchase").with_user("");
        assert_eq!(anon.resolved_user(), ANONYMOUS);
    }

    #[test]
    fn composite_key_layout() {
        assert_eq!(
            composite_key("purchase", "user123", 1_703_980_800),
            "purchase_user123_1703980800"
        );
        assert_eq!(composite_key("", "", 0), "__0");
    }
}
