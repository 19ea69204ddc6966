//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Serves a cassette's interactions sequentially per port/method pair.
///
/// Each adapter owns its own replayer, so the clock and the ID generator
/// advance independently even when they share one cassette.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, VecDeque<Interaction>>,
    consumed: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push_back(interaction.clone());
        }
        Self { queues, consumed: HashMap::new() }
    }

    /// Number of interactions not yet served for the given port and method.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };
        self.queues.get(&key).map_or(0, VecDeque::len)
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };
        let consumed = self.consumed.get(&key).copied().unwrap_or(0);

        if !self.queues.contains_key(&key) {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }

        let queue = self.queues.entry(key.clone()).or_default();
        let Some(interaction) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all {consumed} interactions for port={port:?} \
                 method={method:?} have been consumed."
            );
        };

        self.consumed.insert(key, consumed + 1);
        interaction
    }
}
