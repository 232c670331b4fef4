//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};
use crate::error::{Error, Result};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    /// Per port+method queue of interactions, in recorded order.
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    /// Per port+method cursor tracking position.
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the cassette has no (more) interactions
    /// for the given port/method combination. The message lists what was
    /// requested and what the cassette holds.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction> {
        let key = PortMethodKey {
            port: port.to_string(),
            method: method.to_string(),
        };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> = self
                .queues
                .keys()
                .map(|k| format!("{}::{}", k.port, k.method))
                .collect();
            available.sort();
            return Err(Error::Cassette(format!(
                "no interactions recorded for port={port:?} method={method:?}; \
                 available port::method pairs: [{}]",
                available.join(", ")
            )));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        let Some(interaction) = queue.get(*cursor) else {
            return Err(Error::Cassette(format!(
                "all {count} interactions for port={port:?} method={method:?} have been \
                 consumed; last interaction was seq={last_seq}",
                count = queue.len(),
                last_seq = queue.last().map_or(0, |i| i.seq),
            )));
        };
        *cursor += 1;
        Ok(interaction)
    }
}
