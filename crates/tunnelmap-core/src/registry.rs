//! Session-wide store of declared tunnels.

use crate::config::Config;
use crate::tunnel::{TunnelError, TunnelGroup, REVERSED_SUFFIX};

/// Key holding the id counter in the saved registry.
const NEXT_ID_KEY: &str = "next_teleport_group_id";

/// Tunnels declared by scenario events, plus the id counter used to name
/// tunnels that were declared without an id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TunnelRegistry {
    tunnels: Vec<TunnelGroup>,
    next_id: u64,
}

impl TunnelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a registry from its saved form.
    ///
    /// Records without `saved=yes` were written directly into a scenario
    /// instead of an event or ability; they are reported and skipped. Any
    /// other invalid record fails the whole load.
    pub fn from_config(cfg: &Config) -> Result<Self, TunnelError> {
        let mut registry = Self {
            tunnels: Vec::new(),
            next_id: cfg.get_int(NEXT_ID_KEY, 0).max(0) as u64,
        };

        for record in cfg.children("tunnel") {
            if !record.get_bool("saved", false) {
                log::error!(
                    "Do not use [tunnel] directly in a [scenario]. Use it in an [event] or [abilities] tag."
                );
                continue;
            }
            registry.add(TunnelGroup::from_persisted(record)?);
        }

        Ok(registry)
    }

    /// Append a tunnel. Ids are not checked for uniqueness.
    pub fn add(&mut self, group: TunnelGroup) {
        log::debug!("adding tunnel '{}'", group.id());
        self.tunnels.push(group);
    }

    /// Remove both directions of the tunnel `id`.
    ///
    /// Returns the number of groups removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let reversed_id = format!("{id}{REVERSED_SUFFIX}");
        let before = self.tunnels.len();
        self.tunnels.retain(|t| t.id() != id && t.id() != reversed_id);
        let removed = before - self.tunnels.len();
        log::debug!("removed {} group(s) for tunnel '{}'", removed, id);
        removed
    }

    /// Draw a fresh id from the counter.
    pub fn next_unique_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    /// Current counter value.
    pub fn last_id(&self) -> u64 {
        self.next_id
    }

    /// All tunnels, in declaration order.
    pub fn tunnels(&self) -> &[TunnelGroup] {
        &self.tunnels
    }

    /// First tunnel with the given id.
    pub fn get(&self, id: &str) -> Option<&TunnelGroup> {
        self.tunnels.iter().find(|t| t.id() == id)
    }

    /// Number of tunnels.
    pub fn len(&self) -> usize {
        self.tunnels.len()
    }

    /// Check if there are no tunnels.
    pub fn is_empty(&self) -> bool {
        self.tunnels.is_empty()
    }

    /// Saved form, accepted by [`TunnelRegistry::from_config`].
    pub fn to_config(&self) -> Config {
        let mut cfg = Config::new();
        for tunnel in &self.tunnels {
            cfg.add_child("tunnel", tunnel.to_config());
        }
        cfg.set(NEXT_ID_KEY, self.next_id);
        cfg
    }
}
