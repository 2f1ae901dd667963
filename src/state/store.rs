use crate::state::snapshot::PlayerSnapshot;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashMap;

/// A stored snapshot plus the server-side time it arrived.
#[derive(Clone, Debug)]
struct StoredSnapshot {
    snapshot: PlayerSnapshot,
    received_at: DateTime<Utc>,
}

/// Listing row for the agents overview: who has reported, and when last.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSummary {
    pub name: String,
    pub last_seen: DateTime<Utc>,
}

/// Concurrent map from agent name to its latest snapshot.
///
/// Writes replace the whole document for a key; reads hand out clones, so a
/// snapshot already returned to a caller can never change under it.
/// Consistency is per key: a read racing a publish sees that agent's
/// snapshot entirely before or entirely after the publish, never a mix of
/// the two. There is no deletion; an agent that stops reporting stays
/// visible with its last snapshot until the process exits.
pub struct StateStore {
    /// Lock-free concurrent map for fast reads
    players: DashMap<String, StoredSnapshot>,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            players: DashMap::new(),
        }
    }

    /// Install `snapshot` as the sole current state for its agent.
    ///
    /// Returns the displaced snapshot if the agent had reported before.
    pub fn replace(&self, snapshot: PlayerSnapshot) -> Option<PlayerSnapshot> {
        let name = snapshot.name.clone();
        let stored = StoredSnapshot {
            snapshot,
            received_at: Utc::now(),
        };
        self.players.insert(name, stored).map(|prev| prev.snapshot)
    }

    /// Latest snapshot for one agent, or None if it never reported.
    pub fn get(&self, name: &str) -> Option<PlayerSnapshot> {
        self.players.get(name).map(|e| e.snapshot.clone())
    }

    /// Copy of every agent's current snapshot, keyed by agent name.
    ///
    /// Each value is internally consistent; the map as a whole is not a
    /// frozen moment across agents, since publishes may land between shard
    /// visits.
    pub fn read_all(&self) -> HashMap<String, PlayerSnapshot> {
        self.players
            .iter()
            .map(|e| (e.key().clone(), e.value().snapshot.clone()))
            .collect()
    }

    /// All known agents with their last report time, sorted by name.
    pub fn agents(&self) -> Vec<AgentSummary> {
        let mut agents: Vec<AgentSummary> = self
            .players
            .iter()
            .map(|e| AgentSummary {
                name: e.key().clone(),
                last_seen: e.value().received_at,
            })
            .collect();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        agents
    }

    /// Number of agents that have reported at least once.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
