use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub connected: bool,
}

/// Ordered roster keyed by exact display name.
///
/// Insertion order is kept for display. Rosters are small (a handful of
/// contestants), so lookups are a linear scan.
#[derive(Clone, Debug, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

/// Names made only of whitespace are not names.
#[inline]
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` with `connected = false`.
    ///
    /// Blank and duplicate names are benign no-ops; returns `true` only when the
    /// roster grew.
    pub fn add(&mut self, name: &str) -> bool {
        if !is_valid_name(name) || self.contains(name) {
            return false;
        }
        self.players.push(Player {
            name: name.to_string(),
            connected: false,
        });
        true
    }

    /// Mark `name` connected. Unknown names are ignored (stale client state).
    ///
    /// Returns `true` only on the false -> true edge.
    pub fn connect(&mut self, name: &str) -> bool {
        match self.players.iter_mut().find(|p| p.name == name) {
            Some(p) if !p.connected => {
                p.connected = true;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Names not yet claimed by a client, in insertion order.
    pub fn available(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| !p.connected)
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
