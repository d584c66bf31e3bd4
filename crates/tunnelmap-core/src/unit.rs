//! Units, their abilities, and the unit layer of the board.

use crate::config::Config;
use crate::hex::{coord_keyed, HexCoord};
use crate::types::{SideId, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ability kind whose `tunnel` children grant teleport edges.
pub const TELEPORT_ABILITY: &str = "teleport";

/// A unit on the game map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Owning side.
    pub side: SideId,
    /// Unit type name, as matched by `type=` filters.
    pub unit_type: String,
    /// Current position on the map.
    pub position: HexCoord,
    /// Hidden units are invisible to enemies even on clear tiles.
    pub hidden: bool,
    /// Abilities granted to this unit.
    pub abilities: Vec<Ability>,
}

impl Unit {
    /// Create a new unit with no abilities.
    pub fn new(id: &str, side: SideId, unit_type: &str, position: HexCoord) -> Self {
        Self {
            id: id.to_string(),
            side,
            unit_type: unit_type.to_string(),
            position,
            hidden: false,
            abilities: Vec::new(),
        }
    }

    /// Builder helper to grant an ability.
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Definitions of every ability of the given kind.
    pub fn abilities<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Config> + 'a {
        self.abilities
            .iter()
            .filter(move |a| a.kind == kind)
            .map(|a| &a.cfg)
    }

    /// Check if the unit has at least one ability of the given kind.
    pub fn has_ability(&self, kind: &str) -> bool {
        self.abilities(kind).next().is_some()
    }
}

/// An ability definition attached to a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Ability kind, e.g. `teleport`.
    pub kind: String,
    /// Ability body.
    pub cfg: Config,
}

impl Ability {
    /// Create a new ability.
    pub fn new(kind: &str, cfg: Config) -> Self {
        Self {
            kind: kind.to_string(),
            cfg,
        }
    }

    /// A teleport ability with one `tunnel` child per given block.
    pub fn teleport(tunnels: impl IntoIterator<Item = Config>) -> Self {
        let cfg = tunnels
            .into_iter()
            .fold(Config::new(), |cfg, tunnel| cfg.with_child("tunnel", tunnel));
        Self::new(TELEPORT_ABILITY, cfg)
    }
}

/// All units on the board, indexed by position. At most one unit per hex.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UnitMap {
    #[serde(with = "coord_keyed")]
    units: HashMap<HexCoord, Unit>,
}

impl UnitMap {
    /// Create an empty unit layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a unit at its position, returning any unit it displaced.
    pub fn insert(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit.position, unit)
    }

    /// Remove the unit at a location.
    pub fn remove(&mut self, loc: &HexCoord) -> Option<Unit> {
        self.units.remove(loc)
    }

    /// The unit standing at a location.
    pub fn get(&self, loc: &HexCoord) -> Option<&Unit> {
        self.units.get(loc)
    }

    /// Find a unit by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Unit> {
        self.units.values().find(|u| u.id == id)
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if there are no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterate over all units.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }
}
