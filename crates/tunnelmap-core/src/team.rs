//! Teams: fog of war and alliances.
//!
//! # Visibility Rules
//!
//! - With fog disabled every location is clear
//! - With fog enabled only locations in the team's vision set are clear
//! - A side is an enemy unless it is the team's own side or an ally

use crate::hex::HexCoord;
use crate::map::Map;
use crate::types::{LocationSet, SideId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One side's view of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The side this team plays.
    pub side: SideId,
    /// Is fog of war active for this team?
    pub fog: bool,
    /// Locations currently inside the team's vision.
    vision: LocationSet,
    /// Allied sides.
    allies: HashSet<SideId>,
}

impl Team {
    /// Create a team with fog enabled and nothing in vision.
    pub fn new(side: SideId) -> Self {
        Self {
            side,
            fog: true,
            vision: LocationSet::new(),
            allies: HashSet::new(),
        }
    }

    /// Create a team that sees the whole map.
    pub fn without_fog(side: SideId) -> Self {
        Self {
            fog: false,
            ..Self::new(side)
        }
    }

    /// Builder helper to add an ally.
    pub fn with_ally(mut self, side: SideId) -> Self {
        self.add_ally(side);
        self
    }

    /// Mark another side as allied.
    pub fn add_ally(&mut self, side: SideId) {
        if side != self.side {
            self.allies.insert(side);
        }
    }

    /// Break an alliance.
    pub fn remove_ally(&mut self, side: SideId) {
        self.allies.remove(&side);
    }

    /// Check whether `side` is hostile to this team.
    pub fn is_enemy(&self, side: SideId) -> bool {
        side != self.side && !self.allies.contains(&side)
    }

    /// Check whether a location is currently hidden by fog.
    pub fn fogged(&self, loc: &HexCoord) -> bool {
        self.fog && !self.vision.contains(loc)
    }

    /// Add a single location to the team's vision.
    pub fn reveal(&mut self, loc: HexCoord) {
        self.vision.insert(loc);
    }

    /// Reveal every on-map location within `radius` of `center`.
    pub fn clear_fog_around(&mut self, center: &HexCoord, radius: u32, map: &Map) {
        for coord in center.hexes_in_radius(radius) {
            if map.in_bounds(&coord) {
                self.vision.insert(coord);
            }
        }
    }

    /// Forget all vision (start of a new fog pass).
    pub fn reset_vision(&mut self) {
        self.vision.clear();
    }

    /// All locations currently in vision.
    pub fn vision(&self) -> &LocationSet {
        &self.vision
    }
}
