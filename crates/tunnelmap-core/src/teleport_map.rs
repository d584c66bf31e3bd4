//! The adjacency index built from tunnel groups for one unit.
//!
//! A [`TeleportMap`] is built fresh for every query and handed to the path
//! search, which asks it for the extra exits of each location it expands.
//!
//! # Masking
//!
//! Each group's resolved pair passes through, in order:
//!
//! 1. the vision gate: vision queries skip groups that do not carry vision
//! 2. the fog mask: a viewer hostile to the unit only learns about tunnel
//!    endpoints it can see, unless the group is always visible
//! 3. the occupancy mask: groups that do not pass units lose every target
//!    with a unit on it, as far as the query can see
//!
//! Merging is a set union, so the final map does not depend on the order in
//! which groups are listed.

use crate::context::DisplayContext;
use crate::filter::FilterEvaluator;
use crate::hex::HexCoord;
use crate::team::Team;
use crate::tunnel::{TeleportPair, TunnelGroup};
use crate::types::LocationSet;
use crate::unit::Unit;
use std::collections::HashMap;

/// Modifiers for one adjacency query. All default to off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeleportQuery {
    /// Omniscient view: no fog mask, unconditional occupancy.
    pub see_all: bool,
    /// Resolve terrain-only, as if no units stood on the map.
    pub ignore_units: bool,
    /// Resolve for vision rather than movement.
    pub check_vision: bool,
}

impl TeleportQuery {
    /// An omniscient movement query.
    pub fn see_all() -> Self {
        Self {
            see_all: true,
            ..Self::default()
        }
    }

    /// A vision query.
    pub fn vision() -> Self {
        Self {
            check_vision: true,
            ..Self::default()
        }
    }
}

/// Tunnel edges available to one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeleportMap {
    edges: HashMap<HexCoord, LocationSet>,
    sources: LocationSet,
    targets: LocationSet,
    empty: LocationSet,
}

impl TeleportMap {
    /// Build the map for `unit` as seen by `viewing_team`.
    pub fn build(
        groups: &[TunnelGroup],
        unit: &Unit,
        viewing_team: &Team,
        query: TeleportQuery,
        ctx: &dyn DisplayContext,
        filters: &dyn FilterEvaluator,
    ) -> Self {
        let mut map = Self::default();

        for group in groups {
            if query.check_vision && !group.allow_vision() {
                continue;
            }

            let mut pair = group.resolve(unit, query.ignore_units, ctx, filters);

            if !query.see_all && !group.always_visible() && viewing_team.is_enemy(unit.side) {
                pair.first.retain(|loc| !viewing_team.fogged(loc));
                pair.second.retain(|loc| !viewing_team.fogged(loc));
            }

            if !group.pass_allied_units() && !query.ignore_units && !query.check_vision {
                pair.second.retain(|loc| {
                    let occupant = if query.see_all {
                        ctx.unit_at(loc)
                    } else {
                        ctx.visible_unit_at(loc, viewing_team)
                    };
                    occupant.is_none()
                });
            }

            map.insert_pair(pair);
        }

        map
    }

    /// Add every edge of a resolved pair.
    pub fn insert_pair(&mut self, pair: TeleportPair) {
        for source in &pair.first {
            self.edges
                .entry(*source)
                .or_default()
                .extend(pair.second.iter().copied());
        }
        self.sources.extend(pair.first);
        self.targets.extend(pair.second);
    }

    /// Merge another map into this one.
    pub fn union(&mut self, other: TeleportMap) {
        for (source, exits) in other.edges {
            self.edges.entry(source).or_default().extend(exits);
        }
        self.sources.extend(other.sources);
        self.targets.extend(other.targets);
    }

    /// Tunnel exits reachable from `loc`. Empty when there are none.
    pub fn get_adjacents(&self, loc: &HexCoord) -> &LocationSet {
        self.edges.get(loc).unwrap_or(&self.empty)
    }

    /// Ordinary neighbours of `loc` followed by its tunnel exits.
    ///
    /// Exits already among the neighbours are not repeated.
    pub fn neighbors_of(
        &self,
        loc: &HexCoord,
        base: impl IntoIterator<Item = HexCoord>,
    ) -> Vec<HexCoord> {
        let mut result: Vec<HexCoord> = base.into_iter().collect();
        let mut exits: Vec<HexCoord> = self
            .get_adjacents(loc)
            .iter()
            .filter(|exit| !result.contains(*exit))
            .copied()
            .collect();
        exits.sort();
        result.extend(exits);
        result
    }

    /// Every location with at least one tunnel entrance.
    pub fn sources(&self) -> &LocationSet {
        &self.sources
    }

    /// Every location reachable through some tunnel.
    pub fn targets(&self) -> &LocationSet {
        &self.targets
    }

    /// Number of locations with outgoing tunnel edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the map has no sources and no targets.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.targets.is_empty()
    }
}
