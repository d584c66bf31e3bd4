//! World contexts seen by filters.
//!
//! Filters read the world through [`DisplayContext`]. [`GameBoard`] is the
//! live implementation; [`IgnoreUnitsContext`] wraps any other context and
//! hides its unit layer, so terrain-only matching is not blocked by units
//! while map, teams, labels and time of day stay untouched.

use crate::hex::HexCoord;
use crate::map::Map;
use crate::team::Team;
use crate::terrain::TimeOfDay;
use crate::types::SideId;
use crate::unit::{Unit, UnitMap};
use serde::{Deserialize, Serialize};

/// Read-only view of the world used by filter evaluation.
pub trait DisplayContext {
    /// The unit layer.
    fn units(&self) -> &UnitMap;
    /// The terrain map.
    fn map(&self) -> &Map;
    /// All teams.
    fn teams(&self) -> &[Team];
    /// Label categories hidden from display.
    fn hidden_label_categories(&self) -> &[String];
    /// Current time of day.
    fn time_of_day(&self) -> TimeOfDay;

    /// Team playing the given side.
    fn team(&self, side: SideId) -> Option<&Team> {
        self.teams().iter().find(|t| t.side == side)
    }

    /// Unit standing at `loc`, regardless of who can see it.
    fn unit_at(&self, loc: &HexCoord) -> Option<&Unit> {
        self.units().get(loc)
    }

    /// Unit standing at `loc` as far as `viewer` can tell.
    ///
    /// Nothing is visible under fog, and hidden units are invisible to their
    /// enemies.
    fn visible_unit_at(&self, loc: &HexCoord, viewer: &Team) -> Option<&Unit> {
        if viewer.fogged(loc) {
            return None;
        }
        let unit = self.units().get(loc)?;
        if unit.hidden && viewer.is_enemy(unit.side) {
            return None;
        }
        Some(unit)
    }
}

/// The live board: map, units, teams and global state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameBoard {
    /// The terrain map.
    pub map: Map,
    /// All units on the map.
    pub units: UnitMap,
    /// All teams, one per side.
    pub teams: Vec<Team>,
    /// Label categories hidden from display.
    pub hidden_labels: Vec<String>,
    /// Current time of day.
    pub time_of_day: TimeOfDay,
}

impl GameBoard {
    /// Create a board over a map with no units or teams.
    pub fn new(map: Map) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    /// Add a team. A team for an existing side replaces the old one.
    pub fn add_team(&mut self, team: Team) {
        match self.teams.iter_mut().find(|t| t.side == team.side) {
            Some(existing) => *existing = team,
            None => self.teams.push(team),
        }
    }

    /// Mutable access to a side's team.
    pub fn team_mut(&mut self, side: SideId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.side == side)
    }

    /// Place a unit at its position.
    pub fn place_unit(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit)
    }

    /// Recompute every fogged team's vision from its own units.
    pub fn recalculate_vision(&mut self, vision_range: u32) {
        for team in self.teams.iter_mut().filter(|t| t.fog) {
            let side = team.side;
            team.reset_vision();
            for unit in self.units.iter().filter(|u| u.side == side) {
                team.clear_fog_around(&unit.position, vision_range, &self.map);
            }
        }
    }
}

impl DisplayContext for GameBoard {
    fn units(&self) -> &UnitMap {
        &self.units
    }

    fn map(&self) -> &Map {
        &self.map
    }

    fn teams(&self) -> &[Team] {
        &self.teams
    }

    fn hidden_label_categories(&self) -> &[String] {
        &self.hidden_labels
    }

    fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }
}

/// A context that delegates to another one but has no units.
pub struct IgnoreUnitsContext<'a> {
    inner: &'a dyn DisplayContext,
    empty: UnitMap,
}

impl<'a> IgnoreUnitsContext<'a> {
    /// Wrap a context.
    pub fn new(inner: &'a dyn DisplayContext) -> Self {
        Self {
            inner,
            empty: UnitMap::new(),
        }
    }
}

impl DisplayContext for IgnoreUnitsContext<'_> {
    fn units(&self) -> &UnitMap {
        &self.empty
    }

    fn map(&self) -> &Map {
        self.inner.map()
    }

    fn teams(&self) -> &[Team] {
        self.inner.teams()
    }

    fn hidden_label_categories(&self) -> &[String] {
        self.inner.hidden_label_categories()
    }

    fn time_of_day(&self) -> TimeOfDay {
        self.inner.time_of_day()
    }
}
