//! Terrain types and the time-of-day schedule.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Base terrain type for a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Grassland,
    Forest,
    Hills,
    Mountains,
    Cave,
    Castle,
    Village,
    Shallows,
    Ocean,
}

impl Terrain {
    /// Lowercase name as written in filters.
    pub const fn name(&self) -> &'static str {
        match self {
            Terrain::Grassland => "grassland",
            Terrain::Forest => "forest",
            Terrain::Hills => "hills",
            Terrain::Mountains => "mountains",
            Terrain::Cave => "cave",
            Terrain::Castle => "castle",
            Terrain::Village => "village",
            Terrain::Shallows => "shallows",
            Terrain::Ocean => "ocean",
        }
    }

    /// Check if this is a water terrain type.
    pub const fn is_water(&self) -> bool {
        matches!(self, Terrain::Shallows | Terrain::Ocean)
    }

    /// Get all terrain variants.
    pub const fn all() -> &'static [Terrain] {
        &[
            Terrain::Grassland,
            Terrain::Forest,
            Terrain::Hills,
            Terrain::Mountains,
            Terrain::Cave,
            Terrain::Castle,
            Terrain::Village,
            Terrain::Shallows,
            Terrain::Ocean,
        ]
    }
}

impl FromStr for Terrain {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Terrain::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Phase of the day/night cycle.
///
/// Part of the global state a filter may consult; it is kept even when the
/// unit layer is swapped out for terrain-only matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Dawn,
    #[default]
    Morning,
    Afternoon,
    Dusk,
    FirstWatch,
    SecondWatch,
    Underground,
}

impl TimeOfDay {
    /// Identifier as written in filters.
    pub const fn id(&self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::FirstWatch => "first_watch",
            TimeOfDay::SecondWatch => "second_watch",
            TimeOfDay::Underground => "underground",
        }
    }

    /// The next phase in the daily cycle. Underground never changes.
    pub const fn next(&self) -> TimeOfDay {
        match self {
            TimeOfDay::Dawn => TimeOfDay::Morning,
            TimeOfDay::Morning => TimeOfDay::Afternoon,
            TimeOfDay::Afternoon => TimeOfDay::Dusk,
            TimeOfDay::Dusk => TimeOfDay::FirstWatch,
            TimeOfDay::FirstWatch => TimeOfDay::SecondWatch,
            TimeOfDay::SecondWatch => TimeOfDay::Dawn,
            TimeOfDay::Underground => TimeOfDay::Underground,
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
