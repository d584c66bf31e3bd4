//! Core type aliases used throughout the crate.

use crate::hex::HexCoord;
use std::collections::HashSet;

/// Side (team) number. Sides start at 1.
pub type SideId = u32;

/// Unique identifier for a unit.
pub type UnitId = String;

/// Identifier of a tunnel group.
pub type TunnelId = String;

/// A set of map locations.
pub type LocationSet = HashSet<HexCoord>;
