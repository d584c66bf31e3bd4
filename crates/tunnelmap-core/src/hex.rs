//! Hex locations on the game map.
//!
//! Uses offset "odd-q" coordinates where odd columns are shifted down. A
//! location carries no meaning beyond its identity; the tunnel system only
//! hashes, compares and measures distances between them.

use serde::{Deserialize, Serialize};

/// A location on the hex grid (offset odd-q).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct HexCoord {
    /// Column coordinate
    pub q: i32,
    /// Row coordinate
    pub r: i32,
}

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Row-major ordering for deterministic iteration
        (self.r, self.q).cmp(&(other.r, other.q))
    }
}

impl HexCoord {
    /// Create a new hex coordinate.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Distance to another hex in hex steps.
    pub fn distance(&self, other: &HexCoord) -> u32 {
        let (x1, y1, z1) = self.to_cube();
        let (x2, y2, z2) = other.to_cube();

        (x1 - x2).abs().max((y1 - y2).abs()).max((z1 - z2).abs()) as u32
    }

    /// Convert offset coordinates to cube coordinates (x + y + z = 0).
    pub fn to_cube(&self) -> (i32, i32, i32) {
        let x = self.q;
        let z = self.r - (self.q - (self.q & 1)) / 2;
        let y = -x - z;
        (x, y, z)
    }

    /// All hexes at most `radius` steps away, including this one.
    pub fn hexes_in_radius(&self, radius: u32) -> Vec<HexCoord> {
        let r = radius as i32;
        let mut result = Vec::new();

        for dq in -r..=r {
            for dr in -r..=r {
                let candidate = HexCoord::new(self.q + dq, self.r + dr);
                if self.distance(&candidate) <= radius {
                    result.push(candidate);
                }
            }
        }

        result
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Serde helper for `HashMap<HexCoord, V>`.
///
/// JSON requires string keys, so the map is written as a sequence of
/// `[key, value]` pairs.
pub(crate) mod coord_keyed {
    use super::HexCoord;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S, V>(map: &HashMap<HexCoord, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        // Sorted so that saves are byte-stable
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort_by_key(|(coord, _)| **coord);

        let mut seq = serializer.serialize_seq(Some(entries.len()))?;
        for entry in entries {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<HashMap<HexCoord, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let pairs: Vec<(HexCoord, V)> = Deserialize::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_hex() {
        let coord = HexCoord::new(5, 5);
        assert_eq!(coord.distance(&coord), 0);
    }

    #[test]
    fn test_distance_across_columns() {
        assert_eq!(HexCoord::new(0, 0).distance(&HexCoord::new(3, 0)), 3);
        assert_eq!(HexCoord::new(2, 2).distance(&HexCoord::new(2, 6)), 4);
    }

    #[test]
    fn test_hexes_in_radius() {
        let center = HexCoord::new(5, 5);
        assert_eq!(center.hexes_in_radius(0), vec![center]);
        assert_eq!(center.hexes_in_radius(1).len(), 7);
        assert_eq!(center.hexes_in_radius(2).len(), 19);
    }

    #[test]
    fn test_row_major_order() {
        let mut coords = vec![HexCoord::new(2, 1), HexCoord::new(0, 2), HexCoord::new(1, 1)];
        coords.sort();
        assert_eq!(
            coords,
            vec![HexCoord::new(1, 1), HexCoord::new(2, 1), HexCoord::new(0, 2)]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", HexCoord::new(3, 7)), "(3, 7)");
    }
}
