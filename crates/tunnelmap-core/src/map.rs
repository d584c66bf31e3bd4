//! Game map structure with tiles and spatial queries.

use crate::hex::{coord_keyed, HexCoord};
use crate::terrain::Terrain;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The game map containing all tiles.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Map {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// All tiles indexed by coordinate.
    #[serde(with = "coord_keyed")]
    tiles: HashMap<HexCoord, Tile>,
}

impl Map {
    /// Create a new empty map with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: HashMap::new(),
        }
    }

    /// Create a map filled with a single terrain type.
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Self {
        let mut map = Self::new(width, height);
        for q in 0..width as i32 {
            for r in 0..height as i32 {
                map.set(Tile::new(HexCoord::new(q, r), terrain));
            }
        }
        map
    }

    /// Get a tile at the given coordinate.
    pub fn get(&self, coord: &HexCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    /// Insert or replace a tile. Tiles outside the bounds are ignored.
    pub fn set(&mut self, tile: Tile) {
        if self.in_bounds(&tile.coord) {
            self.tiles.insert(tile.coord, tile);
        }
    }

    /// Change the terrain of an existing tile.
    pub fn set_terrain(&mut self, coord: &HexCoord, terrain: Terrain) {
        if let Some(tile) = self.tiles.get_mut(coord) {
            tile.terrain = terrain;
        }
    }

    /// Terrain at a coordinate, if the tile exists.
    pub fn terrain(&self, coord: &HexCoord) -> Option<Terrain> {
        self.get(coord).map(|t| t.terrain)
    }

    /// Check if a coordinate is within the map bounds.
    pub fn in_bounds(&self, coord: &HexCoord) -> bool {
        coord.q >= 0
            && coord.r >= 0
            && (coord.q as u32) < self.width
            && (coord.r as u32) < self.height
    }

    /// Check if there is a tile at the coordinate.
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.tiles.contains_key(coord)
    }

    /// Count total tiles in the map.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate over all tile locations.
    pub fn locations(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.keys().copied()
    }

    /// Iterate over all tiles.
    pub fn iter(&self) -> impl Iterator<Item = (&HexCoord, &Tile)> {
        self.tiles.iter()
    }
}

/// A single tile on the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Position of this tile.
    pub coord: HexCoord,
    /// Base terrain.
    pub terrain: Terrain,
}

impl Tile {
    /// Create a new tile.
    pub fn new(coord: HexCoord, terrain: Terrain) -> Self {
        Self { coord, terrain }
    }
}
