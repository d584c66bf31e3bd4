//! Unit and location filters.
//!
//! Tunnel groups hold their filters as opaque [`Config`] blocks and hand them
//! to a [`FilterEvaluator`]. [`StandardFilters`] understands a compact filter
//! language that covers the common tunnel setups:
//!
//! Unit filters:
//! - `id`, `type`, `side`: comma separated lists, any entry may match
//! - `[not]`: the unit must not match any of these
//!
//! Location filters:
//! - `x`, `y`: comma separated values or `a-b` ranges, paired term by term
//! - `terrain`: comma separated terrain names
//! - `time_of_day`: comma separated time-of-day ids
//! - `vacant`: `yes` requires no unit on the hex, `no` requires one
//! - `max_distance`: at most this many hexes from the querying unit
//! - `[filter]`: a unit matching this unit filter stands on the hex
//! - `[not]`: locations matching any of these are removed
//! - `radius`: grow the result by this many hexes, staying on the map
//!
//! An empty unit filter matches every unit; an empty location filter matches
//! every tile on the map.

use crate::config::Config;
use crate::context::DisplayContext;
use crate::hex::HexCoord;
use crate::map::Map;
use crate::terrain::Terrain;
use crate::types::{LocationSet, SideId};
use crate::unit::Unit;

/// Evaluates filter blocks against the world.
pub trait FilterEvaluator {
    /// Does `unit` satisfy the unit filter?
    fn unit_matches(&self, filter: &Config, unit: &Unit) -> bool;

    /// All locations satisfying the location filter, evaluated for `unit`.
    fn locations(&self, filter: &Config, ctx: &dyn DisplayContext, unit: &Unit) -> LocationSet;
}

/// The built-in filter language.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardFilters;

impl FilterEvaluator for StandardFilters {
    fn unit_matches(&self, filter: &Config, unit: &Unit) -> bool {
        if let Some(ids) = filter.get("id") {
            if !list_contains(ids, &unit.id) {
                return false;
            }
        }
        if let Some(types) = filter.get("type") {
            if !list_contains(types, &unit.unit_type) {
                return false;
            }
        }
        if let Some(sides) = filter.get("side") {
            let matches_side = sides
                .split(',')
                .filter_map(|s| s.trim().parse::<SideId>().ok())
                .any(|side| side == unit.side);
            if !matches_side {
                return false;
            }
        }

        !filter.children("not").any(|not| self.unit_matches(not, unit))
    }

    fn locations(&self, filter: &Config, ctx: &dyn DisplayContext, unit: &Unit) -> LocationSet {
        if let Some(times) = filter.get("time_of_day") {
            if !list_contains(times, ctx.time_of_day().id()) {
                return LocationSet::new();
            }
        }

        let map = ctx.map();
        let candidates: Vec<HexCoord> = match coordinate_list(filter, map) {
            Some(coords) => coords.into_iter().filter(|c| map.contains(c)).collect(),
            None => map.locations().collect(),
        };

        let terrains: Option<Vec<Terrain>> = filter.get("terrain").map(|list| {
            list.split(',')
                .filter_map(|name| match name.parse() {
                    Ok(terrain) => Some(terrain),
                    Err(()) => {
                        log::warn!("unknown terrain '{}' in location filter", name.trim());
                        None
                    }
                })
                .collect()
        });
        let vacant = filter
            .has_attribute("vacant")
            .then(|| filter.get_bool("vacant", true));
        let max_distance = filter
            .has_attribute("max_distance")
            .then(|| filter.get_int("max_distance", 0).max(0) as u32);
        let unit_filter = filter.child("filter", 0);

        let mut result: LocationSet = candidates
            .into_iter()
            .filter(|loc| {
                if let Some(terrains) = &terrains {
                    match map.terrain(loc) {
                        Some(t) if terrains.contains(&t) => {}
                        _ => return false,
                    }
                }
                if let Some(max) = max_distance {
                    if unit.position.distance(loc) > max {
                        return false;
                    }
                }
                let occupant = ctx.units().get(loc);
                if let Some(vacant) = vacant {
                    if vacant == occupant.is_some() {
                        return false;
                    }
                }
                if let Some(unit_filter) = unit_filter {
                    match occupant {
                        Some(u) if self.unit_matches(unit_filter, u) => {}
                        _ => return false,
                    }
                }
                true
            })
            .collect();

        for not in filter.children("not") {
            let excluded = self.locations(not, ctx, unit);
            result.retain(|loc| !excluded.contains(loc));
        }

        // No two tiles are further apart than width + height.
        let map_span = i64::from(map.width) + i64::from(map.height);
        let radius = filter.get_int("radius", 0).min(map_span);
        if radius > 0 {
            let grown: LocationSet = result
                .iter()
                .flat_map(|loc| loc.hexes_in_radius(radius as u32))
                .filter(|loc| map.contains(loc))
                .collect();
            result.extend(grown);
        }

        result
    }
}

/// Check whether a comma separated list contains `value`.
fn list_contains(list: &str, value: &str) -> bool {
    list.split(',').any(|item| item.trim() == value)
}

/// Parse `1,3-5` into inclusive ranges.
fn parse_ranges(list: &str) -> Option<Vec<(i32, i32)>> {
    list.split(',')
        .map(|term| {
            let term = term.trim();
            // A leading '-' is a sign, not a range separator.
            let separator = term
                .char_indices()
                .skip(1)
                .find(|&(_, c)| c == '-')
                .map(|(i, _)| i);
            match separator {
                Some(i) => {
                    let lo = term[..i].trim().parse().ok()?;
                    let hi = term[i + 1..].trim().parse().ok()?;
                    Some((lo, hi))
                }
                None => term.parse().ok().map(|v| (v, v)),
            }
        })
        .collect()
}

/// Expand `x`/`y` attributes into explicit coordinates.
///
/// Returns `None` when the filter names neither.
fn coordinate_list(filter: &Config, map: &Map) -> Option<Vec<HexCoord>> {
    let (x, y) = (filter.get("x"), filter.get("y"));
    if x.is_none() && y.is_none() {
        return None;
    }

    let all_columns = format!("0-{}", map.width as i32 - 1);
    let all_rows = format!("0-{}", map.height as i32 - 1);
    let xs = parse_ranges(x.unwrap_or(&all_columns));
    let ys = parse_ranges(y.unwrap_or(&all_rows));

    let (xs, ys) = match (xs, ys) {
        (Some(xs), Some(ys)) => (xs, ys),
        _ => {
            log::warn!("malformed coordinate list x={:?} y={:?}", x, y);
            return Some(Vec::new());
        }
    };

    // A single list on one axis spans every term of the other.
    let pairs: Vec<((i32, i32), (i32, i32))> = if x.is_none() || y.is_none() {
        xs.iter()
            .flat_map(|xr| ys.iter().map(move |yr| (*xr, *yr)))
            .collect()
    } else {
        if xs.len() != ys.len() {
            log::warn!(
                "coordinate lists differ in length (x has {}, y has {})",
                xs.len(),
                ys.len()
            );
        }
        xs.into_iter().zip(ys).collect()
    };

    let (max_q, max_r) = (map.width as i32 - 1, map.height as i32 - 1);
    let mut coords = Vec::new();
    for ((q0, q1), (r0, r1)) in pairs {
        for q in q0.max(0)..=q1.min(max_q) {
            for r in r0.max(0)..=r1.min(max_r) {
                coords.push(HexCoord::new(q, r));
            }
        }
    }
    Some(coords)
}
