//! Entry point used by the path search to obtain a unit's tunnel edges.

use crate::context::DisplayContext;
use crate::filter::FilterEvaluator;
use crate::registry::TunnelRegistry;
use crate::team::Team;
use crate::teleport_map::{TeleportMap, TeleportQuery};
use crate::tunnel::{TunnelError, TunnelGroup};
use crate::unit::{Unit, TELEPORT_ABILITY};

/// Collect every tunnel available to `unit` and build its adjacency map.
///
/// Tunnels embedded in the unit's teleport abilities come first, as
/// throwaway forward groups; the registry's tunnels follow. Ability tunnels
/// without an id draw one from the registry counter.
pub fn get_teleport_locations(
    unit: &Unit,
    viewing_team: &Team,
    query: TeleportQuery,
    ctx: &dyn DisplayContext,
    registry: &mut TunnelRegistry,
    filters: &dyn FilterEvaluator,
) -> Result<TeleportMap, TunnelError> {
    let mut groups = Vec::new();
    for ability in unit.abilities(TELEPORT_ABILITY) {
        for tunnel in ability.children("tunnel") {
            groups.push(TunnelGroup::from_live(tunnel, false, registry)?);
        }
    }
    groups.extend(registry.tunnels().iter().cloned());

    log::debug!(
        "building teleport map for unit '{}' from {} group(s)",
        unit.id,
        groups.len()
    );

    Ok(TeleportMap::build(&groups, unit, viewing_team, query, ctx, filters))
}
