//! Registry and session tests for the tunnel system.
//!
//! These tests cover the lifecycle of declared tunnels:
//! - Declaring and removing tunnels through scenario actions
//! - Id synthesis
//! - Saving and restoring the registry and the session
//! - Suffix matching on removal

use std::collections::HashSet;
use tunnelmap_core::{
    config::Config,
    context::GameBoard,
    hex::HexCoord,
    map::Map,
    registry::TunnelRegistry,
    session::{GameSession, SessionError},
    team::Team,
    teleport_map::TeleportQuery,
    terrain::Terrain,
    tunnel::{TunnelError, TunnelGroup, REVERSED_SUFFIX},
    unit::Unit,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn loc(q: i32, r: i32) -> HexCoord {
    HexCoord::new(q, r)
}

fn tunnel_cfg(source: (i32, i32), target: (i32, i32)) -> Config {
    Config::new()
        .with_child("filter", Config::new())
        .with_child("source", Config::new().with("x", source.0).with("y", source.1))
        .with_child("target", Config::new().with("x", target.0).with("y", target.1))
}

/// A session with a scout of side 1 on (1,1) and a fogged enemy side 2.
fn create_session() -> GameSession {
    let mut board = GameBoard::new(Map::filled(10, 10, Terrain::Grassland));
    board.add_team(Team::without_fog(1));
    board.add_team(Team::new(2));
    board.place_unit(Unit::new("scout", 1, "Cavalryman", loc(1, 1)));
    GameSession::new(board)
}

fn ids(registry: &TunnelRegistry) -> Vec<String> {
    registry.tunnels().iter().map(|t| t.id().to_string()).collect()
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_remove_deletes_forward_and_reverse() {
    let mut registry = TunnelRegistry::new();
    let cfg = tunnel_cfg((1, 1), (5, 5)).with("id", "X");
    let forward = TunnelGroup::from_live(&cfg, false, &mut registry).unwrap();
    let reverse = TunnelGroup::from_live(&cfg, true, &mut registry).unwrap();
    assert_eq!(reverse.id(), format!("X{REVERSED_SUFFIX}"));

    registry.add(forward);
    registry.add(reverse);
    registry.remove("X");

    assert!(registry.is_empty());
    assert!(registry.get("X").is_none());
}

#[test]
fn test_remove_leaves_unrelated_ids() {
    let mut registry = TunnelRegistry::new();
    for id in ["X", "XY", "Y-X", "X-__REVERSED__-2"] {
        let cfg = tunnel_cfg((1, 1), (5, 5)).with("id", id);
        let group = TunnelGroup::from_live(&cfg, false, &mut registry).unwrap();
        registry.add(group);
    }

    assert_eq!(registry.remove("X"), 1);
    assert_eq!(ids(&registry), vec!["XY", "Y-X", "X-__REVERSED__-2"]);
}

#[test]
fn test_user_id_ending_in_marker_is_removed_with_base_id() {
    // Ids are plain strings, so a forward tunnel named like a reverse one is
    // removed together with the base id.
    let mut registry = TunnelRegistry::new();
    for id in ["gate", "gate-__REVERSED__"] {
        let cfg = tunnel_cfg((1, 1), (5, 5)).with("id", id);
        let group = TunnelGroup::from_live(&cfg, false, &mut registry).unwrap();
        registry.add(group);
    }

    assert_eq!(registry.remove("gate"), 2);
    assert!(registry.is_empty());
}

#[test]
fn test_unique_ids_never_repeat() {
    let mut registry = TunnelRegistry::new();
    let mut seen = HashSet::new();
    let mut last = 0u64;

    for i in 0..50 {
        let id: u64 = if i % 3 == 0 {
            let group = TunnelGroup::from_live(&tunnel_cfg((1, 1), (2, 2)), false, &mut registry)
                .unwrap();
            let id = group.id().parse().unwrap();
            registry.add(group);
            id
        } else {
            registry.next_unique_id().parse().unwrap()
        };
        assert!(id > last);
        assert!(seen.insert(id));
        last = id;
    }

    // Removing tunnels never rewinds the counter
    let first = registry.tunnels()[0].id().to_string();
    registry.remove(&first);
    let next: u64 = registry.next_unique_id().parse().unwrap();
    assert!(next > last);
}

#[test]
fn test_registry_roundtrip_preserves_groups() {
    let mut registry = TunnelRegistry::new();
    let blocks = [
        tunnel_cfg((1, 1), (5, 5)).with("id", "gate"),
        tunnel_cfg((2, 2), (6, 6)).with("always_visible", "yes"),
        tunnel_cfg((3, 3), (7, 7))
            .with("pass_allied_units", "no")
            .with("allow_vision", "no"),
    ];
    for (i, block) in blocks.iter().enumerate() {
        let forward = TunnelGroup::from_live(block, false, &mut registry).unwrap();
        registry.add(forward);
        if i != 1 {
            let reverse = TunnelGroup::from_live(block, true, &mut registry).unwrap();
            registry.add(reverse);
        }
    }

    let restored = TunnelRegistry::from_config(&registry.to_config()).unwrap();

    assert_eq!(restored.len(), registry.len());
    assert_eq!(restored.last_id(), registry.last_id());
    for (restored, original) in restored.tunnels().iter().zip(registry.tunnels()) {
        assert_eq!(restored.id(), original.id());
        assert_eq!(restored.reversed(), original.reversed());
        assert_eq!(restored.always_visible(), original.always_visible());
        assert_eq!(restored.pass_allied_units(), original.pass_allied_units());
        assert_eq!(restored.allow_vision(), original.allow_vision());
        assert_eq!(restored.unit_filter(), original.unit_filter());
        assert_eq!(restored.source_filter(), original.source_filter());
        assert_eq!(restored.target_filter(), original.target_filter());
    }
}

#[test]
fn test_registry_load_skips_direct_records() {
    let saved = tunnel_cfg((1, 1), (5, 5))
        .with("id", "kept")
        .with("saved", "yes")
        .with("reversed", "yes");
    let cfg = Config::new()
        .with("next_teleport_group_id", 7)
        .with_child("tunnel", tunnel_cfg((2, 2), (6, 6)).with("id", "direct"))
        .with_child("tunnel", saved);

    let mut registry = TunnelRegistry::from_config(&cfg).unwrap();

    assert_eq!(ids(&registry), vec!["kept"]);
    assert!(registry.tunnels()[0].reversed());
    assert_eq!(registry.next_unique_id(), "8");
}

#[test]
fn test_registry_load_requires_id_and_direction() {
    let no_id = tunnel_cfg((1, 1), (5, 5))
        .with("saved", "yes")
        .with("reversed", "no");
    assert_eq!(
        TunnelRegistry::from_config(&Config::new().with_child("tunnel", no_id)),
        Err(TunnelError::MissingKey { key: "id" })
    );

    let no_direction = tunnel_cfg((1, 1), (5, 5))
        .with("saved", "yes")
        .with("id", "gate");
    assert_eq!(
        TunnelRegistry::from_config(&Config::new().with_child("tunnel", no_direction)),
        Err(TunnelError::MissingKey { key: "reversed" })
    );
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_scenario_action_declares_and_removes() {
    let mut session = create_session();
    session
        .apply_tunnel_action(&tunnel_cfg((1, 1), (8, 8)).with("id", "portal"))
        .unwrap();
    assert_eq!(
        ids(session.tunnels()),
        vec!["portal".to_string(), format!("portal{REVERSED_SUFFIX}")]
    );

    let map = session
        .teleport_locations(&loc(1, 1), 1, TeleportQuery::default())
        .unwrap();
    assert!(map.get_adjacents(&loc(1, 1)).contains(&loc(8, 8)));
    assert!(map.get_adjacents(&loc(8, 8)).contains(&loc(1, 1)));

    let removal = Config::new().with("id", "portal").with("remove", "yes");
    session.apply_tunnel_action(&removal).unwrap();
    assert!(session.tunnels().is_empty());

    let map = session
        .teleport_locations(&loc(1, 1), 1, TeleportQuery::default())
        .unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_hostile_view_of_session_tunnels() {
    let mut session = create_session();
    session
        .apply_tunnel_action(&tunnel_cfg((1, 1), (8, 8)).with("bidirectional", "no"))
        .unwrap();
    session
        .apply_tunnel_action(
            &tunnel_cfg((2, 2), (7, 7))
                .with("bidirectional", "no")
                .with("always_visible", "yes"),
        )
        .unwrap();

    let map = session
        .teleport_locations(&loc(1, 1), 2, TeleportQuery::default())
        .unwrap();
    assert!(map.get_adjacents(&loc(1, 1)).is_empty());
    assert!(map.get_adjacents(&loc(2, 2)).contains(&loc(7, 7)));

    // Scouting the endpoints reveals the hidden tunnel
    let board = session.board_mut();
    board.place_unit(Unit::new("spy", 2, "Thief", loc(1, 2)));
    board.place_unit(Unit::new("spy2", 2, "Thief", loc(8, 7)));
    board.recalculate_vision(1);

    let map = session
        .teleport_locations(&loc(1, 1), 2, TeleportQuery::default())
        .unwrap();
    assert!(map.get_adjacents(&loc(1, 1)).contains(&loc(8, 8)));
}

#[test]
fn test_session_survives_save_and_load() {
    let mut session = create_session();
    session
        .apply_tunnel_action(&tunnel_cfg((1, 1), (8, 8)))
        .unwrap();
    session
        .apply_tunnel_action(&tunnel_cfg((3, 3), (6, 6)).with("id", "cellar"))
        .unwrap();

    let json = session.save().unwrap();
    let mut restored = GameSession::load(&json).unwrap();

    assert_eq!(ids(restored.tunnels()), ids(session.tunnels()));
    assert_eq!(restored.tunnels().last_id(), session.tunnels().last_id());

    let before = session
        .teleport_locations(&loc(1, 1), 1, TeleportQuery::see_all())
        .unwrap();
    let after = restored
        .teleport_locations(&loc(1, 1), 1, TeleportQuery::see_all())
        .unwrap();
    assert_eq!(before, after);

    // Ids keep counting from where the saved session stopped
    restored.apply_tunnel_action(&tunnel_cfg((4, 4), (5, 5))).unwrap();
    let newest: u64 = restored.tunnels().tunnels()[4].id().parse().unwrap();
    assert_eq!(newest, session.tunnels().last_id() + 1);
}

#[test]
fn test_load_reports_invalid_tunnel_records() {
    let mut session = create_session();
    session
        .apply_tunnel_action(&tunnel_cfg((1, 1), (8, 8)).with("id", "gate"))
        .unwrap();
    let json = session.save().unwrap();

    // Strip the reversed flag from every saved record
    let broken = json.replace("\"reversed\"", "\"unused\"");
    assert!(matches!(
        GameSession::load(&broken),
        Err(SessionError::Tunnel(TunnelError::MissingKey { key: "reversed" }))
    ));
}
