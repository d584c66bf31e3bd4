//! Tunnel Map Core Library
//!
//! This crate resolves tunnels (teleport groups) on a hex map into the extra
//! adjacency edges a path search uses on top of ordinary hex neighbours.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: This crate is purely game logic
//! - **Order independent**: Tunnel edges are merged as set unions
//! - **Serializable**: The tunnel registry and board can be saved/loaded
//! - **Pluggable filters**: Filter evaluation sits behind a trait

// Core modules
pub mod config;
pub mod hex;
pub mod map;
pub mod terrain;
pub mod types;

// Units and sides
pub mod team;
pub mod unit;

// World views and filters
pub mod context;
pub mod filter;

// Tunnels
pub mod query;
pub mod registry;
pub mod teleport_map;
pub mod tunnel;

// Game session
pub mod session;

// Re-exports for convenience
pub use config::Config;
pub use context::{DisplayContext, GameBoard, IgnoreUnitsContext};
pub use filter::{FilterEvaluator, StandardFilters};
pub use hex::HexCoord;
pub use map::{Map, Tile};
pub use query::get_teleport_locations;
pub use registry::TunnelRegistry;
pub use session::{GameSession, SessionError};
pub use team::Team;
pub use teleport_map::{TeleportMap, TeleportQuery};
pub use terrain::{Terrain, TimeOfDay};
pub use tunnel::{TeleportPair, TunnelError, TunnelGroup, REVERSED_SUFFIX};
pub use types::{LocationSet, SideId, TunnelId, UnitId};
pub use unit::{Ability, Unit, UnitMap, TELEPORT_ABILITY};
