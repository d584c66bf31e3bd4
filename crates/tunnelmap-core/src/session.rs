//! A running game session: the board, its tunnel registry, and the filter
//! language used to resolve tunnels.
//!
//! The session is the only owner of the registry. Scenario events declare and
//! remove tunnels through [`GameSession::apply_tunnel_action`]; the path
//! search asks for adjacency through [`GameSession::teleport_locations`].

use crate::config::Config;
use crate::context::{DisplayContext, GameBoard};
use crate::filter::{FilterEvaluator, StandardFilters};
use crate::hex::HexCoord;
use crate::query::get_teleport_locations;
use crate::registry::TunnelRegistry;
use crate::teleport_map::{TeleportMap, TeleportQuery};
use crate::tunnel::{validate_children, TunnelError, TunnelGroup};
use crate::types::SideId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Tunnel(#[from] TunnelError),
    #[error("malformed save data: {0}")]
    Save(#[from] serde_json::Error),
    #[error("no unit at {0}")]
    UnknownUnit(HexCoord),
    #[error("no team plays side {0}")]
    UnknownSide(SideId),
}

#[derive(Serialize)]
struct SaveRef<'a> {
    board: &'a GameBoard,
    tunnels: Config,
}

#[derive(Deserialize)]
struct SaveData {
    board: GameBoard,
    tunnels: Config,
}

/// One game in progress.
#[derive(Clone, Debug)]
pub struct GameSession<F = StandardFilters> {
    board: GameBoard,
    tunnels: TunnelRegistry,
    filters: F,
}

impl GameSession<StandardFilters> {
    /// Start a session on a board with no tunnels.
    pub fn new(board: GameBoard) -> Self {
        Self::with_filters(board, StandardFilters)
    }

    /// Restore a session written by [`GameSession::save`].
    pub fn load(json: &str) -> Result<Self, SessionError> {
        Self::load_with_filters(json, StandardFilters)
    }
}

impl<F: FilterEvaluator> GameSession<F> {
    /// Start a session with a custom filter language.
    pub fn with_filters(board: GameBoard, filters: F) -> Self {
        Self {
            board,
            tunnels: TunnelRegistry::new(),
            filters,
        }
    }

    /// Restore a saved session with a custom filter language.
    pub fn load_with_filters(json: &str, filters: F) -> Result<Self, SessionError> {
        let data: SaveData = serde_json::from_str(json)?;
        Ok(Self {
            board: data.board,
            tunnels: TunnelRegistry::from_config(&data.tunnels)?,
            filters,
        })
    }

    /// Serialize the board and the tunnel registry.
    pub fn save(&self) -> Result<String, SessionError> {
        let data = SaveRef {
            board: &self.board,
            tunnels: self.tunnels.to_config(),
        };
        Ok(serde_json::to_string(&data)?)
    }

    /// The board.
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    /// Mutable access to the board.
    pub fn board_mut(&mut self) -> &mut GameBoard {
        &mut self.board
    }

    /// The tunnel registry.
    pub fn tunnels(&self) -> &TunnelRegistry {
        &self.tunnels
    }

    /// Mutable access to the tunnel registry.
    pub fn tunnels_mut(&mut self) -> &mut TunnelRegistry {
        &mut self.tunnels
    }

    /// Run a scenario `[tunnel]` action.
    ///
    /// - `remove=yes` removes both directions of tunnel `id`
    /// - otherwise the forward tunnel is declared, plus its reverse unless
    ///   `bidirectional=no`; both directions share one id so that a single
    ///   removal deletes them together
    pub fn apply_tunnel_action(&mut self, action: &Config) -> Result<(), TunnelError> {
        if action.get_bool("remove", false) {
            let id = action.str("id");
            if id.is_empty() {
                return Err(TunnelError::MissingKey { key: "id" });
            }
            self.tunnels.remove(id);
            return Ok(());
        }

        let bidirectional = action.get_bool("bidirectional", true);
        let mut definition = action.clone();
        definition.remove("remove");
        definition.remove("bidirectional");
        validate_children(&definition)?;
        if definition.str("id").is_empty() {
            let id = self.tunnels.next_unique_id();
            definition.set("id", id);
        }

        let forward = TunnelGroup::from_live(&definition, false, &mut self.tunnels)?;
        let reverse = if bidirectional {
            Some(TunnelGroup::from_live(&definition, true, &mut self.tunnels)?)
        } else {
            None
        };

        self.tunnels.add(forward);
        if let Some(reverse) = reverse {
            self.tunnels.add(reverse);
        }
        Ok(())
    }

    /// Tunnel edges for the unit at `unit_loc`, as seen by `viewing_side`.
    pub fn teleport_locations(
        &mut self,
        unit_loc: &HexCoord,
        viewing_side: SideId,
        query: TeleportQuery,
    ) -> Result<TeleportMap, SessionError> {
        let unit = self
            .board
            .units
            .get(unit_loc)
            .ok_or(SessionError::UnknownUnit(*unit_loc))?;
        let viewing_team = self
            .board
            .team(viewing_side)
            .ok_or(SessionError::UnknownSide(viewing_side))?;

        Ok(get_teleport_locations(
            unit,
            viewing_team,
            query,
            &self.board,
            &mut self.tunnels,
            &self.filters,
        )?)
    }
}
