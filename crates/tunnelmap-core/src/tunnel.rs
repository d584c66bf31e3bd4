//! Tunnel groups: declarative teleport rules.
//!
//! A tunnel group connects every location matching its `source` filter to
//! every location matching its `target` filter, for units matching its unit
//! `filter`. Groups come from two places:
//!
//! - saved registry records ([`TunnelGroup::from_persisted`]), which restore
//!   the exact id and direction
//! - live definitions in scenario actions or unit abilities
//!   ([`TunnelGroup::from_live`]), which synthesize an id when none is given
//!
//! The reverse direction of a tunnel is a separate group whose id carries
//! [`REVERSED_SUFFIX`].

use crate::config::Config;
use crate::context::{DisplayContext, IgnoreUnitsContext};
use crate::filter::FilterEvaluator;
use crate::registry::TunnelRegistry;
use crate::types::{LocationSet, TunnelId};
use crate::unit::Unit;
use thiserror::Error;

/// Marker appended to the id of the reverse direction of a tunnel.
pub const REVERSED_SUFFIX: &str = "-__REVERSED__";

/// Errors raised while constructing tunnel groups.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TunnelError {
    /// A mandatory attribute is absent.
    #[error("missing mandatory key '{key}' in [tunnel]")]
    MissingKey { key: &'static str },
    /// A filter block is missing or duplicated.
    #[error("the tunnel should have exactly one '{child}' child, found {found}")]
    ChildCount { child: &'static str, found: usize },
}

/// Source and target locations of one group resolved for one unit.
///
/// `first` holds the locations units teleport from, `second` the locations
/// they arrive at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeleportPair {
    pub first: LocationSet,
    pub second: LocationSet,
}

impl TeleportPair {
    /// Check if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }
}

/// One tunnel rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TunnelGroup {
    cfg: Config,
    reversed: bool,
    id: TunnelId,
}

impl TunnelGroup {
    /// Restore a group from a saved record.
    ///
    /// The record must carry `id` and `reversed` as written by
    /// [`TunnelGroup::to_config`].
    pub fn from_persisted(cfg: &Config) -> Result<Self, TunnelError> {
        if !cfg.has_attribute("id") {
            return Err(TunnelError::MissingKey { key: "id" });
        }
        if !cfg.has_attribute("reversed") {
            return Err(TunnelError::MissingKey { key: "reversed" });
        }
        validate_children(cfg)?;

        Ok(Self {
            cfg: cfg.clone(),
            reversed: cfg.get_bool("reversed", false),
            id: cfg.str("id").to_string(),
        })
    }

    /// Build a group from a live definition.
    ///
    /// Without an `id`, one is drawn from the registry counter. The reverse
    /// direction gets [`REVERSED_SUFFIX`] appended so it stays distinct from
    /// the forward one.
    pub fn from_live(
        cfg: &Config,
        reversed: bool,
        registry: &mut TunnelRegistry,
    ) -> Result<Self, TunnelError> {
        validate_children(cfg)?;

        let mut id = match cfg.str("id") {
            "" => registry.next_unique_id(),
            id => id.to_string(),
        };
        if reversed {
            id.push_str(REVERSED_SUFFIX);
        }

        Ok(Self {
            cfg: cfg.clone(),
            reversed,
            id,
        })
    }

    /// Resolve the group for `unit`.
    ///
    /// The unit filter is always checked against the live context. With
    /// `ignore_units`, the location filters see a context without units.
    pub fn resolve(
        &self,
        unit: &Unit,
        ignore_units: bool,
        ctx: &dyn DisplayContext,
        filters: &dyn FilterEvaluator,
    ) -> TeleportPair {
        if !filters.unit_matches(self.unit_filter(), unit) {
            return TeleportPair::default();
        }

        let ignoring;
        let ctx: &dyn DisplayContext = if ignore_units {
            ignoring = IgnoreUnitsContext::new(ctx);
            &ignoring
        } else {
            ctx
        };

        let sources = filters.locations(self.source_filter(), ctx, unit);
        let targets = filters.locations(self.target_filter(), ctx, unit);

        if self.reversed {
            TeleportPair {
                first: targets,
                second: sources,
            }
        } else {
            TeleportPair {
                first: sources,
                second: targets,
            }
        }
    }

    /// The group id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Is this the reverse direction of its tunnel?
    pub fn reversed(&self) -> bool {
        self.reversed
    }

    /// Fog never hides this tunnel's endpoints.
    pub fn always_visible(&self) -> bool {
        self.cfg.get_bool("always_visible", false)
    }

    /// Units may arrive on hexes occupied by other units.
    pub fn pass_allied_units(&self) -> bool {
        self.cfg.get_bool("pass_allied_units", true)
    }

    /// The tunnel also carries vision.
    pub fn allow_vision(&self) -> bool {
        self.cfg.get_bool("allow_vision", true)
    }

    /// The unit eligibility filter.
    pub fn unit_filter(&self) -> &Config {
        self.cfg.child_or_empty("filter")
    }

    /// The source location filter.
    pub fn source_filter(&self) -> &Config {
        self.cfg.child_or_empty("source")
    }

    /// The target location filter.
    pub fn target_filter(&self) -> &Config {
        self.cfg.child_or_empty("target")
    }

    /// Saved record form, accepted by [`TunnelGroup::from_persisted`].
    pub fn to_config(&self) -> Config {
        let mut cfg = self.cfg.clone();
        cfg.set("saved", "yes");
        cfg.set("reversed", if self.reversed { "yes" } else { "no" });
        cfg.set("id", &self.id);
        cfg
    }
}

/// Check that a tunnel block has exactly one of each filter child.
pub(crate) fn validate_children(cfg: &Config) -> Result<(), TunnelError> {
    for child in ["source", "target", "filter"] {
        let found = cfg.child_count(child);
        if found != 1 {
            return Err(TunnelError::ChildCount { child, found });
        }
    }
    Ok(())
}
