//! Versioned debug dump schema for cone ordering.
//!
//! Reuses the production result structures; only the per-side summary is
//! debug-specific.

use serde::{Deserialize, Serialize};

use crate::cone::{Cone, Point, Side};
use crate::config::OrderConfig;
use crate::orderer::{OrderedBoundary, TrackBoundaries};
use crate::search::{CandidateDecision, SearchStats};

pub const DEBUG_SCHEMA_V1: &str = "conetrack.debug.v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugDump {
    pub schema_version: String,
    pub origin: Point,
    pub config: OrderConfig,
    pub sides: Vec<SideDebug>,
}

impl DebugDump {
    pub fn new(config: &OrderConfig, origin: Point, track: &TrackBoundaries) -> Self {
        Self {
            schema_version: DEBUG_SCHEMA_V1.to_string(),
            origin,
            config: config.clone(),
            sides: vec![SideDebug::from(&track.left), SideDebug::from(&track.right)],
        }
    }

    pub fn side(&self, side: Side) -> Option<&SideDebug> {
        self.sides.iter().find(|s| s.side == side)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideDebug {
    pub side: Side,
    pub n_input: usize,
    pub n_valid: usize,
    pub start: Cone,
    pub start_isolated: bool,
    pub n_ordered: usize,
    pub closed: bool,
    pub truncated: bool,
    pub stats: SearchStats,
    pub decisions: Vec<CandidateDecision>,
}

impl From<&OrderedBoundary> for SideDebug {
    fn from(b: &OrderedBoundary) -> Self {
        Self {
            side: b.side,
            n_input: b.n_input,
            n_valid: b.n_valid,
            start: b.start,
            start_isolated: b.start_isolated,
            n_ordered: b.cones.len(),
            closed: b.closed,
            truncated: b.truncated,
            stats: b.stats,
            decisions: b.decisions.clone().unwrap_or_default(),
        }
    }
}
