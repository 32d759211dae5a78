//! Ordering configuration and its JSON loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maximum distance between two cones for them to be graph neighbors.
pub const MAX_DISTANCE_BETWEEN_CONES: f64 = 10.0;
/// Smallest accepted turn angle at a path vertex, in degrees.
pub const MIN_TURN_ANGLE_DEG: f64 = 30.0;
/// Segments shorter than this never count as crossing.
///
/// Most cone-to-cone steps on a real track are shorter, so in practice only
/// long jumps are tested against the path.
pub const CROSSING_TOLERANCE: f64 = 8.0;
/// Default cap on the number of cones returned per side.
pub const DEFAULT_MAX_CONES: usize = 400;

/// What the angle test does when the turn angle is undefined (a zero-length
/// ray, i.e. two coincident cones).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateAnglePolicy {
    /// Read the undefined angle as 0 and reject the candidate like any
    /// other sharp turn.
    #[default]
    Reject,
    /// Skip the angle test for this candidate.
    SkipCheck,
}

/// Which path segments a candidate step is tested against for crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingCheck {
    /// Every segment of the path, including the last one. The step shares
    /// its start point with the last segment, so when both are at least
    /// `crossing_tolerance` long the candidate is always rejected.
    #[default]
    AllSegments,
    /// Every segment except the last one.
    SkipAdjacent,
}

/// Parameters of the constrained greedy path search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchParams {
    /// Neighbor radius; also the loop-closure distance.
    pub max_neighbor_distance: f64,
    /// Turn angles below this (degrees) are rejected.
    pub min_turn_angle_deg: f64,
    /// Length below which segments are ignored by the crossing test.
    pub crossing_tolerance: f64,
    /// Segments the crossing test covers.
    pub crossing_check: CrossingCheck,
    /// Handling of undefined turn angles.
    pub degenerate_angle: DegenerateAnglePolicy,
    /// Optional cap on frontier pops. `None` runs until the frontier drains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    /// Record one [`crate::CandidateDecision`] per frontier pop.
    pub record_decisions: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_neighbor_distance: MAX_DISTANCE_BETWEEN_CONES,
            min_turn_angle_deg: MIN_TURN_ANGLE_DEG,
            crossing_tolerance: CROSSING_TOLERANCE,
            crossing_check: CrossingCheck::AllSegments,
            degenerate_angle: DegenerateAnglePolicy::Reject,
            max_iterations: None,
            record_decisions: false,
        }
    }
}

impl SearchParams {
    #[inline]
    pub(crate) fn min_turn_angle_rad(&self) -> f64 {
        self.min_turn_angle_deg.to_radians()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_neighbor_distance.is_finite() || self.max_neighbor_distance <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "search.max_neighbor_distance",
                reason: "must be finite and > 0".to_string(),
            });
        }
        if !self.min_turn_angle_deg.is_finite() || !(0.0..180.0).contains(&self.min_turn_angle_deg)
        {
            return Err(ConfigError::Invalid {
                field: "search.min_turn_angle_deg",
                reason: "must be in [0, 180)".to_string(),
            });
        }
        if !self.crossing_tolerance.is_finite() || self.crossing_tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "search.crossing_tolerance",
                reason: "must be finite and >= 0".to_string(),
            });
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigError::Invalid {
                field: "search.max_iterations",
                reason: "must be >= 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Full orderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderConfig {
    /// Path search parameters.
    pub search: SearchParams,
    /// Cap on cones returned per side, applied after loop closure.
    pub max_cones: usize,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            search: SearchParams::default(),
            max_cones: DEFAULT_MAX_CONES,
        }
    }
}

impl OrderConfig {
    /// Default configuration with a different per-side cap.
    pub fn with_max_cones(max_cones: usize) -> Self {
        Self {
            max_cones,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cones == 0 {
            return Err(ConfigError::Invalid {
                field: "max_cones",
                reason: "must be >= 1".to_string(),
            });
        }
        self.search.validate()
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&data)
    }
}
