//! conetrack — orders unordered traffic-cone detections into track boundaries.
//!
//! Blue cones mark the left edge of a track, yellow cones the right. Given an
//! unordered set of detections and an origin (usually the car position), each
//! side is turned into an ordered polyline in driving order:
//!
//! 1. **Start** – the cone closest to the origin.
//! 2. **Filter** – cones with no other cone within the neighbor radius are
//!    dropped as noise.
//! 3. **Graph** – every remaining cone is linked to all cones within the
//!    neighbor radius, nearest first.
//! 4. **Search** – a best-first greedy walk from the start cone that rejects
//!    sharp turns and self-crossing steps.
//! 5. **Close** – the path is closed into a loop when its ends are close.
//!
//! # Public API
//! - [`ConeOrderer`] as the primary entry point
//! - [`OrderConfig`] / [`SearchParams`] for tuning
//! - the individual stages ([`DistanceMatrix`], [`filter_valid_cones`],
//!   [`NeighborGraph`], [`search_path`]) and geometry predicates for callers
//!   that want to run them separately

mod cone;
mod config;
mod debug_dump;
mod distance;
mod error;
mod filter;
pub mod geometry;
mod neighbors;
mod orderer;
mod search;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cone::{Cone, ConeColor, Point, Side};
pub use config::{
    CrossingCheck, DegenerateAnglePolicy, OrderConfig, SearchParams, CROSSING_TOLERANCE,
    DEFAULT_MAX_CONES, MAX_DISTANCE_BETWEEN_CONES, MIN_TURN_ANGLE_DEG,
};
pub use debug_dump::{DebugDump, SideDebug, DEBUG_SCHEMA_V1};
pub use distance::DistanceMatrix;
pub use error::{ConfigError, OrderError};
pub use filter::{filter_valid_cones, ValidCones};
pub use geometry::{angle_between, segments_intersect};
pub use neighbors::{Neighbor, NeighborGraph};
pub use orderer::{
    order_blue_and_yellow_cones, split_by_side, ConeOrderer, OrderedBoundary, TrackBoundaries,
};
pub use search::{search_path, CandidateDecision, CandidateOutcome, SearchOutcome, SearchStats};
