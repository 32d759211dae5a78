//! Per-side orchestration: start selection, filtering, search, closure and
//! truncation.
//!
//! [`ConeOrderer`] is the primary entry point. It holds only configuration;
//! every call builds its own distance matrix, graph and frontier and drops
//! them before returning, so one orderer can serve many frames.

use serde::{Deserialize, Serialize};

use crate::cone::{dedup_cones, nearest_to, Cone, Point, Side};
use crate::config::OrderConfig;
use crate::debug_dump::DebugDump;
use crate::distance::DistanceMatrix;
use crate::error::OrderError;
use crate::filter::filter_valid_cones;
use crate::neighbors::NeighborGraph;
use crate::search::{search_path, CandidateDecision, SearchStats};

/// Ordered cones for one side of the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedBoundary {
    pub side: Side,
    /// Cones in driving order, at most `max_cones` long.
    pub cones: Vec<Cone>,
    /// The last cone repeats the first.
    pub closed: bool,
    /// The search produced more than `max_cones` cones.
    pub truncated: bool,
    /// Cones given for this side, before de-duplication.
    pub n_input: usize,
    /// Cones left after the proximity filter.
    pub n_valid: usize,
    /// Cone closest to the origin, where the search started.
    pub start: Cone,
    /// The start cone had no neighbor and was kept on its own.
    pub start_isolated: bool,
    pub stats: SearchStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decisions: Option<Vec<CandidateDecision>>,
}

impl OrderedBoundary {
    pub fn points(&self) -> Vec<Point> {
        self.cones.iter().map(|c| c.position).collect()
    }

    pub fn len(&self) -> usize {
        self.cones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }
}

/// Ordered left (blue) and right (yellow) boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackBoundaries {
    pub left: OrderedBoundary,
    pub right: OrderedBoundary,
}

/// Orders cone sets into boundary polylines.
///
/// # Examples
///
/// ```
/// use conetrack::{Cone, ConeColor, ConeOrderer, OrderConfig, Point, Side};
///
/// let cones = [
///     Cone::new(10.0, 0.0, ConeColor::Blue),
///     Cone::new(0.0, 0.0, ConeColor::Blue),
///     Cone::new(5.0, 0.0, ConeColor::Blue),
/// ];
/// let orderer = ConeOrderer::new(OrderConfig::default());
/// let left = orderer.order_side(Side::Left, &cones, Point::origin()).unwrap();
/// let xs: Vec<f64> = left.points().iter().map(|p| p.x).collect();
/// assert_eq!(xs, vec![0.0, 5.0, 10.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConeOrderer {
    config: OrderConfig,
}

impl ConeOrderer {
    pub fn new(config: OrderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut OrderConfig {
        &mut self.config
    }

    /// Order the cones of one side, starting from the cone closest to
    /// `origin`.
    ///
    /// The start cone is chosen from the full (de-duplicated) set before the
    /// proximity filter runs. If the filter then drops it, the boundary is
    /// just the start cone.
    pub fn order_side(
        &self,
        side: Side,
        cones: &[Cone],
        origin: Point,
    ) -> Result<OrderedBoundary, OrderError> {
        let search = &self.config.search;
        let unique = dedup_cones(cones);
        let start = nearest_to(&unique, origin).ok_or(OrderError::EmptyInput { side })?;
        if unique.len() < cones.len() {
            tracing::debug!(
                "{} side: collapsed {} duplicate cones",
                side,
                cones.len() - unique.len()
            );
        }

        let distances = DistanceMatrix::from_cones(&unique);
        let valid = filter_valid_cones(&unique, &distances, search.max_neighbor_distance);

        let mut boundary = OrderedBoundary {
            side,
            cones: vec![unique[start]],
            closed: false,
            truncated: false,
            n_input: cones.len(),
            n_valid: valid.len(),
            start: unique[start],
            start_isolated: false,
            stats: SearchStats::default(),
            decisions: None,
        };

        let Some(start_valid) = valid.position_of(start) else {
            tracing::info!(
                "{} side: start cone at ({:.2}, {:.2}) has no neighbors; boundary is the start cone only",
                side,
                unique[start].position.x,
                unique[start].position.y
            );
            boundary.start_isolated = true;
            return Ok(boundary);
        };

        let graph = NeighborGraph::build(&valid, &distances, search.max_neighbor_distance);
        let outcome = search_path(valid.cones(), &graph, start_valid, search);

        let mut ordered = outcome.cones(valid.cones());
        let truncated = ordered.len() > self.config.max_cones;
        ordered.truncate(self.config.max_cones);

        tracing::info!(
            "{} side: ordered {}/{} valid cones (closed={}, truncated={})",
            side,
            ordered.len(),
            valid.len(),
            outcome.closed && !truncated,
            truncated
        );

        boundary.cones = ordered;
        // Truncation always cuts the closing cone first.
        boundary.closed = outcome.closed && !truncated;
        boundary.truncated = truncated;
        boundary.stats = outcome.stats;
        boundary.decisions = search.record_decisions.then_some(outcome.decisions);
        Ok(boundary)
    }

    /// Order blue (left) and yellow (right) cones independently.
    pub fn order_track(
        &self,
        blue: &[Cone],
        yellow: &[Cone],
        origin: Point,
    ) -> Result<TrackBoundaries, OrderError> {
        Ok(TrackBoundaries {
            left: self.order_side(Side::Left, blue, origin)?,
            right: self.order_side(Side::Right, yellow, origin)?,
        })
    }

    /// Like [`Self::order_track`], with candidate decisions recorded on both
    /// sides and collected into a [`DebugDump`].
    ///
    /// The dump's config snapshot is the orderer's own config, unchanged.
    pub fn order_track_with_debug(
        &self,
        blue: &[Cone],
        yellow: &[Cone],
        origin: Point,
    ) -> Result<(TrackBoundaries, DebugDump), OrderError> {
        let mut recording = self.clone();
        recording.config.search.record_decisions = true;
        let track = recording.order_track(blue, yellow, origin)?;
        let dump = DebugDump::new(&self.config, origin, &track);
        Ok((track, dump))
    }

    /// Split a mixed detection set by color and order both sides.
    ///
    /// Orange, large orange and unknown cones are ignored.
    pub fn order_detections(
        &self,
        cones: &[Cone],
        origin: Point,
    ) -> Result<TrackBoundaries, OrderError> {
        let (blue, yellow) = split_by_side(cones);
        self.order_track(&blue, &yellow, origin)
    }
}

/// Partition detections into (left/blue, right/yellow) sets, keeping input
/// order within each side.
pub fn split_by_side(cones: &[Cone]) -> (Vec<Cone>, Vec<Cone>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for cone in cones {
        match cone.color.side() {
            Some(Side::Left) => left.push(*cone),
            Some(Side::Right) => right.push(*cone),
            None => {}
        }
    }
    (left, right)
}

/// One-shot helper: order both sides with default parameters and the given
/// per-side cap.
pub fn order_blue_and_yellow_cones(
    blue: &[Cone],
    yellow: &[Cone],
    origin: Point,
    max_cones: usize,
) -> Result<TrackBoundaries, OrderError> {
    ConeOrderer::new(OrderConfig::with_max_cones(max_cones)).order_track(blue, yellow, origin)
}
