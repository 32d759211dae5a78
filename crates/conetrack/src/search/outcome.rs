use serde::{Deserialize, Serialize};

use crate::cone::Point;

/// Result of evaluating one popped frontier candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateOutcome {
    /// Appended to the path.
    Accepted,
    /// Already on the path.
    RejectedVisited,
    /// Turn angle at the current tip is below the minimum.
    RejectedAngle {
        /// Measured turn angle in degrees.
        angle_deg: f64,
    },
    /// The step would cross an existing path segment.
    RejectedCrossing {
        /// Index of the crossed segment (`path[segment] -> path[segment + 1]`).
        segment: usize,
    },
}

impl CandidateOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// One frontier pop, recorded when `SearchParams::record_decisions` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateDecision {
    /// Zero-based pop counter.
    pub step: usize,
    /// Filtered index of the candidate cone.
    pub index: usize,
    pub position: Point,
    /// Distance the entry was pushed with.
    pub distance: f64,
    pub outcome: CandidateOutcome,
}

/// Counters collected over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub n_pops: usize,
    pub n_accepted: usize,
    pub n_rejected_visited: usize,
    pub n_rejected_angle: usize,
    pub n_rejected_crossing: usize,
    /// Largest frontier size seen.
    pub max_frontier: usize,
    /// The iteration budget ran out before the frontier drained.
    pub budget_exhausted: bool,
}

impl SearchStats {
    pub(crate) fn record(&mut self, outcome: &CandidateOutcome) {
        match outcome {
            CandidateOutcome::Accepted => self.n_accepted += 1,
            CandidateOutcome::RejectedVisited => self.n_rejected_visited += 1,
            CandidateOutcome::RejectedAngle { .. } => self.n_rejected_angle += 1,
            CandidateOutcome::RejectedCrossing { .. } => self.n_rejected_crossing += 1,
        }
    }
}
