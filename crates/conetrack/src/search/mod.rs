//! Constrained greedy path search over the neighbor graph.
//!
//! Best-first traversal from a start cone. Candidates come off a global
//! min-heap keyed by the distance they were pushed with; each one is checked
//! in turn for:
//!
//! 1. **visited** – already on the path,
//! 2. **angle** – the turn at the current tip is sharper than the minimum,
//! 3. **crossing** – the new step would cross a path segment. By default the
//!    last segment is included, so two long consecutive steps never pass.
//!
//! Rejected candidates are dropped; they come back only if a later expansion
//! pushes them again. There is no backtracking, so the search is fast and
//! deterministic but does not guarantee full coverage.

mod frontier;
mod outcome;

use serde::Serialize;

use crate::cone::{Cone, Point};
use crate::config::{CrossingCheck, DegenerateAnglePolicy, SearchParams};
use crate::geometry::{angle_between, segments_intersect, try_angle_between};
use crate::neighbors::NeighborGraph;

use frontier::Frontier;
pub use outcome::{CandidateDecision, CandidateOutcome, SearchStats};

/// Ordered path produced by [`search_path`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Cone indices in path order. When `closed` is set the last entry
    /// repeats the first.
    pub order: Vec<usize>,
    /// The path was closed into a loop.
    pub closed: bool,
    pub stats: SearchStats,
    /// Per-pop decisions; empty unless `record_decisions` is enabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decisions: Vec<CandidateDecision>,
}

impl SearchOutcome {
    /// Resolve the path indices against the cone list it was searched over.
    pub fn cones(&self, cones: &[Cone]) -> Vec<Cone> {
        self.order.iter().map(|&i| cones[i]).collect()
    }
}

/// Run the greedy search from `start`.
///
/// `graph` must have been built over `cones` (same indexing). An
/// out-of-range `start` yields an empty outcome.
pub fn search_path(
    cones: &[Cone],
    graph: &NeighborGraph,
    start: usize,
    params: &SearchParams,
) -> SearchOutcome {
    debug_assert_eq!(cones.len(), graph.len());
    if start >= cones.len() {
        tracing::warn!(
            "search start index {} out of range for {} cones",
            start,
            cones.len()
        );
        return SearchOutcome::default();
    }
    PathSearch::new(cones, graph, params).run(start)
}

struct PathSearch<'a> {
    cones: &'a [Cone],
    graph: &'a NeighborGraph,
    params: &'a SearchParams,
    min_turn_rad: f64,
    path: Vec<usize>,
    visited: Vec<bool>,
    frontier: Frontier,
    stats: SearchStats,
    decisions: Vec<CandidateDecision>,
}

impl<'a> PathSearch<'a> {
    fn new(cones: &'a [Cone], graph: &'a NeighborGraph, params: &'a SearchParams) -> Self {
        Self {
            cones,
            graph,
            params,
            min_turn_rad: params.min_turn_angle_rad(),
            path: Vec::new(),
            visited: vec![false; cones.len()],
            frontier: Frontier::default(),
            stats: SearchStats::default(),
            decisions: Vec::new(),
        }
    }

    #[inline]
    fn position(&self, i: usize) -> Point {
        self.cones[i].position
    }

    fn run(mut self, start: usize) -> SearchOutcome {
        self.append(start);

        while !self.frontier.is_empty() {
            if let Some(max) = self.params.max_iterations {
                if self.stats.n_pops >= max {
                    self.stats.budget_exhausted = true;
                    tracing::warn!(
                        "path search stopped after {} pops with {} frontier entries left",
                        self.stats.n_pops,
                        self.frontier.len()
                    );
                    break;
                }
            }
            let Some(entry) = self.frontier.pop() else {
                break;
            };

            let outcome = self.evaluate(entry.index);
            tracing::trace!(
                "pop #{} cone {} (d={:.3}): {:?}",
                self.stats.n_pops,
                entry.index,
                entry.distance,
                outcome
            );
            if self.params.record_decisions {
                self.decisions.push(CandidateDecision {
                    step: self.stats.n_pops,
                    index: entry.index,
                    position: self.position(entry.index),
                    distance: entry.distance,
                    outcome,
                });
            }
            self.stats.n_pops += 1;
            self.stats.record(&outcome);

            if outcome.is_accepted() {
                self.append(entry.index);
            }
        }

        let closed = self.close_loop();
        tracing::debug!(
            "path search: {} cones on path (closed={}), pops={} angle_rej={} cross_rej={}",
            self.path.len(),
            closed,
            self.stats.n_pops,
            self.stats.n_rejected_angle,
            self.stats.n_rejected_crossing
        );

        SearchOutcome {
            order: self.path,
            closed,
            stats: self.stats,
            decisions: self.decisions,
        }
    }

    /// Put `i` on the path and push its unvisited neighbors.
    fn append(&mut self, i: usize) {
        self.path.push(i);
        self.visited[i] = true;

        let graph = self.graph;
        for n in graph.neighbors(i) {
            if !self.visited[n.index] {
                self.frontier.push(n.index, n.distance);
            }
        }
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
    }

    fn evaluate(&self, candidate: usize) -> CandidateOutcome {
        if self.visited[candidate] {
            return CandidateOutcome::RejectedVisited;
        }
        let cand = self.position(candidate);

        if let [.., prev2, prev1] = self.path.as_slice() {
            if let Some(angle) = self.turn_angle(self.position(*prev2), self.position(*prev1), cand)
            {
                if angle < self.min_turn_rad {
                    return CandidateOutcome::RejectedAngle {
                        angle_deg: angle.to_degrees(),
                    };
                }
            }
        }

        match self.crossed_segment(cand) {
            Some(segment) => CandidateOutcome::RejectedCrossing { segment },
            None => CandidateOutcome::Accepted,
        }
    }

    fn turn_angle(&self, a: Point, b: Point, c: Point) -> Option<f64> {
        match self.params.degenerate_angle {
            DegenerateAnglePolicy::Reject => Some(angle_between(a, b, c)),
            DegenerateAnglePolicy::SkipCheck => try_angle_between(a, b, c),
        }
    }

    /// First path segment the step `tip -> cand` would cross.
    fn crossed_segment(&self, cand: Point) -> Option<usize> {
        let tip = self.position(*self.path.last()?);
        let n_segments = self.path.len().saturating_sub(1);
        let n_checked = match self.params.crossing_check {
            CrossingCheck::AllSegments => n_segments,
            CrossingCheck::SkipAdjacent => n_segments.saturating_sub(1),
        };
        self.path.windows(2).take(n_checked).position(|w| {
            segments_intersect(
                self.position(w[0]),
                self.position(w[1]),
                tip,
                cand,
                self.params.crossing_tolerance,
            )
        })
    }

    fn close_loop(&mut self) -> bool {
        let (Some(&first), Some(&last)) = (self.path.first(), self.path.last()) else {
            return false;
        };
        if self.path.len() > 1
            && nalgebra::distance(&self.position(first), &self.position(last))
                < self.params.max_neighbor_distance
        {
            self.path.push(first);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::filter::{filter_valid_cones, ValidCones};
    use crate::test_utils::{assert_path_valid, blue_cones, ellipse_track, positions};
    use crate::{ConeColor, MAX_DISTANCE_BETWEEN_CONES};

    fn prepare(cones: &[Cone]) -> (ValidCones, NeighborGraph) {
        let m = DistanceMatrix::from_cones(cones);
        let valid = filter_valid_cones(cones, &m, MAX_DISTANCE_BETWEEN_CONES);
        let graph = NeighborGraph::build(&valid, &m, MAX_DISTANCE_BETWEEN_CONES);
        (valid, graph)
    }

    fn run(points: &[(f64, f64)], params: &SearchParams) -> (Vec<(f64, f64)>, SearchOutcome) {
        let cones = blue_cones(points);
        let (valid, graph) = prepare(&cones);
        let out = search_path(valid.cones(), &graph, 0, params);
        (positions(&out.cones(valid.cones())), out)
    }

    #[test]
    fn collinear_cones_in_order() {
        let (path, out) = run(
            &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)],
            &SearchParams::default(),
        );
        assert_eq!(path, vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        // Endpoints exactly 10 apart: closure needs a strictly smaller gap.
        assert!(!out.closed);
    }

    #[test]
    fn crossing_candidate_is_skipped_for_next_neighbor() {
        let params = SearchParams {
            record_decisions: true,
            ..SearchParams::default()
        };
        let (path, out) = run(
            &[(0.0, 0.0), (-6.0, 6.0), (-5.0, 7.0), (-4.0, -8.0), (8.0, 6.0)],
            &params,
        );
        assert_eq!(path, vec![(0.0, 0.0), (-6.0, 6.0), (-5.0, 7.0), (8.0, 6.0)]);
        assert!(!path.contains(&(-4.0, -8.0)));

        let kinds: Vec<CandidateOutcome> = out.decisions.iter().map(|d| d.outcome).collect();
        assert_eq!(
            kinds,
            vec![
                CandidateOutcome::Accepted,
                CandidateOutcome::Accepted,
                CandidateOutcome::RejectedVisited,
                CandidateOutcome::RejectedCrossing { segment: 0 },
                CandidateOutcome::Accepted,
            ]
        );
        assert_eq!(out.decisions[3].index, 3);
        assert_eq!(out.stats.n_pops, 5);
        assert_eq!(out.stats.n_accepted, 3);
        assert_eq!(out.stats.n_rejected_crossing, 1);
    }

    #[test]
    fn long_consecutive_steps_touch_at_the_tip() {
        let points = [(0.0, 0.0), (9.0, 0.0), (18.0, 0.0)];
        let params = SearchParams {
            record_decisions: true,
            ..SearchParams::default()
        };
        let (path, out) = run(&points, &params);
        // (18, 0) is rejected; the two remaining cones are 9 apart and close.
        assert_eq!(path, vec![(0.0, 0.0), (9.0, 0.0), (0.0, 0.0)]);
        assert!(out.closed);
        assert_eq!(
            out.decisions.last().map(|d| (d.index, d.outcome)),
            Some((2, CandidateOutcome::RejectedCrossing { segment: 0 }))
        );

        let relaxed = SearchParams {
            crossing_check: CrossingCheck::SkipAdjacent,
            ..SearchParams::default()
        };
        let (path, out) = run(&points, &relaxed);
        assert_eq!(path, vec![(0.0, 0.0), (9.0, 0.0), (18.0, 0.0)]);
        assert!(!out.closed);
        assert_eq!(out.stats.n_rejected_crossing, 0);
    }

    #[test]
    fn sharp_turn_is_rejected() {
        let params = SearchParams {
            record_decisions: true,
            ..SearchParams::default()
        };
        let (path, out) = run(&[(0.0, 0.0), (-2.0, 9.0), (-8.0, 9.0), (9.0, 3.0)], &params);
        assert_eq!(path, vec![(0.0, 0.0), (-2.0, 9.0), (-8.0, 9.0)]);
        assert_eq!(out.stats.n_rejected_angle, 1);
        match out.decisions.last().map(|d| d.outcome) {
            Some(CandidateOutcome::RejectedAngle { angle_deg }) => {
                assert_abs_diff_eq!(angle_deg, 19.44, epsilon = 0.01);
            }
            other => panic!("expected angle rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejected_candidate_does_not_block_closure() {
        let (path, out) = run(
            &[(0.0, 0.0), (1.0, 5.0), (0.0, -7.0), (-6.0, 7.0)],
            &SearchParams::default(),
        );
        assert_eq!(
            path,
            vec![(0.0, 0.0), (1.0, 5.0), (-6.0, 7.0), (0.0, 0.0)]
        );
        assert!(out.closed);
        assert_eq!(out.stats.n_rejected_angle, 1);
    }

    #[test]
    fn coincident_cones_follow_degenerate_policy() {
        let cones = vec![
            Cone::new(0.0, 0.0, ConeColor::Blue),
            Cone::new(5.0, 0.0, ConeColor::Blue),
            Cone::new(5.0, 0.0, ConeColor::Unknown),
            Cone::new(10.0, 0.0, ConeColor::Blue),
        ];
        let (valid, graph) = prepare(&cones);

        let reject = search_path(valid.cones(), &graph, 0, &SearchParams::default());
        assert_eq!(reject.order, vec![0, 1, 3]);
        // Twice on the way out, once more when the far end is pushed back.
        assert_eq!(reject.stats.n_rejected_angle, 3);

        let skip = SearchParams {
            degenerate_angle: DegenerateAnglePolicy::SkipCheck,
            ..SearchParams::default()
        };
        let skipped = search_path(valid.cones(), &graph, 0, &skip);
        assert_eq!(skipped.order, vec![0, 1, 2, 3]);
        assert_eq!(skipped.stats.n_rejected_angle, 0);
    }

    #[test]
    fn closes_full_loop_on_oval_track() {
        let cones = ellipse_track(36.0, 26.0, 36, 0.0, ConeColor::Blue);
        let (valid, graph) = prepare(&cones);
        let out = search_path(valid.cones(), &graph, 0, &SearchParams::default());
        assert!(out.closed);
        assert_eq!(out.order.len(), 37);
        assert_eq!(out.order.first(), out.order.last());
        let mut seen = out.order[..36].to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..36).collect::<Vec<_>>());
        assert_path_valid(&out.cones(valid.cones()));
    }

    #[test]
    fn jittered_track_paths_are_valid() {
        for (a, b, n, jitter) in [(36.0, 26.0, 36, 0.4), (40.0, 25.0, 40, 0.5), (50.0, 30.0, 48, 0.3)]
        {
            let cones = ellipse_track(a, b, n, jitter, ConeColor::Yellow);
            let (valid, graph) = prepare(&cones);
            let out = search_path(valid.cones(), &graph, 0, &SearchParams::default());
            assert!(out.order.len() > 1);
            assert_path_valid(&out.cones(valid.cones()));
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let cones = ellipse_track(40.0, 25.0, 40, 0.5, ConeColor::Blue);
        let (valid, graph) = prepare(&cones);
        let params = SearchParams {
            record_decisions: true,
            ..SearchParams::default()
        };
        let first = search_path(valid.cones(), &graph, 3, &params);
        let second = search_path(valid.cones(), &graph, 3, &params);
        assert_eq!(first, second);
    }

    #[test]
    fn iteration_budget_stops_early() {
        let cones = ellipse_track(36.0, 26.0, 36, 0.0, ConeColor::Blue);
        let (valid, graph) = prepare(&cones);
        let params = SearchParams {
            max_iterations: Some(5),
            ..SearchParams::default()
        };
        let out = search_path(valid.cones(), &graph, 0, &params);
        assert!(out.stats.budget_exhausted);
        assert_eq!(out.stats.n_pops, 5);
        assert!(out.order.len() <= 6);
    }

    #[test]
    fn decisions_are_off_by_default() {
        let (_, out) = run(
            &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)],
            &SearchParams::default(),
        );
        assert!(out.decisions.is_empty());
        assert_eq!(out.stats.n_accepted, 2);
    }

    #[test]
    fn out_of_range_start_is_empty() {
        let cones = blue_cones(&[(0.0, 0.0), (5.0, 0.0)]);
        let (valid, graph) = prepare(&cones);
        let out = search_path(valid.cones(), &graph, 9, &SearchParams::default());
        assert_eq!(out, SearchOutcome::default());
    }
}
