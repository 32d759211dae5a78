//! Shared builders and checks for the ordering unit tests.

use crate::cone::{Cone, ConeColor};
use crate::geometry::{angle_between, segments_intersect};
use crate::{CROSSING_TOLERANCE, MIN_TURN_ANGLE_DEG};

pub(crate) fn blue_cones(points: &[(f64, f64)]) -> Vec<Cone> {
    points
        .iter()
        .map(|&(x, y)| Cone::new(x, y, ConeColor::Blue))
        .collect()
}

pub(crate) fn positions(cones: &[Cone]) -> Vec<(f64, f64)> {
    cones.iter().map(|c| (c.position.x, c.position.y)).collect()
}

/// Cones on an axis-aligned ellipse, starting at the bottom `(0, -b)` and
/// running counter-clockwise. `jitter` adds a deterministic wobble.
pub(crate) fn ellipse_track(a: f64, b: f64, n: usize, jitter: f64, color: ConeColor) -> Vec<Cone> {
    (0..n)
        .map(|k| {
            let kf = k as f64;
            let t = std::f64::consts::TAU * kf / n as f64 - std::f64::consts::FRAC_PI_2;
            Cone::new(
                a * t.cos() + jitter * (1.7 * kf).sin(),
                b * t.sin() + jitter * (2.3 * kf).cos(),
                color,
            )
        })
        .collect()
}

/// Assert the turn-angle and no-crossing guarantees on an ordered boundary.
///
/// A trailing loop-closure cone is stripped first: the closing step is not
/// subject to either check.
pub(crate) fn assert_path_valid(path: &[Cone]) {
    let open = match path {
        [first, .., last] if path.len() > 1 && first == last => &path[..path.len() - 1],
        _ => path,
    };

    for w in open.windows(3) {
        let angle = angle_between(w[0].position, w[1].position, w[2].position).to_degrees();
        assert!(
            angle >= MIN_TURN_ANGLE_DEG - 1e-9,
            "turn of {angle:.3} deg at {:?}",
            w[1].position
        );
    }

    let segments: Vec<(Cone, Cone)> = open.windows(2).map(|w| (w[0], w[1])).collect();
    for i in 0..segments.len() {
        for j in (i + 2)..segments.len() {
            assert!(
                !segments_intersect(
                    segments[i].0.position,
                    segments[i].1.position,
                    segments[j].0.position,
                    segments[j].1.position,
                    CROSSING_TOLERANCE,
                ),
                "segments {i} and {j} cross"
            );
        }
    }
}
