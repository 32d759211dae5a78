//! Cone, color and side types shared by every stage.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// 2D position in track coordinates.
pub type Point = nalgebra::Point2<f64>;

/// Color tag reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConeColor {
    Blue,
    Yellow,
    Orange,
    LargeOrange,
    #[default]
    Unknown,
}

impl ConeColor {
    /// Boundary side this color marks, if any.
    ///
    /// Orange cones (start/finish markers) and unknown detections belong to
    /// neither side and are ignored by the ordering engine.
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Blue => Some(Side::Left),
            Self::Yellow => Some(Side::Right),
            Self::Orange | Self::LargeOrange | Self::Unknown => None,
        }
    }
}

/// Track boundary side. Blue marks the left edge, yellow the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn color(self) -> ConeColor {
        match self {
            Self::Left => ConeColor::Blue,
            Self::Right => ConeColor::Yellow,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A detected track-boundary marker.
///
/// Cones carry no identity beyond their value: two cones with the same
/// position and color are the same cone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub position: Point,
    #[serde(default)]
    pub color: ConeColor,
}

impl Cone {
    pub fn new(x: f64, y: f64, color: ConeColor) -> Self {
        Self {
            position: Point::new(x, y),
            color,
        }
    }

    /// Euclidean distance between the two cone positions.
    #[inline]
    pub fn distance_to(&self, other: &Cone) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    // -0.0 and 0.0 compare equal, so fold them before hashing the bits.
    fn value_key(&self) -> (u64, u64, ConeColor) {
        (
            (self.position.x + 0.0).to_bits(),
            (self.position.y + 0.0).to_bits(),
            self.color,
        )
    }
}

/// Collapse value-equal cones to their first occurrence, keeping input order.
pub(crate) fn dedup_cones(cones: &[Cone]) -> Vec<Cone> {
    let mut seen = HashSet::with_capacity(cones.len());
    cones
        .iter()
        .filter(|c| seen.insert(c.value_key()))
        .copied()
        .collect()
}

/// Index of the cone closest to `origin`. The first cone wins ties.
///
/// Cones whose distance is not finite (NaN or infinite coordinates) are
/// never selected; `None` if no cone qualifies.
pub(crate) fn nearest_to(cones: &[Cone], origin: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, cone) in cones.iter().enumerate() {
        let d = nalgebra::distance(&cone.position, &origin);
        if !d.is_finite() {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_map_to_sides() {
        assert_eq!(ConeColor::Blue.side(), Some(Side::Left));
        assert_eq!(ConeColor::Yellow.side(), Some(Side::Right));
        assert_eq!(ConeColor::LargeOrange.side(), None);
        assert_eq!(Side::Left.color(), ConeColor::Blue);
        assert_eq!(Side::Right.color().side(), Some(Side::Right));
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let cones = vec![
            Cone::new(1.0, 2.0, ConeColor::Blue),
            Cone::new(3.0, 4.0, ConeColor::Blue),
            Cone::new(1.0, 2.0, ConeColor::Blue),
            Cone::new(1.0, 2.0, ConeColor::Yellow),
            Cone::new(-0.0, 0.0, ConeColor::Blue),
            Cone::new(0.0, 0.0, ConeColor::Blue),
        ];
        let unique = dedup_cones(&cones);
        assert_eq!(
            unique,
            vec![
                Cone::new(1.0, 2.0, ConeColor::Blue),
                Cone::new(3.0, 4.0, ConeColor::Blue),
                Cone::new(1.0, 2.0, ConeColor::Yellow),
                Cone::new(0.0, 0.0, ConeColor::Blue),
            ]
        );
    }

    #[test]
    fn nearest_prefers_first_on_ties() {
        let cones = vec![
            Cone::new(-1.0, 0.0, ConeColor::Blue),
            Cone::new(1.0, 0.0, ConeColor::Blue),
            Cone::new(5.0, 5.0, ConeColor::Blue),
        ];
        assert_eq!(nearest_to(&cones, Point::origin()), Some(0));
        assert_eq!(nearest_to(&cones, Point::new(4.0, 4.0)), Some(2));
        assert_eq!(nearest_to(&[], Point::origin()), None);
    }

    #[test]
    fn nearest_skips_non_finite_cones() {
        let cones = vec![
            Cone::new(3.0, 0.0, ConeColor::Blue),
            Cone::new(f64::NAN, 0.0, ConeColor::Blue),
            Cone::new(1.0, f64::INFINITY, ConeColor::Blue),
            Cone::new(2.0, 0.0, ConeColor::Blue),
        ];
        assert_eq!(nearest_to(&cones, Point::origin()), Some(3));
        assert_eq!(nearest_to(&cones[1..3], Point::origin()), None);
        assert_eq!(nearest_to(&cones, Point::new(f64::NAN, 0.0)), None);
    }

    #[test]
    fn cone_serializes_position_as_pair() {
        let cone = Cone::new(1.5, -2.0, ConeColor::LargeOrange);
        let json = serde_json::to_string(&cone).expect("serialize");
        assert_eq!(json, r#"{"position":[1.5,-2.0],"color":"large_orange"}"#);
        let back: Cone = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cone);
    }
}
