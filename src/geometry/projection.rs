use std::f64::consts::PI;

use super::point::{Path, Point};
use crate::data::Column;

/// Share of the canvas used for plotting.
pub const CANVAS_MARGIN: f64 = 0.95;

/// Horizontal offset of the spiral's turn reference point.
const SPIRAL_REFERENCE_OFFSET: f64 = 10.0;
/// The walk starts this far below the start point.
const SPIRAL_INITIAL_DROP: f64 = 10.0;

const PERSPECTIVE_LEFT: f64 = 50.0;
const PERSPECTIVE_RISE: f64 = 70.0;
const PERSPECTIVE_DEPTH: f64 = 0.9;

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Canvas { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    fn x_range(&self) -> f64 {
        self.width * CANVAS_MARGIN
    }

    fn y_range(&self) -> f64 {
        self.height * CANVAS_MARGIN
    }
}

/// NaN cells and degenerate (zero-range) columns contribute nothing.
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Spiral
// ---------------------------------------------------------------------------

/// Result of a spiral walk: the plotted point and the trail leading to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralWalk {
    pub point: Point,
    pub path: Path,
}

/// Angular walk over the fields of `row`.
///
/// Each field turns the walk by an angle proportional to its value (π for
/// the first field, 0.8π afterwards) relative to a heading derived from the
/// previous step, then advances `step` pixels. The heading is `0.6π ± θ`,
/// where θ is the angle at the new position between the previous position
/// and a point to its right; `+` when the walk moved up or stayed level.
pub fn spiral(row: &[f64], columns: &[Column], start: Point, step: f64) -> SpiralWalk {
    let mut center = start.offset(0.0, SPIRAL_INITIAL_DROP);
    let mut path = Path::new(center);

    let mut start_angle = 0.0;
    let mut angle_range = PI;

    for (i, (x, col)) in row.iter().zip(columns).enumerate() {
        let angle = finite_or_zero(angle_range / col.range() * x) + start_angle;

        let origin = center;
        center = center.offset(step * angle.cos(), step * angle.sin());
        let other = center.offset(SPIRAL_REFERENCE_OFFSET, 0.0);

        path.add(center);

        if i == 0 {
            angle_range = PI * 0.8;
        }
        let turn = center.angle(&origin, &other);
        start_angle = if center.y <= origin.y {
            PI * 0.6 + turn
        } else {
            PI * 0.6 - turn
        };
    }

    SpiralWalk {
        point: center,
        path,
    }
}

// ---------------------------------------------------------------------------
// Parallel coordinates
// ---------------------------------------------------------------------------

/// One feature of a row placed on the parallel-coordinate canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub at: Point,
    /// Feature index (drives the per-feature color).
    pub feature: usize,
    /// The cell was NaN; drawn at `x = 0` without a feature color.
    pub missing: bool,
}

/// Parallel-coordinate layout.
///
/// The trailing field (the appended distance) sets the row's y; every other
/// field is placed along x proportionally to its value.
pub fn parallel(row: &[f64], columns: &[Column], canvas: Canvas, radius: f64) -> Vec<Marker> {
    let (Some(distance), Some(dc)) = (row.last(), columns.last()) else {
        return Vec::new();
    };
    let y = finite_or_zero(distance * canvas.y_range() / dc.max) + radius * 2.0;
    let fields = row.len() - 1;

    row[..fields]
        .iter()
        .zip(columns)
        .enumerate()
        .map(|(i, (n, col))| {
            if n.is_nan() {
                Marker {
                    at: Point::new(0.0, y),
                    feature: i,
                    missing: true,
                }
            } else {
                let x = finite_or_zero(canvas.x_range() / col.range() * n) + radius * 2.0;
                Marker {
                    at: Point::new(x, y),
                    feature: i,
                    missing: false,
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Perspective
// ---------------------------------------------------------------------------

/// Perspective layout: one polyline per row.
///
/// The trailing distance field moves the row down the canvas and widens it;
/// the remaining fields rise above that baseline by their normalized value.
pub fn perspective(row: &[f64], columns: &[Column], canvas: Canvas) -> Path {
    let (Some(dist), Some(dc)) = (row.last(), columns.last()) else {
        return Path::default();
    };
    let depth = (dist - dc.min) / dc.range();
    let base = finite_or_zero(canvas.y_range() * PERSPECTIVE_DEPTH * depth);
    let width = finite_or_zero(canvas.x_range() * depth);
    let step_x = width / columns.len() as f64;
    let fields = row.len() - 1;

    row[..fields]
        .iter()
        .zip(columns)
        .enumerate()
        .map(|(i, (n, col))| {
            let x = step_x * i as f64 + PERSPECTIVE_LEFT;
            let y = base + finite_or_zero(PERSPECTIVE_RISE * col.scale(*n));
            Point::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    fn scaled_with_distance() -> Dataset {
        let mut ds = Dataset::from_records(
            vec![vec![0.0, 10.0], vec![10.0, 0.0], vec![5.0, 5.0], vec![2.0, 8.0]],
            false,
        );
        ds.scale();
        ds.append_distance(&[0.0, 0.0]).unwrap();
        ds
    }

    #[test]
    fn spiral_is_deterministic() {
        let ds = scaled_with_distance();
        let start = Point::new(600.0, 300.0);
        for row in ds.rows() {
            let a = spiral(row, ds.columns(), start, 50.0);
            let b = spiral(row, ds.columns(), start, 50.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn spiral_path_has_one_vertex_per_field() {
        let ds = scaled_with_distance();
        let walk = spiral(&ds.rows()[0], ds.columns(), Point::new(0.0, 0.0), 50.0);
        assert_eq!(walk.path.len(), ds.columns().len() + 1);
        assert_eq!(walk.path.points().last(), Some(walk.point));
    }

    #[test]
    fn spiral_steps_have_fixed_length() {
        let ds = scaled_with_distance();
        let walk = spiral(&ds.rows()[2], ds.columns(), Point::new(100.0, 100.0), 25.0);
        let pts: Vec<Point> = walk.path.points().collect();
        for w in pts.windows(2) {
            assert!((w[0].distance(&w[1]) - 25.0).abs() < 1e-9);
        }
    }

    #[test]
    fn spiral_first_step_follows_value() {
        // first field 0 → angle 0: step straight right from (0, 10)
        let mut col = Column::new(0);
        col.add(0.0);
        col.add(1.0);
        let walk = spiral(&[0.0], &[col.clone()], Point::new(0.0, 0.0), 10.0);
        assert!((walk.point.x - 10.0).abs() < 1e-12);
        assert!((walk.point.y - 10.0).abs() < 1e-12);

        // value 0.5 → angle π/2: step straight down
        let walk = spiral(&[0.5], &[col], Point::new(0.0, 0.0), 10.0);
        assert!(walk.point.x.abs() < 1e-9);
        assert!((walk.point.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn spiral_second_heading_uses_turn_rule() {
        let mut col = Column::new(0);
        col.add(0.0);
        col.add(1.0);
        let cols = [col.clone(), Column { i: 1, ..col }];

        // first step goes right (level, so y <= origin.y); θ = π,
        // heading 1.6π, second field 0 keeps that heading
        let walk = spiral(&[0.0, 0.0], &cols, Point::new(0.0, 0.0), 10.0);
        let heading = 1.6 * PI;
        assert!((walk.point.x - (10.0 + 10.0 * heading.cos())).abs() < 1e-9);
        assert!((walk.point.y - (10.0 + 10.0 * heading.sin())).abs() < 1e-9);
    }

    #[test]
    fn spiral_survives_nan_and_constant_columns() {
        let ds = Dataset::from_records(vec![vec![f64::NAN, 3.0], vec![1.0, 3.0]], false);
        let walk = spiral(&ds.rows()[0], ds.columns(), Point::new(0.0, 0.0), 10.0);
        assert!(walk.point.x.is_finite() && walk.point.y.is_finite());
    }

    #[test]
    fn parallel_places_fields_along_x() {
        let ds = scaled_with_distance();
        let canvas = Canvas::new(1200.0, 590.0);
        let markers = parallel(&ds.rows()[0], ds.columns(), canvas, 3.0);

        assert_eq!(markers.len(), 2);
        // row 0 scaled = [0, 1], distance 1
        assert_eq!(markers[0].at.x, 6.0);
        assert!((markers[1].at.x - (1200.0 * 0.95 + 6.0)).abs() < 1e-9);
        let dmax = ds.columns()[2].max;
        let expected_y = 590.0 * 0.95 / dmax + 6.0;
        assert!(markers.iter().all(|m| (m.at.y - expected_y).abs() < 1e-9));
        assert_eq!(markers[1].feature, 1);
    }

    #[test]
    fn parallel_marks_missing_cells() {
        let mut ds = Dataset::from_records(vec![vec![f64::NAN, 1.0], vec![2.0, 3.0]], false);
        ds.append_distance(&[0.0, 0.0]).unwrap();
        let markers = parallel(&ds.rows()[0], ds.columns(), Canvas::new(100.0, 100.0), 3.0);
        assert!(markers[0].missing);
        assert_eq!(markers[0].at.x, 0.0);
        assert!(!markers[1].missing);
    }

    #[test]
    fn parallel_of_empty_row_is_empty() {
        assert!(parallel(&[], &[], Canvas::new(10.0, 10.0), 3.0).is_empty());
    }

    #[test]
    fn perspective_baseline_tracks_distance() {
        let ds = scaled_with_distance();
        let canvas = Canvas::new(1200.0, 700.0);
        let dc = &ds.columns()[2];

        for row in ds.rows() {
            let path = perspective(row, ds.columns(), canvas);
            let pts: Vec<Point> = path.points().collect();
            assert_eq!(pts.len(), 2);
            assert_eq!(pts[0].x, 50.0);

            let depth = (row[2] - dc.min) / (dc.max - dc.min);
            let base = 700.0 * 0.95 * 0.9 * depth;
            let width = 1200.0 * 0.95 * depth;
            assert!((pts[1].x - (width / 3.0 + 50.0)).abs() < 1e-9);
            assert!((pts[0].y - (base + 70.0 * row[0])).abs() < 1e-9);
        }
    }

    #[test]
    fn perspective_treats_nan_as_zero_rise() {
        let mut ds = Dataset::from_records(vec![vec![f64::NAN, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]], false);
        ds.scale();
        ds.append_distance(&[0.0, 0.0]).unwrap();
        let path = perspective(&ds.rows()[0], ds.columns(), Canvas::new(100.0, 100.0));
        let first = path.points().next().unwrap();
        assert!(first.y.is_finite());
    }
}
