use std::fmt;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position in screen space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, p: &Point) -> f64 {
        ((self.x - p.x).powi(2) + (self.y - p.y).powi(2)).sqrt()
    }

    /// Angle at `self` between the rays towards `b` and `c` (law of cosines),
    /// in `[0, π]`. NaN when `self` coincides with `b` or `c`.
    pub fn angle(&self, b: &Point, c: &Point) -> f64 {
        let ab = self.distance(b);
        let ac = self.distance(c);
        let bc = b.distance(c);

        let cos = (ab * ab + ac * ac - bc * bc) / (2.0 * ab * ac);
        cos.clamp(-1.0, 1.0).acos()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

// ---------------------------------------------------------------------------
// Path – move-to followed by line-to segments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
}

impl Segment {
    pub fn point(&self) -> Point {
        match self {
            Segment::MoveTo(p) | Segment::LineTo(p) => *p,
        }
    }
}

/// A polyline. The first point added becomes the move-to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new(start: Point) -> Self {
        Path {
            segments: vec![Segment::MoveTo(start)],
        }
    }

    pub fn add(&mut self, p: Point) {
        if self.segments.is_empty() {
            self.segments.push(Segment::MoveTo(p));
        } else {
            self.segments.push(Segment::LineTo(p));
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(Segment::point)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<Point> for Path {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut path = Path::default();
        for p in iter {
            path.add(p);
        }
        path
    }
}

/// SVG path data: `M x y L x y ...`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, seg) in self.segments.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            match seg {
                Segment::MoveTo(p) => write!(f, "M{} {}", p.x, p.y)?,
                Segment::LineTo(p) => write!(f, "L{} {}", p.x, p.y)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn right_angle_at_vertex() {
        let a = Point::new(0.0, 0.0);
        let angle = a.angle(&Point::new(0.0, 5.0), &Point::new(3.0, 0.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_give_flat_angle() {
        let a = Point::new(1.0, 1.0);
        let angle = a.angle(&Point::new(0.0, 1.0), &Point::new(2.0, 1.0));
        assert!((angle - PI).abs() < 1e-12);
    }

    #[test]
    fn coincident_vertex_gives_nan() {
        let a = Point::new(1.0, 1.0);
        assert!(a.angle(&a, &Point::new(2.0, 1.0)).is_nan());
    }

    #[test]
    fn path_renders_svg_data() {
        let mut path = Path::new(Point::new(600.0, 310.0));
        path.add(Point::new(650.0, 310.5));
        assert_eq!(path.to_string(), "M600 310 L650 310.5");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn collected_path_starts_with_move_to() {
        let path: Path = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)].into_iter().collect();
        assert_eq!(path.segments()[0], Segment::MoveTo(Point::new(1.0, 2.0)));
        assert_eq!(path.segments()[1], Segment::LineTo(Point::new(3.0, 4.0)));
        assert!(Path::default().to_string().is_empty());
    }
}
