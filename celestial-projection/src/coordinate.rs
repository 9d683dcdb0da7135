/// A pair of coordinates.
///
/// Depending on where it flows, a `Point` holds celestial coordinates
/// (right ascension, declination), native spherical coordinates (φ, θ), all in
/// degrees, or projection-plane coordinates in degrees-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Right ascension, for points holding celestial coordinates.
    #[inline]
    pub fn ra(&self) -> f64 {
        self.x
    }

    /// Declination, for points holding celestial coordinates.
    #[inline]
    pub fn dec(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance in the plane.
    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new_and_accessors() {
        let p = Point::new(180.0, 45.0);
        assert_eq!(p.x(), 180.0);
        assert_eq!(p.y(), 45.0);
        assert_eq!(p.ra(), 180.0);
        assert_eq!(p.dec(), 45.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn test_point_tuple_conversions() {
        let p: Point = (1.5, -2.5).into();
        assert_eq!(p, Point::new(1.5, -2.5));
        let (x, y): (f64, f64) = p.into();
        assert_eq!((x, y), (1.5, -2.5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_point_serde_round_trip() {
        for original in [
            Point::new(83.5, -5.25),
            Point::new(0.0, 90.0),
            Point::new(-0.125, 359.5),
        ] {
            let json = serde_json::to_string(&original).unwrap();
            let deserialized: Point = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, original);
        }
    }
}
