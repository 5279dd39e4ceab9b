/// A closed range of ray parameters (or coordinates) `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Create an interval from two values in either order.
    pub fn ordered(a: f32, b: f32) -> Self {
        if a > b {
            Self::new(b, a)
        } else {
            Self::new(a, b)
        }
    }

    /// Length of the interval; negative when `min > max`.
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true unless the two intervals are disjoint.
    ///
    /// NaN bounds never make two intervals disjoint.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.min > other.max || other.min > self.max)
    }

    /// Narrow this interval to its overlap with `other`.
    ///
    /// A bound is only replaced when the other bound is strictly tighter, so a
    /// NaN on either side leaves the current bound in place.
    pub fn intersect(&self, other: &Interval) -> Interval {
        let min = if other.min > self.min { other.min } else { self.min };
        let max = if other.max < self.max { other.max } else { self.max };
        Interval::new(min, max)
    }

    /// The whole real line.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        assert_eq!(Interval::new(-1.5, 2.5).size(), 4.0);
        assert_eq!(Interval::new(3.0, 1.0).size(), -2.0);
    }

    #[test]
    fn test_interval_ordered() {
        assert_eq!(Interval::ordered(3.0, 1.0), Interval::new(1.0, 3.0));
        assert_eq!(Interval::ordered(1.0, 3.0), Interval::new(1.0, 3.0));
        assert_eq!(
            Interval::ordered(f32::INFINITY, f32::NEG_INFINITY),
            Interval::UNIVERSE
        );
    }

    #[test]
    fn test_interval_overlaps() {
        let a = Interval::new(0.0, 5.0);
        assert!(a.overlaps(&Interval::new(4.0, 8.0)));
        assert!(a.overlaps(&Interval::new(5.0, 8.0)));
        assert!(!a.overlaps(&Interval::new(5.5, 8.0)));
        assert!(!a.overlaps(&Interval::new(-3.0, -0.5)));
        assert!(a.overlaps(&Interval::new(f32::NAN, f32::NAN)));
    }

    #[test]
    fn test_interval_intersect() {
        let a = Interval::new(0.0, 5.0);
        assert_eq!(a.intersect(&Interval::new(2.0, 8.0)), Interval::new(2.0, 5.0));
        assert_eq!(a.intersect(&Interval::UNIVERSE), a);

        // NaN bounds do not replace finite ones
        assert_eq!(a.intersect(&Interval::new(f32::NAN, 3.0)), Interval::new(0.0, 3.0));
    }
}
