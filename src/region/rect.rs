use super::Region;
use crate::utils::Axis;

/// Axis-aligned rectangular box
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    lo: [f64; 3],
    hi: [f64; 3],
}
impl Rect {
    pub fn new(xlo: f64, xhi: f64, ylo: f64, yhi: f64, zlo: f64, zhi: f64) -> Self {
        let rect = Self {
            lo: [xlo, ylo, zlo],
            hi: [xhi, yhi, zhi],
        };
        rect.assert_ordered();
        rect
    }
    /// Box with the given edge lengths, centered on the origin
    pub fn centered(lengths: [f64; 3]) -> Self {
        let [lx, ly, lz] = lengths;
        Self::new(
            -0.5 * lx,
            0.5 * lx,
            -0.5 * ly,
            0.5 * ly,
            -0.5 * lz,
            0.5 * lz,
        )
    }
    fn assert_ordered(&self) {
        for i in 0..3 {
            assert!(
                self.lo[i] < self.hi[i],
                "Lower bound {} should be less than upper bound {} along axis {}",
                self.lo[i],
                self.hi[i],
                i
            );
        }
    }

    pub fn lo(&self) -> [f64; 3] {
        self.lo
    }
    pub fn hi(&self) -> [f64; 3] {
        self.hi
    }
    pub fn get_bounds(&self, axis: Axis) -> [f64; 2] {
        [self.lo[axis.index()], self.hi[axis.index()]]
    }
    pub fn length(&self, axis: Axis) -> f64 {
        self.hi[axis.index()] - self.lo[axis.index()]
    }
    pub fn lengths(&self) -> [f64; 3] {
        [self.lx(), self.ly(), self.lz()]
    }
    pub fn lx(&self) -> f64 {
        self.length(Axis::X)
    }
    pub fn ly(&self) -> f64 {
        self.length(Axis::Y)
    }
    pub fn lz(&self) -> f64 {
        self.length(Axis::Z)
    }
    pub fn center(&self) -> [f64; 3] {
        [
            0.5 * (self.lo[0] + self.hi[0]),
            0.5 * (self.lo[1] + self.hi[1]),
            0.5 * (self.lo[2] + self.hi[2]),
        ]
    }
    /// Volume spanned by the first `dimensions` axes (the area in 2D)
    pub fn volume(&self, dimensions: usize) -> f64 {
        self.lengths().iter().take(dimensions).product()
    }

    /// Scale the given axis about the box center
    pub fn scale(&mut self, axis: Axis, factor: f64) {
        assert!(factor > 0.0, "Scale factor should be positive, found {}", factor);
        let i = axis.index();
        let c = 0.5 * (self.lo[i] + self.hi[i]);
        let half = 0.5 * factor * (self.hi[i] - self.lo[i]);
        self.lo[i] = c - half;
        self.hi[i] = c + half;
    }
}
impl Region for Rect {
    fn contains(&self, coord: &[f64; 3]) -> bool {
        (0..3).all(|i| self.lo[i] <= coord[i] && coord[i] <= self.hi[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_has_expected_bounds() {
        let rect = Rect::centered([200.0, 100.0, 1.0]);
        assert_eq!(rect.lo(), [-100.0, -50.0, -0.5]);
        assert_eq!(rect.hi(), [100.0, 50.0, 0.5]);
        assert_eq!(rect.volume(2), 20000.0);
        assert_eq!(rect.volume(3), 20000.0);
        assert!(rect.contains(&[0.0, 0.0, 0.0]));
        assert!(!rect.contains(&[150.0, 0.0, 0.0]));
    }

    #[test]
    fn scale_keeps_center() {
        let mut rect = Rect::new(0.0, 10.0, 0.0, 10.0, 0.0, 1.0);
        rect.scale(Axis::X, 0.5);
        assert_eq!(rect.get_bounds(Axis::X), [2.5, 7.5]);
        assert_eq!(rect.center(), [5.0, 5.0, 0.5]);
    }
}
