use super::Lattice;

/// Two dimensional square lattice with one site per cell
#[derive(Clone, Debug)]
pub struct Square {
    a: f64,
}
impl Square {
    pub fn new(a: f64) -> Self {
        let s = Self { a };
        s.assert_positive();
        s
    }
    pub fn from_density(rho: f64) -> Self {
        Self::new((1.0 / rho).sqrt())
    }
    fn assert_positive(&self) {
        assert!(
            self.a > 0.0,
            "Lattice constant should be positive, found {}",
            self.a
        );
    }
    pub fn a(&self) -> f64 {
        self.a
    }
}
impl Lattice for Square {
    // A 2D box still has unit thickness along z
    fn cell_lengths(&self) -> [f64; 3] {
        [self.a, self.a, 1.0]
    }
    fn basis(&self) -> Vec<[f64; 3]> {
        vec![[0.0, 0.0, 0.0]]
    }
    fn dimensions(&self) -> usize {
        2
    }
}
