/// Linear index into a 3D grid, stored together with the grid bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Index {
    idx: usize,
    bounds: [usize; 3],
}
impl Index {
    /// ```rust
    /// use trimer::utils::Index;
    ///
    /// let index = Index::from_3d(&[1, 2, 0], &[3, 4, 1]);
    /// assert_eq!(index.idx(), 6);
    /// assert_eq!(index.to_3d(), [1, 2, 0]);
    /// ```
    pub fn from_3d(indices: &[usize; 3], bounds: &[usize; 3]) -> Self {
        let [x, y, z] = *indices;
        let [nx, ny, nz] = *bounds;
        assert!(
            x < nx && y < ny && z < nz,
            "3D index {:?} out of bounds {:?}",
            indices,
            bounds
        );
        let idx = x * ny * nz + y * nz + z;
        Self {
            idx,
            bounds: *bounds,
        }
    }
    pub fn from_linear(idx: usize, bounds: &[usize; 3]) -> Self {
        assert!(
            idx < bounds[0] * bounds[1] * bounds[2],
            "Index {} out of bounds {:?}",
            idx,
            bounds
        );
        Self {
            idx,
            bounds: *bounds,
        }
    }
    pub fn to_3d(&self) -> [usize; 3] {
        let z = self.idx % self.bounds[2];
        let q = self.idx / self.bounds[2];
        let y = q % self.bounds[1];
        let x = q / self.bounds[1];
        [x, y, z]
    }
    pub fn idx(&self) -> usize {
        self.idx
    }
    pub fn bounds(&self) -> [usize; 3] {
        self.bounds
    }
}
