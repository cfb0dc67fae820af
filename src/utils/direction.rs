#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}
impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
    /// Axes spanned by a system of the given dimensionality
    pub fn in_plane(dimensions: usize) -> &'static [Axis] {
        if dimensions == 2 {
            &Self::ALL[..2]
        } else {
            &Self::ALL
        }
    }
}
