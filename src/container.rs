use crate::{region::Rect, utils::Axis};

/// Boundary conditions for simulation box.
///
/// PP: Periodic (must be set for both sides)
/// FF: Fixed boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BC {
    PP,
    FF,
}
impl BC {
    /// Check whether the boundary condition is periodic
    pub fn is_periodic(&self) -> bool {
        matches!(self, BC::PP)
    }
}

/// Simulation box, represented by a rectangular box and boundary conditions
#[derive(Clone, Debug)]
pub struct Container {
    rect: Rect,
    bc: [BC; 3],
}
impl Container {
    // Creation

    /// Create a new container from a rectangular box and boundary conditions
    pub fn new(rect: Rect, xbc: BC, ybc: BC, zbc: BC) -> Self {
        Self {
            rect,
            bc: [xbc, ybc, zbc],
        }
    }
    /// Container for a system of the given dimensionality: periodic in the
    /// plane, fixed along z when 2D
    pub fn with_dimensions(rect: Rect, dimensions: usize) -> Self {
        let zbc = if dimensions == 2 { BC::FF } else { BC::PP };
        Self::new(rect, BC::PP, BC::PP, zbc)
    }

    // Getters
    /// Check whether the boundary condition along a given axis (X, Y, Z) is periodic
    pub fn is_periodic(&self, axis: Axis) -> bool {
        self.bc[axis.index()].is_periodic()
    }
    /// A reference to the rectangular box
    pub fn rect(&self) -> &Rect {
        &self.rect
    }
    pub fn volume(&self, dimensions: usize) -> f64 {
        self.rect.volume(dimensions)
    }

    // Periodic geometry

    /// Wrap a position back into the box along periodic axes, counting the
    /// crossings in `image`
    pub fn wrap(&self, position: &mut [f64; 3], image: &mut [i32; 3]) {
        for axis in Axis::ALL {
            if !self.is_periodic(axis) {
                continue;
            }
            let i = axis.index();
            let [lo, hi] = self.rect.get_bounds(axis);
            let length = hi - lo;
            if position[i] < lo || position[i] >= hi {
                let shift = ((position[i] - lo) / length).floor();
                position[i] -= shift * length;
                image[i] += shift as i32;
                // Guard against rounding landing exactly on the upper bound
                if position[i] >= hi {
                    position[i] -= length;
                    image[i] += 1;
                }
            }
        }
    }
    /// Shortest periodic image of a separation vector
    pub fn minimum_image(&self, delta: [f64; 3]) -> [f64; 3] {
        let mut d = delta;
        for axis in Axis::ALL {
            if self.is_periodic(axis) {
                let i = axis.index();
                let length = self.rect.length(axis);
                d[i] -= length * (d[i] / length).round();
            }
        }
        d
    }
    /// Minimum image separation `a - b`
    pub fn separation(&self, a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
        self.minimum_image([a[0] - b[0], a[1] - b[1], a[2] - b[2]])
    }

    // Setters

    /// Scale the box about its center along the given axes
    pub fn scale(&mut self, axes: &[Axis], factor: f64) {
        for &axis in axes {
            self.rect.scale(axis, factor);
        }
    }
}
