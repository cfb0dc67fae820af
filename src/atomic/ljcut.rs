use crate::{Atoms, Container, Error, NeighborList, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LJCutCoeff {
    epsilon: f64,
    sigma: f64,
    sigma6: f64,
    prefactor: f64,  // = 24 epsilon * sigma^6
    correction: f64, // energy at the cutoff, subtracted in shift mode
}
impl LJCutCoeff {
    pub fn new(epsilon: f64, sigma: f64, rcut: f64) -> Self {
        let sigma6 = sigma.powi(6);
        let rcut6 = rcut.powi(6);
        let correction = 4.0 * epsilon * sigma6 / rcut6 * (sigma6 / rcut6 - 1.0);
        Self {
            epsilon,
            sigma,
            sigma6,
            prefactor: 24.0 * epsilon * sigma6,
            correction,
        }
    }
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

/// Result of a pair force evaluation
#[derive(Clone, Debug, Default)]
pub struct PairForces {
    pub forces: Vec<[f64; 3]>,
    pub energy: f64,
    /// Sum of r_ij . f_ij over interacting pairs
    pub virial: f64,
}

/// Lennard-Jones 12-6 potential with a single cutoff shared by all type pairs
#[derive(Clone, Debug)]
pub struct LJCut {
    num_types: usize,
    rcut: f64,
    rcut2: f64,
    shift: bool,
    coeffs: Vec<LJCutCoeff>,
    coeff_set: Vec<bool>,
}
impl LJCut {
    pub fn new(num_types: usize, rcut: f64) -> Result<Self> {
        if !(rcut > 0.0) {
            return Err(Error::InvalidParam(format!(
                "pair cutoff should be positive, found {rcut}"
            )));
        }
        let new_len = num_types * num_types;
        Ok(Self {
            num_types,
            rcut,
            rcut2: rcut * rcut,
            shift: false,
            coeffs: vec![LJCut::default_coeff(); new_len],
            coeff_set: vec![false; new_len],
        })
    }
    /// Set the coefficients of an unordered type pair
    pub fn set_coeff(&mut self, type_i: usize, type_j: usize, epsilon: f64, sigma: f64) -> Result<()> {
        if type_i >= self.num_types || type_j >= self.num_types {
            return Err(Error::InvalidParam(format!(
                "type pair ({type_i}, {type_j}) out of range for {} types",
                self.num_types
            )));
        }
        if !(sigma > 0.0) || !epsilon.is_finite() {
            return Err(Error::InvalidParam(format!(
                "invalid pair coefficients epsilon={epsilon}, sigma={sigma}"
            )));
        }
        let coeff = LJCutCoeff::new(epsilon, sigma, self.rcut);
        for index in [self.type_idx(type_i, type_j), self.type_idx(type_j, type_i)] {
            self.coeffs[index] = coeff;
            self.coeff_set[index] = true;
        }
        Ok(())
    }
    /// Shift the energy to zero at the cutoff. Forces are unaffected.
    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }
    pub fn coeff(&self, type_i: usize, type_j: usize) -> Option<&LJCutCoeff> {
        let index = self.type_idx(type_i, type_j);
        self.coeff_set[index].then(|| &self.coeffs[index])
    }
    pub fn all_set(&self) -> bool {
        self.coeff_set.iter().all(|&x| x)
    }
    /// Unordered type pairs `(i, j)`, `i <= j`, without coefficients
    pub fn missing_pairs(&self) -> Vec<(usize, usize)> {
        (0..self.num_types)
            .flat_map(|i| (i..self.num_types).map(move |j| (i, j)))
            .filter(|&(i, j)| !self.coeff_set[self.type_idx(i, j)])
            .collect()
    }
    /// Unordered type pairs with coefficients
    pub fn defined_pairs(&self) -> Vec<(usize, usize)> {
        (0..self.num_types)
            .flat_map(|i| (i..self.num_types).map(move |j| (i, j)))
            .filter(|&(i, j)| self.coeff_set[self.type_idx(i, j)])
            .collect()
    }
    pub fn num_types(&self) -> usize {
        self.num_types
    }
    pub fn cutoff_distance(&self) -> f64 {
        self.rcut
    }

    /// Force magnitude over distance and energy for one pair at squared
    /// separation `r2`, or `None` beyond the cutoff.
    pub fn pair(&self, type_i: usize, type_j: usize, r2: f64) -> Option<(f64, f64)> {
        if r2 >= self.rcut2 {
            return None;
        }
        let coeff = &self.coeffs[self.type_idx(type_i, type_j)];
        // U(r) = 4 eps ((sig/r)^12 - (sig/r)^6)
        // F(r) = -dU/dr r_hat = 24 eps sig^6 / r^8 (2 sig^6 / r^6 - 1) r_vec
        let r6 = r2 * r2 * r2;
        let f_over_r = coeff.prefactor / (r6 * r2) * (2.0 * coeff.sigma6 / r6 - 1.0);
        let mut energy = 4.0 * coeff.epsilon * coeff.sigma6 / r6 * (coeff.sigma6 / r6 - 1.0);
        if self.shift {
            energy -= coeff.correction;
        }
        Some((f_over_r, energy))
    }

    /// Compute forces, energy and virial over a half neighbor list
    pub fn compute(&self, atoms: &Atoms, container: &Container, nlist: &NeighborList) -> PairForces {
        let mut result = PairForces {
            forces: vec![[0.0; 3]; atoms.num_atoms()],
            energy: 0.0,
            virial: 0.0,
        };
        for (i, neighbors) in nlist.neighbors().iter().enumerate() {
            let typei = atoms.types[i];
            let posi = &atoms.positions[i];
            for &j in neighbors {
                let r = container.separation(posi, &atoms.positions[j]);
                let r2 = r[0] * r[0] + r[1] * r[1] + r[2] * r[2];
                let Some((f_over_r, energy)) = self.pair(typei, atoms.types[j], r2) else {
                    continue;
                };
                for k in 0..3 {
                    result.forces[i][k] += r[k] * f_over_r;
                    result.forces[j][k] -= r[k] * f_over_r;
                }
                result.energy += energy;
                result.virial += r2 * f_over_r;
            }
        }
        result
    }

    fn type_idx(&self, type_i: usize, type_j: usize) -> usize {
        type_i * self.num_types + type_j
    }
    fn default_coeff() -> LJCutCoeff {
        LJCutCoeff::new(0.0, 1.0, 1.0)
    }
}
