use log::debug;

use super::*;
use crate::{compute::Thermo, utils::Axis};

/// Target state and coupling constants of the NPT integrator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NptParams {
    /// Target temperature (energy units)
    pub kt: f64,
    /// Thermostat coupling time constant
    pub tau: f64,
    /// Target pressure
    pub p: f64,
    /// Barostat coupling time constant
    pub tau_p: f64,
}
impl NptParams {
    fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(Error::InvalidParam(format!(
                    "NPT {name} should be positive, found {value}"
                )))
            }
        };
        positive("kT", self.kt)?;
        positive("tau", self.tau)?;
        positive("tauP", self.tau_p)?;
        if !self.p.is_finite() {
            return Err(Error::InvalidParam(format!(
                "NPT pressure should be finite, found {}",
                self.p
            )));
        }
        Ok(())
    }
}

/// Partial update of `NptParams`; `None` keeps the current value
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NptUpdate {
    pub kt: Option<f64>,
    pub tau: Option<f64>,
    pub p: Option<f64>,
    pub tau_p: Option<f64>,
}

/// Isothermal-isobaric integration of rigid bodies and point particles.
///
/// A Nose-Hoover thermostat `xi` acts on translational and rotational
/// momenta, and an isotropic barostat `eta` (logarithmic strain rate)
/// scales the periodic box axes:
///
/// ```text
/// d(xi)/dt  = (T / T0 - 1) / tau^2
/// d(eta)/dt = D V (P - P0) / (N_f kT0 tauP^2)
/// dr/dt = v + eta r,   dv/dt = F / m - (xi + eta) v,   dL/dt = torque - xi L
/// ```
#[derive(Clone, Debug)]
pub struct Npt {
    group: Group,
    params: NptParams,
    xi: f64,
    eta: f64,
}
impl Npt {
    pub fn new(group: Group, params: NptParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            group,
            params,
            xi: 0.0,
            eta: 0.0,
        })
    }
    pub fn params(&self) -> &NptParams {
        &self.params
    }
    /// Thermostat variable
    pub fn xi(&self) -> f64 {
        self.xi
    }
    /// Barostat variable
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Change some of the parameters. The group binding and the thermostat
    /// and barostat state are kept.
    pub fn set_params(&mut self, update: NptUpdate) -> Result<()> {
        let params = NptParams {
            kt: update.kt.unwrap_or(self.params.kt),
            tau: update.tau.unwrap_or(self.params.tau),
            p: update.p.unwrap_or(self.params.p),
            tau_p: update.tau_p.unwrap_or(self.params.tau_p),
        };
        params.validate()?;
        debug!("NPT parameters changed from {:?} to {:?}", self.params, params);
        self.params = params;
        Ok(())
    }

    fn advance_variables(&mut self, system: &System, dt: f64) {
        let thermo = Thermo::compute(system, &self.group);
        let NptParams { kt, tau, p, tau_p } = self.params;
        self.xi += dt * (thermo.temperature / kt - 1.0) / (tau * tau);

        let d = system.dimensions as f64;
        let ndof = thermo.ndof().max(1) as f64;
        self.eta += dt * d * thermo.volume * (thermo.pressure - p) / (ndof * kt * tau_p * tau_p);
    }

    fn damp(&self, system: &mut System, dt: f64) {
        let v_scale = (-(self.xi + self.eta) * dt).exp();
        let l_scale = (-self.xi * dt).exp();
        for &i in self.group.members() {
            system.atoms.velocities[i] = system.atoms.velocities[i].map(|v| v * v_scale);
            system.atoms.angmom[i] *= l_scale;
        }
    }

    fn rescale_box(&self, system: &mut System, dt: f64) {
        let scale = (self.eta * dt).exp();
        let axes = Axis::in_plane(system.dimensions);
        let center = system.container.rect().center();
        system.container.scale(axes, scale);
        for p in system.atoms.positions.iter_mut() {
            for axis in axes {
                let k = axis.index();
                p[k] = center[k] + scale * (p[k] - center[k]);
            }
        }
    }
}

impl IntegrationMethod for Npt {
    fn group(&self) -> &Group {
        &self.group
    }
    fn first_step(&mut self, system: &mut System, dt: f64) {
        self.advance_variables(system, 0.5 * dt);
        self.damp(system, 0.5 * dt);
        for &i in self.group.members() {
            kick(system, i, 0.5 * dt);
        }
        self.rescale_box(system, dt);
        for &i in self.group.members() {
            drift(system, i, dt);
        }
    }
    fn second_step(&mut self, system: &mut System, dt: f64) {
        for &i in self.group.members() {
            kick(system, i, 0.5 * dt);
        }
        self.damp(system, 0.5 * dt);
        self.advance_variables(system, 0.5 * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{region::Rect, AtomTypes, Atoms, Container, RigidConstraint};
    use approx::assert_relative_eq;

    fn params() -> NptParams {
        NptParams {
            kt: 2.0,
            tau: 5.0,
            p: 13.5,
            tau_p: 5.0,
        }
    }

    fn gas() -> System {
        let mut types = AtomTypes::new();
        types.add("A").unwrap();
        let mut atoms = Atoms::new();
        atoms.add_atoms(0, 1.0, vec![[-2.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let container = Container::with_dimensions(Rect::centered([10.0, 10.0, 1.0]), 2);
        let mut system = System::new(atoms, types, container, RigidConstraint::new(), 2);
        system.net.forces = vec![[0.0; 3]; 2];
        system.net.torques = vec![Vector3::zeros(); 2];
        system
    }

    #[test]
    fn invalid_params_are_rejected() {
        let group = Group::new("g", vec![]);
        assert!(Npt::new(group.clone(), NptParams { tau: 0.0, ..params() }).is_err());
        let mut npt = Npt::new(group, params()).unwrap();
        assert!(npt
            .set_params(NptUpdate {
                tau_p: Some(-1.0),
                ..Default::default()
            })
            .is_err());
        assert_eq!(npt.params(), &params());
    }

    #[test]
    fn set_params_updates_only_given_fields() {
        let mut npt = Npt::new(Group::new("g", vec![0]), params()).unwrap();
        npt.set_params(NptUpdate {
            tau: Some(1.0),
            tau_p: Some(1.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            npt.params(),
            &NptParams {
                kt: 2.0,
                tau: 1.0,
                p: 13.5,
                tau_p: 1.0
            }
        );
        assert_eq!(npt.group().members(), &[0]);
    }

    #[test]
    fn low_pressure_compresses_box() {
        let mut system = gas();
        let mut npt = Npt::new(Group::all(&system.atoms), params()).unwrap();
        for _ in 0..10 {
            npt.first_step(&mut system, 0.001);
            npt.second_step(&mut system, 0.001);
        }
        assert!(npt.eta() < 0.0);
        assert!(system.volume() < 100.0);
        // the cold system is heated by the thermostat
        assert!(npt.xi() < 0.0);
        // positions are scaled with the box about its center
        let ratio = system.atoms.positions[1][0] / 2.0;
        assert_relative_eq!(ratio, system.container.rect().lx() / 10.0, epsilon = 1e-12);
        assert_eq!(system.container.rect().lz(), 1.0);
    }
}
