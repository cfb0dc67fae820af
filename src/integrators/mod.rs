mod npt;
mod verlet;

pub use npt::{Npt, NptParams, NptUpdate};
pub use verlet::Nve;

use enum_dispatch::enum_dispatch;
use nalgebra::Vector3;

use crate::{rigid, Error, Group, Result, System};

/// Global integration settings shared by all integration methods
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorMode {
    dt: f64,
}
impl IntegratorMode {
    /// Standard two-step integration with time step `dt`
    pub fn standard(dt: f64) -> Result<Self> {
        check_timestep(dt)?;
        Ok(Self { dt })
    }
    pub fn dt(&self) -> f64 {
        self.dt
    }
    pub fn set_dt(&mut self, dt: f64) -> Result<()> {
        check_timestep(dt)?;
        self.dt = dt;
        Ok(())
    }
}

fn check_timestep(dt: f64) -> Result<()> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParam(format!(
            "timestep should be positive, found {dt}"
        )))
    }
}

/// Two-step integration method acting on a group of particles.
///
/// `first_step` runs before the force evaluation of a timestep and
/// `second_step` after it.
#[enum_dispatch]
pub trait IntegrationMethod {
    fn group(&self) -> &Group;
    fn first_step(&mut self, system: &mut System, dt: f64);
    fn second_step(&mut self, system: &mut System, dt: f64);
}

#[enum_dispatch(IntegrationMethod)]
#[derive(Clone, Debug)]
pub enum Integrator {
    Nve,
    Npt,
}
impl Integrator {
    pub fn as_npt_mut(&mut self) -> Result<&mut Npt> {
        match self {
            Integrator::Npt(npt) => Ok(npt),
            _ => Err(Error::NoSuchIntegrator("npt")),
        }
    }
}

/// Advance velocity and body frame angular momentum of particle `i` by the
/// net force and torque over `dt`
fn kick(system: &mut System, i: usize, dt: f64) {
    let mass = system.atoms.mass(i);
    let force = system.net.forces[i];
    system
        .atoms
        .increment_velocity(i, force.map(|f| f * dt / mass));

    let torque = system.net.torques[i];
    let body_torque = system.atoms.orientations[i].inverse_transform_vector(&torque);
    let moment = system.atoms.moment_inertia[i];
    let mask = Vector3::from_fn(|k, _| if moment[k] > 0.0 { 1.0 } else { 0.0 });
    system.atoms.angmom[i] += body_torque.component_mul(&mask) * dt;
}

/// Advance position and orientation of particle `i` over `dt`
fn drift(system: &mut System, i: usize, dt: f64) {
    let vel = system.atoms.velocities[i];
    system
        .atoms
        .increment_position(i, [dt * vel[0], dt * vel[1], dt * vel[2]]);

    let omega = rigid::angular_velocity(&system.atoms.angmom[i], &system.atoms.moment_inertia[i]);
    if omega != Vector3::zeros() {
        system.atoms.orientations[i] = rigid::rotate(&system.atoms.orientations[i], &omega, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_rejects_bad_timestep() {
        assert!(IntegratorMode::standard(0.0).is_err());
        assert!(IntegratorMode::standard(f64::NAN).is_err());
        let mut mode = IntegratorMode::standard(0.001).unwrap();
        mode.set_dt(0.005).unwrap();
        assert_eq!(mode.dt(), 0.005);
        assert!(mode.set_dt(-1.0).is_err());
        assert_eq!(mode.dt(), 0.005);
    }
}
