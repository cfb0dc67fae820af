//! The trimer protocol: 2D lattice of rigid three-particle molecules,
//! equilibrated at constant temperature and pressure in two phases.

use log::info;

use crate::{
    config::{Phase, TrimerConfig},
    integrators::{IntegratorMode, Npt, NptParams},
    lattice::Square,
    Context, Error, Result, Simulation, SystemBuilder,
};

/// Configure the system and integrator for the first phase, without running
pub fn build(config: &TrimerConfig) -> Result<Simulation> {
    let Some(first) = config.phases.first() else {
        return Err(Error::InvalidParam("protocol has no phases".to_string()));
    };

    if !(config.lattice.spacing > 0.0 && config.lattice.spacing.is_finite()) {
        return Err(Error::InvalidParam(format!(
            "lattice spacing should be positive, found {}",
            config.lattice.spacing
        )));
    }

    let ctx = Context::initialize(&config.context)?.enforce_2d();
    let lattice = Square::new(config.lattice.spacing);
    let anchor = config.body.anchor.as_str();

    let mut builder = SystemBuilder::create_lattice(ctx, &lattice, &config.lattice.cells, anchor)?;
    builder.set_moment_inertia(anchor, config.moment_inertia)?;
    let builder = builder.register_types(&[config.body.satellite.as_str()])?;
    let mut builder = builder.define_potentials(&config.potential)?;
    builder.set_body_template(anchor, config.body.template())?;
    let mut builder = builder.create_bodies()?;

    let center = builder.group_rigid_center();
    builder.log(config.log.to_log_config()?)?;

    let mode = IntegratorMode::standard(first.dt)?;
    let npt = Npt::new(
        center,
        NptParams {
            kt: config.ensemble.kt,
            tau: first.tau,
            p: config.ensemble.pressure,
            tau_p: first.tau_p,
        },
    )?;
    let mut sim = builder.integrate(mode, npt.into())?;
    if let Some(kt) = config.initial_kt {
        sim.thermalize(kt, config.seed)?;
    }
    Ok(sim)
}

/// Run every phase of the protocol in order
pub fn run(config: &TrimerConfig) -> Result<Simulation> {
    let mut sim = build(config)?;
    for (i, phase) in config.phases.iter().enumerate() {
        if i > 0 {
            apply_phase(&mut sim, phase)?;
        }
        info!(
            "Phase {} of {}: {} steps at dt = {}",
            i + 1,
            config.phases.len(),
            phase.steps,
            phase.dt
        );
        sim.run(phase.steps)?;
    }
    Ok(sim)
}

/// Switch time step and coupling constants for a new phase
pub fn apply_phase(sim: &mut Simulation, phase: &Phase) -> Result<()> {
    sim.set_dt(phase.dt)?;
    sim.npt_mut()?.set_params(phase.npt_update())
}
