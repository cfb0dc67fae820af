use std::time::Instant;

use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::{
    compute::Thermo,
    integrators::{IntegrationMethod, Integrator, IntegratorMode, Npt},
    output::Logger,
    Error, LJCut, NeighborList, Result, System,
};

/// A fully configured simulation, ready to run
pub struct Simulation {
    system: System,
    potential: LJCut,
    neighbor_list: NeighborList,
    mode: IntegratorMode,
    integrator: Integrator,
    logger: Option<Logger>,
    timestep: u64,
    forces_current: bool,
}
impl Simulation {
    pub(crate) fn new(
        system: System,
        potential: LJCut,
        neighbor_list: NeighborList,
        mode: IntegratorMode,
        integrator: Integrator,
        logger: Option<Logger>,
    ) -> Result<Self> {
        system.check_group(integrator.group())?;
        Ok(Self {
            system,
            potential,
            neighbor_list,
            mode,
            integrator,
            logger,
            timestep: 0,
            forces_current: false,
        })
    }

    // Getters
    pub fn system(&self) -> &System {
        &self.system
    }
    pub fn potential(&self) -> &LJCut {
        &self.potential
    }
    pub fn neighbor_list(&self) -> &NeighborList {
        &self.neighbor_list
    }
    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }
    pub fn timestep(&self) -> u64 {
        self.timestep
    }
    pub fn dt(&self) -> f64 {
        self.mode.dt()
    }
    /// Thermodynamic state of the integrated group
    pub fn thermo(&self) -> Thermo {
        Thermo::compute(&self.system, self.integrator.group())
    }

    // Setters
    /// Change the time step used by subsequent runs
    pub fn set_dt(&mut self, dt: f64) -> Result<()> {
        self.mode.set_dt(dt)?;
        debug!("Time step set to {}", dt);
        Ok(())
    }
    pub fn npt_mut(&mut self) -> Result<&mut Npt> {
        self.integrator.as_npt_mut()
    }
    /// Draw random velocities and angular momenta for the integrated group at
    /// temperature `kt`
    pub fn thermalize(&mut self, kt: f64, seed: u64) -> Result<()> {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let members = self.integrator.group().members().to_vec();
        let dimensions = self.system.dimensions;
        self.system
            .atoms
            .set_temperature(&members, kt, dimensions, &mut rng)?;
        self.system.update_positions();
        info!("Thermalized {} particles at kT = {}", members.len(), kt);
        Ok(())
    }

    /// Advance the simulation by `num_steps` timesteps
    pub fn run(&mut self, num_steps: u64) -> Result<()> {
        self.pre_check()?;
        let start = Instant::now();
        let dt = self.mode.dt();
        info!(
            "Starting run of {} steps at timestep {} with dt = {}",
            num_steps, self.timestep, dt
        );

        if !self.forces_current {
            self.neighbor_list
                .update(&self.system.atoms, &self.system.container, self.timestep)?;
            self.system.compute_forces(&self.potential, &self.neighbor_list);
            self.forces_current = true;
        }
        self.check_do_output();

        for _ in 0..num_steps {
            self.integrator.first_step(&mut self.system, dt);
            self.system.enforce_2d(self.integrator.group());
            self.system.update_positions();
            self.timestep += 1;

            self.neighbor_list
                .update(&self.system.atoms, &self.system.container, self.timestep)?;
            self.system.compute_forces(&self.potential, &self.neighbor_list);

            self.integrator.second_step(&mut self.system, dt);
            self.system.enforce_2d(self.integrator.group());

            if !self.system.is_finite(self.integrator.group()) {
                return Err(Error::Diverged {
                    timestep: self.timestep,
                });
            }
            self.check_do_output();
        }

        let elapsed = start.elapsed().as_secs_f64();
        info!(
            "Finished run at timestep {} ({:.1} steps/s, {} neighbor list builds)",
            self.timestep,
            num_steps as f64 / elapsed.max(f64::EPSILON),
            self.neighbor_list.num_builds()
        );
        Ok(())
    }

    fn pre_check(&self) -> Result<()> {
        if !self.potential.all_set() {
            let names = |(i, j): (usize, usize)| {
                (
                    self.system.types.name(i).to_string(),
                    self.system.types.name(j).to_string(),
                )
            };
            return Err(Error::MissingPairCoefficients(
                self.potential.missing_pairs().into_iter().map(names).collect(),
            ));
        }
        Ok(())
    }

    fn check_do_output(&mut self) {
        let Some(logger) = self.logger.as_mut() else {
            return;
        };
        if logger.should_log(self.timestep) {
            let thermo = Thermo::compute(&self.system, self.integrator.group());
            logger.log(self.timestep, &thermo);
        }
    }
}
