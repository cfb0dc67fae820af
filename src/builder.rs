//! Phase-tagged construction of a simulation.
//!
//! Each phase only exposes the calls that are legal at that point, so types
//! must be registered before pair coefficients reference them, and rigid
//! bodies can only be created once, after their templates are defined.
//!
//! ```no_run
//! use trimer::prelude::*;
//!
//! # fn main() -> trimer::Result<()> {
//! let ctx = Context::initialize(&ExecutionConfig::default())?.enforce_2d();
//! let mut builder = SystemBuilder::create_lattice(ctx, &Square::new(4.0), &[10, 10], "A")?;
//! builder.set_moment_inertia("A", [0.0, 0.0, 1.65])?;
//! let builder = builder.register_types(&["B"])?;
//! let mut builder = builder.define_potentials(&PotentialConfig::trimer())?;
//! builder.set_body_template("A", BodyTemplate::trimer("B", 1.0, std::f64::consts::PI / 3.0))?;
//! let builder = builder.create_bodies()?;
//! let npt = Npt::new(builder.group_rigid_center(), NptParams { kt: 2.0, tau: 5.0, p: 13.5, tau_p: 5.0 })?;
//! let mut sim = builder.integrate(IntegratorMode::standard(0.001)?, npt.into())?;
//! sim.run(100)?;
//! # Ok(())
//! # }
//! ```

use std::{collections::BTreeMap, marker::PhantomData};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    integrators::{Integrator, IntegratorMode},
    lattice::Lattice,
    output::{LogConfig, Logger},
    AtomTypes, Atoms, BodyTemplate, Container, Context, Error, Group, LJCut, NeighborList, Result,
    RigidConstraint, Simulation, System,
};

/// Phase tags
pub mod phase {
    /// Lattice particles exist, only the lattice type is registered
    pub struct LatticeDefined;
    /// All particle types are registered
    pub struct SpeciesRegistered;
    /// Pair coefficients cover every type pair
    pub struct PotentialsDefined;
    /// Rigid bodies have been created
    pub struct BodiesInstantiated;

    /// Phases in which per-particle properties may still be assigned
    pub trait BeforeBodies {}
    impl BeforeBodies for LatticeDefined {}
    impl BeforeBodies for SpeciesRegistered {}
    impl BeforeBodies for PotentialsDefined {}
}
use phase::*;

/// Coefficients of one unordered type pair
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairCoeff {
    pub a: String,
    pub b: String,
    pub epsilon: f64,
    pub sigma: f64,
}
impl PairCoeff {
    pub fn new(a: &str, b: &str, epsilon: f64, sigma: f64) -> Self {
        Self {
            a: a.to_string(),
            b: b.to_string(),
            epsilon,
            sigma,
        }
    }
}

/// Lennard-Jones pair table with a shared cutoff, evaluated through a cell
/// neighbor list with the given skin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialConfig {
    pub r_cut: f64,
    pub skin: f64,
    pub shift: bool,
    pub pairs: Vec<PairCoeff>,
}
impl PotentialConfig {
    /// Trimer interactions: sigma_AB = sigma_AA / 2 + sigma_BB / 2
    pub fn trimer() -> Self {
        Self {
            r_cut: 2.5,
            skin: 0.4,
            shift: false,
            pairs: vec![
                PairCoeff::new("A", "A", 1.0, 2.0),
                PairCoeff::new("B", "B", 1.0, 0.637556 * 2.0),
                PairCoeff::new("A", "B", 1.0, 1.637556),
            ],
        }
    }
}
impl Default for PotentialConfig {
    fn default() -> Self {
        Self::trimer()
    }
}

/// Simulation under construction, tagged with its setup phase
pub struct SystemBuilder<P> {
    ctx: Context,
    atoms: Atoms,
    types: AtomTypes,
    container: Container,
    moments: BTreeMap<usize, [f64; 3]>,
    potential: Option<(LJCut, NeighborList)>,
    rigid: RigidConstraint,
    logger: Option<Logger>,
    _phase: PhantomData<P>,
}

impl<P> SystemBuilder<P> {
    fn into_phase<Q>(self) -> SystemBuilder<Q> {
        SystemBuilder {
            ctx: self.ctx,
            atoms: self.atoms,
            types: self.types,
            container: self.container,
            moments: self.moments,
            potential: self.potential,
            rigid: self.rigid,
            logger: self.logger,
            _phase: PhantomData,
        }
    }
    pub fn context(&self) -> &Context {
        &self.ctx
    }
    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }
    pub fn types(&self) -> &AtomTypes {
        &self.types
    }
    pub fn container(&self) -> &Container {
        &self.container
    }
    pub fn num_particles(&self) -> usize {
        self.atoms.num_atoms()
    }
}

impl<P: BeforeBodies> SystemBuilder<P> {
    /// Set the moment of inertia of every particle of the named type.
    /// Returns the number of particles updated; repeating the call is a no-op.
    pub fn set_moment_inertia(&mut self, type_name: &str, moment: [f64; 3]) -> Result<usize> {
        let t = self.types.index_of(type_name)?;
        if moment.iter().any(|m| !(*m >= 0.0) || !m.is_finite()) {
            return Err(Error::InvalidParam(format!(
                "moment of inertia should be non-negative, found {:?}",
                moment
            )));
        }
        self.moments.insert(t, moment);
        Ok(self.atoms.set_moment_inertia_by_type(t, moment))
    }
}

impl SystemBuilder<LatticeDefined> {
    /// Place one particle of `type_name` on every site of `n` replicated
    /// lattice cells
    pub fn create_lattice<L: Lattice>(ctx: Context, lattice: &L, n: &[usize], type_name: &str) -> Result<Self> {
        if lattice.dimensions() != ctx.dimensions() {
            return Err(Error::InvalidParam(format!(
                "{}D lattice in a {}D context",
                lattice.dimensions(),
                ctx.dimensions()
            )));
        }
        if n.len() != lattice.dimensions() || n.iter().any(|&c| c == 0) {
            return Err(Error::InvalidParam(format!(
                "lattice replication {:?} should have {} positive counts",
                n,
                lattice.dimensions()
            )));
        }
        let mut types = AtomTypes::new();
        let t = types.add(type_name)?;
        let container = Container::with_dimensions(lattice.bounding_rect(n), ctx.dimensions());
        let mut atoms = Atoms::new();
        atoms.add_atoms(t, types.get(t).mass(), lattice.coords(n));
        info!(
            "Created lattice of {} particles in a {:?} box",
            atoms.num_atoms(),
            container.rect().lengths()
        );
        Ok(Self {
            ctx,
            atoms,
            types,
            container,
            moments: BTreeMap::new(),
            potential: None,
            rigid: RigidConstraint::new(),
            logger: None,
            _phase: PhantomData,
        })
    }

    /// Add the remaining particle types
    pub fn register_types(mut self, names: &[&str]) -> Result<SystemBuilder<SpeciesRegistered>> {
        for name in names {
            self.types.add(name)?;
        }
        Ok(self.into_phase())
    }
}

impl SystemBuilder<SpeciesRegistered> {
    /// Set pair coefficients for every unordered pair of registered types
    pub fn define_potentials(mut self, config: &PotentialConfig) -> Result<SystemBuilder<PotentialsDefined>> {
        let mut lj = LJCut::new(self.types.len(), config.r_cut)?;
        lj.set_shift(config.shift);
        for pair in &config.pairs {
            let a = self.types.index_of(&pair.a)?;
            let b = self.types.index_of(&pair.b)?;
            lj.set_coeff(a, b, pair.epsilon, pair.sigma)?;
        }
        let missing = lj.missing_pairs();
        if !missing.is_empty() {
            return Err(Error::MissingPairCoefficients(
                missing
                    .into_iter()
                    .map(|(i, j)| (self.types.name(i).to_string(), self.types.name(j).to_string()))
                    .collect(),
            ));
        }
        let nlist = NeighborList::new(config.r_cut, config.skin)?;
        nlist.check_box(&self.container)?;
        self.potential = Some((lj, nlist));
        Ok(self.into_phase())
    }
}

impl SystemBuilder<PotentialsDefined> {
    /// Attach constituents to every particle of `anchor` when bodies are created
    pub fn set_body_template(&mut self, anchor: &str, template: BodyTemplate) -> Result<()> {
        let t = self.types.index_of(anchor)?;
        self.rigid.set_param(t, &template, &self.types)
    }

    /// Create the constituent particles of every rigid body
    pub fn create_bodies(mut self) -> Result<SystemBuilder<BodiesInstantiated>> {
        let anchors = self.rigid.anchor_types();
        if anchors.is_empty() {
            return Err(Error::InvalidParam(
                "no rigid body template defined".to_string(),
            ));
        }
        for t in anchors {
            if !self.moments.contains_key(&t) {
                return Err(Error::MissingMomentOfInertia(self.types.name(t).to_string()));
            }
        }
        self.rigid
            .create_bodies(&mut self.atoms, &self.container, &self.types)?;
        Ok(self.into_phase())
    }
}

impl SystemBuilder<BodiesInstantiated> {
    pub fn rigid(&self) -> &RigidConstraint {
        &self.rigid
    }
    pub fn group_all(&self) -> Group {
        Group::all(&self.atoms)
    }
    pub fn group_rigid_center(&self) -> Group {
        Group::rigid_center(&self.rigid)
    }
    pub fn group_of_type(&self, type_name: &str) -> Result<Group> {
        Ok(Group::of_type(&self.atoms, self.types.index_of(type_name)?))
    }

    /// Open the log file. Rows are written once the simulation runs.
    pub fn log(&mut self, config: LogConfig) -> Result<()> {
        self.logger = Some(Logger::create(config)?);
        Ok(())
    }

    /// Finish configuration with a global integration mode and a method
    pub fn integrate(self, mode: IntegratorMode, integrator: Integrator) -> Result<Simulation> {
        let Some((potential, nlist)) = self.potential else {
            return Err(Error::InvalidParam("pair potential not defined".to_string()));
        };
        let system = System::new(
            self.atoms,
            self.types,
            self.container,
            self.rigid,
            self.ctx.dimensions(),
        );
        Simulation::new(system, potential, nlist, mode, integrator, self.logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lattice::Square, ExecutionConfig};
    use std::f64::consts::PI;

    fn lattice_builder(n: usize) -> SystemBuilder<LatticeDefined> {
        let ctx = Context::initialize(&ExecutionConfig::default())
            .unwrap()
            .enforce_2d();
        SystemBuilder::create_lattice(ctx, &Square::new(4.0), &[n, n], "A").unwrap()
    }

    #[test]
    fn lattice_dimensions_must_match_context() {
        let ctx = Context::initialize(&ExecutionConfig::default()).unwrap();
        assert!(SystemBuilder::create_lattice(ctx.clone(), &Square::new(4.0), &[4, 4], "A").is_err());
        let ctx = ctx.enforce_2d();
        assert!(SystemBuilder::create_lattice(ctx.clone(), &Square::new(4.0), &[4], "A").is_err());
        assert!(SystemBuilder::create_lattice(ctx, &Square::new(4.0), &[4, 0], "A").is_err());
    }

    #[test]
    fn unknown_species_in_pair_table_fails() {
        let builder = lattice_builder(4);
        let builder = builder.register_types(&["B"]).unwrap();
        let mut config = PotentialConfig::trimer();
        config.pairs.push(PairCoeff::new("A", "C", 1.0, 1.0));
        assert!(matches!(
            builder.define_potentials(&config),
            Err(Error::UnknownType(n)) if n == "C"
        ));
    }

    #[test]
    fn pair_coverage_must_be_exhaustive() {
        let builder = lattice_builder(4).register_types(&["B"]).unwrap();
        let mut config = PotentialConfig::trimer();
        config.pairs.retain(|p| !(p.a == "A" && p.b == "B"));
        match builder.define_potentials(&config) {
            Err(Error::MissingPairCoefficients(pairs)) => {
                assert_eq!(pairs, vec![("A".to_string(), "B".to_string())])
            }
            _ => panic!("expected missing pair coefficients"),
        }
    }

    #[test]
    fn bodies_need_moment_of_inertia() {
        let builder = lattice_builder(4).register_types(&["B"]).unwrap();
        let mut builder = builder.define_potentials(&PotentialConfig::trimer()).unwrap();
        builder
            .set_body_template("A", BodyTemplate::trimer("B", 1.0, PI / 3.0))
            .unwrap();
        assert!(matches!(
            builder.create_bodies(),
            Err(Error::MissingMomentOfInertia(n)) if n == "A"
        ));
    }

    #[test]
    fn bodies_need_template() {
        let mut builder = lattice_builder(4);
        builder.set_moment_inertia("A", [0.0, 0.0, 1.65]).unwrap();
        let builder = builder.register_types(&["B"]).unwrap();
        let builder = builder.define_potentials(&PotentialConfig::trimer()).unwrap();
        assert!(matches!(builder.create_bodies(), Err(Error::InvalidParam(_))));
    }

    #[test]
    fn moment_of_inertia_requires_known_type() {
        let mut builder = lattice_builder(4);
        assert!(matches!(
            builder.set_moment_inertia("B", [0.0, 0.0, 1.0]),
            Err(Error::UnknownType(_))
        ));
        assert!(builder.set_moment_inertia("A", [0.0, 0.0, -1.0]).is_err());
        assert_eq!(builder.set_moment_inertia("A", [0.0, 0.0, 1.65]).unwrap(), 16);
    }

    #[test]
    fn small_box_fails_at_potential_definition() {
        let builder = lattice_builder(1).register_types(&["B"]).unwrap();
        assert!(matches!(
            builder.define_potentials(&PotentialConfig::trimer()),
            Err(Error::BoxTooSmall { .. })
        ));
    }
}
