use std::{f64::consts::PI, fs, path::PathBuf};

use approx::assert_relative_eq;
use trimer::{config::Phase, prelude::*};

fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("trimer-it-{}-{}.dat", std::process::id(), name))
}

fn read_rows(path: &PathBuf) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn standard_lattice_has_7500_particles() {
    let mut config = TrimerConfig::default();
    config.log.filename = temp_log("standard");
    let sim = trimer::trimer::build(&config).unwrap();

    let system = sim.system();
    assert_eq!(system.num_atoms(), 7500);
    let a = system.types.index_of("A").unwrap();
    let b = system.types.index_of("B").unwrap();
    assert_eq!(system.atoms.count_type(a), 2500);
    assert_eq!(system.atoms.count_type(b), 5000);
    assert_eq!(system.rigid.num_bodies(), 2500);
    assert_eq!(sim.integrator().group().len(), 2500);
    assert_relative_eq!(system.volume(), 200.0 * 200.0);
    fs::remove_file(&config.log.filename).ok();
}

#[test]
fn only_anchors_carry_moment_of_inertia() {
    let mut config = TrimerConfig::default();
    config.lattice.cells = [6, 6];
    config.log.filename = temp_log("moments");
    let sim = trimer::trimer::build(&config).unwrap();

    let atoms = &sim.system().atoms;
    let a = sim.system().types.index_of("A").unwrap();
    for i in 0..atoms.num_atoms() {
        let expected = if atoms.types[i] == a {
            [0.0, 0.0, 1.65]
        } else {
            [0.0; 3]
        };
        assert_eq!(atoms.moment_inertia[i], expected);
    }
    fs::remove_file(&config.log.filename).ok();
}

#[test]
fn pair_table_covers_three_pairs() {
    let mut config = TrimerConfig::default();
    config.lattice.cells = [6, 6];
    config.log.filename = temp_log("pairs");
    let sim = trimer::trimer::build(&config).unwrap();

    let lj = sim.potential();
    assert_eq!(lj.defined_pairs(), vec![(0, 0), (0, 1), (1, 1)]);
    assert!(lj.missing_pairs().is_empty());
    let aa = lj.coeff(0, 0).unwrap().sigma();
    let bb = lj.coeff(1, 1).unwrap().sigma();
    let ab = lj.coeff(0, 1).unwrap().sigma();
    assert_relative_eq!(aa, 2.0);
    assert_relative_eq!(bb, 1.275112, epsilon = 1e-12);
    assert_relative_eq!(ab, 1.637556);
    assert_relative_eq!(ab, aa / 2.0 + bb / 2.0, epsilon = 1e-12);
    assert_eq!(lj.coeff(1, 0).unwrap().sigma(), ab);
    assert_eq!(lj.cutoff_distance(), 2.5);
    fs::remove_file(&config.log.filename).ok();
}

#[test]
fn template_places_satellites_at_sixty_degrees() {
    let template = TrimerConfig::default().body.template();
    assert_eq!(template.types, vec!["B".to_string(), "B".to_string()]);
    assert_eq!(template.len(), 2);
    let (s, c) = (PI / 3.0).sin_cos();
    assert_relative_eq!(template.positions[0][0], s, epsilon = 1e-12);
    assert_relative_eq!(template.positions[0][1], c, epsilon = 1e-12);
    assert_relative_eq!(template.positions[1][0], -s, epsilon = 1e-12);
    assert_relative_eq!(template.positions[1][1], c, epsilon = 1e-12);
    assert_eq!(template.positions[0][2], 0.0);
}

#[test]
fn constituents_follow_their_anchor() {
    let mut config = TrimerConfig::default();
    config.lattice.cells = [6, 6];
    config.log.filename = temp_log("constituents");
    let sim = trimer::trimer::build(&config).unwrap();

    let system = sim.system();
    let body = &system.rigid.bodies()[0];
    let center = system.atoms.positions[body.center];
    for &j in &body.constituents {
        let r = system
            .container
            .separation(&system.atoms.positions[j], &center);
        assert_relative_eq!((r[0] * r[0] + r[1] * r[1]).sqrt(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(r[1], 0.5, epsilon = 1e-12);
        assert_eq!(system.atoms.positions[j][2], 0.0);
    }
    fs::remove_file(&config.log.filename).ok();
}

#[test]
fn default_phase_schedule() {
    let config = TrimerConfig::default();
    let phases: Vec<(u64, f64, f64, f64)> = config
        .phases
        .iter()
        .map(|p| (p.steps, p.dt, p.tau, p.tau_p))
        .collect();
    assert_eq!(
        phases,
        vec![(10_000, 0.001, 5.0, 5.0), (100_000, 0.005, 1.0, 1.0)]
    );
    assert_eq!(config.ensemble.kt, 2.0);
    assert_eq!(config.ensemble.pressure, 13.5);
    assert_eq!(config.log.period, 1000);
}

#[test]
fn short_protocol_logs_every_period() {
    let mut config = TrimerConfig::default();
    config.lattice.cells = [6, 6];
    config.log.filename = temp_log("short");
    config.log.period = 50;
    config.phases = vec![
        Phase {
            steps: 100,
            dt: 0.001,
            tau: 5.0,
            tau_p: 5.0,
        },
        Phase {
            steps: 100,
            dt: 0.002,
            tau: 5.0,
            tau_p: 5.0,
        },
    ];
    let mut sim = trimer::trimer::run(&config).unwrap();
    assert_eq!(sim.timestep(), 200);
    assert_eq!(sim.dt(), 0.002);
    assert_eq!(sim.logger().unwrap().rows_written(), 5);
    // the box is compressed towards the target pressure
    assert!(sim.system().volume() < 24.0 * 24.0);
    assert!(sim.npt_mut().unwrap().eta() < 0.0);

    let rows = read_rows(&config.log.filename);
    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows[0],
        vec![
            "timestep",
            "temperature",
            "pressure",
            "volume",
            "translational_kinetic_energy",
            "rotational_kinetic_energy",
            "rotational_ndof",
            "translational_ndof",
            "N",
        ]
    );
    let timesteps: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(timesteps, vec!["0", "50", "100", "150", "200"]);
    for row in &rows[1..] {
        assert_eq!(row.len(), 9);
        assert_eq!(row[6], "36");
        assert_eq!(row[7], "70");
        assert_eq!(row[8], "108");
        for value in row {
            assert!(value.parse::<f64>().unwrap().is_finite());
        }
    }
    fs::remove_file(&config.log.filename).ok();
}

#[test]
fn thermalized_start_stays_planar() {
    let mut config = TrimerConfig::default();
    config.lattice.cells = [6, 6];
    config.log.filename = temp_log("thermalized");
    config.initial_kt = Some(2.0);
    config.seed = 3;
    let mut sim = trimer::trimer::build(&config).unwrap();
    assert!(sim.thermo().temperature > 0.0);
    sim.run(50).unwrap();

    let atoms = &sim.system().atoms;
    for &i in sim.integrator().group().members() {
        assert_eq!(atoms.positions[i][2], 0.0);
        assert_eq!(atoms.velocities[i][2], 0.0);
    }
    fs::remove_file(&config.log.filename).ok();
}

#[test]
fn gpu_request_fails() {
    let mut config = TrimerConfig::default();
    config.context.device = Device::Gpu;
    config.log.filename = temp_log("gpu");
    assert!(matches!(
        trimer::trimer::build(&config),
        Err(Error::DeviceUnavailable(_))
    ));
}

#[test]
fn manual_setup_through_builder() {
    let ctx = Context::initialize(&ExecutionConfig::default()).unwrap().enforce_2d();
    let mut builder = SystemBuilder::create_lattice(ctx, &Square::new(4.0), &[6, 6], "A").unwrap();
    assert_eq!(builder.num_particles(), 36);
    assert_eq!(builder.set_moment_inertia("A", [0.0, 0.0, 1.65]).unwrap(), 36);
    let builder = builder.register_types(&["B"]).unwrap();
    let mut builder = builder.define_potentials(&PotentialConfig::trimer()).unwrap();
    builder
        .set_body_template("A", BodyTemplate::trimer("B", 1.0, PI / 3.0))
        .unwrap();
    let builder = builder.create_bodies().unwrap();
    assert_eq!(builder.num_particles(), 108);
    assert_eq!(builder.group_all().len(), 108);

    let nve = Nve::new(builder.group_rigid_center());
    let mut sim = builder
        .integrate(IntegratorMode::standard(0.001).unwrap(), nve.into())
        .unwrap();
    assert!(sim.logger().is_none());
    assert!(matches!(sim.npt_mut(), Err(Error::NoSuchIntegrator(_))));
    sim.run(10).unwrap();
    assert_eq!(sim.timestep(), 10);
}

#[test]
fn oversized_timestep_diverges() {
    let mut config = TrimerConfig::default();
    config.lattice.cells = [6, 6];
    config.log.filename = temp_log("diverge");
    config.initial_kt = Some(2.0);
    config.phases = vec![Phase {
        steps: 1000,
        dt: 0.05,
        tau: 5.0,
        tau_p: 5.0,
    }];
    match trimer::trimer::run(&config) {
        Err(Error::Diverged { timestep }) => assert!(timestep > 0 && timestep <= 1000),
        Err(e) => panic!("expected divergence, got {e}"),
        Ok(_) => panic!("expected divergence"),
    }
    fs::remove_file(&config.log.filename).ok();
}
