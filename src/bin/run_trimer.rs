use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use log::info;
use trimer::TrimerConfig;

#[derive(Debug, clap::Parser)]
#[command(
    name = "run_trimer",
    about = "Equilibrate a 2D lattice of rigid trimers at constant temperature and pressure"
)]
pub struct RunCli {
    /// YAML protocol configuration; the standard protocol is used when omitted
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Override the thermodynamic log filename
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print the configuration as YAML and exit
    #[arg(long = "print-config")]
    pub print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = RunCli::parse();

    let mut config = match &args.config {
        Some(path) => TrimerConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => TrimerConfig::default(),
    };
    if let Some(output) = args.output {
        config.log.filename = output;
    }

    if args.print_config {
        print!("{}", config.to_yaml().context("Failed to serialize configuration")?);
        return Ok(());
    }

    info!(
        "Running {} phases, {} steps in total",
        config.phases.len(),
        config.total_steps()
    );
    let sim = trimer::trimer::run(&config).context("Trimer simulation failed")?;
    info!(
        "Done at timestep {}, log written to {}",
        sim.timestep(),
        config.log.filename.display()
    );
    Ok(())
}
