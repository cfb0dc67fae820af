use std::{
    fmt::Display,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{compute::Thermo, Error, Quantity, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Usize(usize),
    Float(f64),
}
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{:.8e}", v),
            Value::Usize(v) => v.fmt(f),
        }
    }
}

/// Where, what and how often to log
#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    pub filename: PathBuf,
    pub quantities: Vec<Quantity>,
    pub period: u64,
}
impl LogConfig {
    pub fn new<P: AsRef<Path>>(filename: P, quantities: &[&str], period: u64) -> Result<Self> {
        let quantities = quantities
            .iter()
            .map(|q| q.parse())
            .collect::<Result<Vec<Quantity>>>()?;
        Self::from_quantities(filename, quantities, period)
    }
    pub fn from_quantities<P: AsRef<Path>>(filename: P, quantities: Vec<Quantity>, period: u64) -> Result<Self> {
        if period == 0 {
            return Err(Error::InvalidParam("log period should be positive".to_string()));
        }
        Ok(Self {
            filename: filename.as_ref().to_path_buf(),
            quantities,
            period,
        })
    }
    /// Column names, starting with the timestep
    pub fn header(&self) -> Vec<&'static str> {
        std::iter::once("timestep")
            .chain(self.quantities.iter().map(|q| q.name()))
            .collect()
    }
}

/// Tab separated thermodynamic log, one row every `period` timesteps.
///
/// Write failures are reported as warnings and never stop a run.
pub struct Logger {
    config: LogConfig,
    writer: csv::Writer<Box<dyn Write>>,
    last_logged: Option<u64>,
    rows_written: usize,
}
impl Logger {
    /// Create (truncating) the log file and write the header row
    pub fn create(config: LogConfig) -> Result<Self> {
        let file = File::create(&config.filename)?;
        Self::from_writer(config, Box::new(file))
    }

    /// Log to any sink; `config.filename` is only used in messages
    pub fn from_writer(config: LogConfig, sink: Box<dyn Write>) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(sink);
        writer.write_record(config.header())?;
        writer.flush()?;
        info!(
            "Logging {} quantities to {} every {} steps",
            config.quantities.len(),
            config.filename.display(),
            config.period
        );
        Ok(Self {
            config,
            writer,
            last_logged: None,
            rows_written: 0,
        })
    }
    pub fn config(&self) -> &LogConfig {
        &self.config
    }
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
    pub fn should_log(&self, timestep: u64) -> bool {
        timestep % self.config.period == 0 && self.last_logged != Some(timestep)
    }

    pub fn log(&mut self, timestep: u64, thermo: &Thermo) {
        let row: Vec<String> = std::iter::once(timestep.to_string())
            .chain(self.config.quantities.iter().map(|&q| thermo.get(q).to_string()))
            .collect();
        self.last_logged = Some(timestep);
        let result = self
            .writer
            .write_record(&row)
            .map_err(Error::from)
            .and_then(|_| self.writer.flush().map_err(Error::from));
        match result {
            Ok(()) => self.rows_written += 1,
            Err(e) => warn!(
                "Failed to write log row for timestep {} to {}: {}",
                timestep,
                self.config.filename.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    fn thermo() -> Thermo {
        Thermo {
            translational_kinetic_energy: 1.5,
            rotational_kinetic_energy: 0.5,
            translational_ndof: 2,
            rotational_ndof: 2,
            temperature: 1.0,
            pressure: 0.25,
            volume: 100.0,
            potential_energy: -3.0,
            num_particles: 6,
        }
    }

    /// Sink that starts failing once `broken` is set
    struct FlakySink {
        broken: Rc<Cell<bool>>,
        bytes: Rc<Cell<usize>>,
    }
    impl Write for FlakySink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.broken.get() {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            self.bytes.set(self.bytes.get() + buf.len());
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            if self.broken.get() {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            Ok(())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trimer-{}-{}", std::process::id(), name))
    }

    #[test]
    fn floats_use_exponent_notation() {
        assert_eq!(Value::Float(4.557289898736107e-27).to_string(), "4.55728990e-27");
        assert_eq!(Value::Float(40000.0).to_string(), "4.00000000e4");
        assert_eq!(Value::Usize(2500).to_string(), "2500");
    }

    #[test]
    fn failed_writes_only_warn() {
        let broken = Rc::new(Cell::new(false));
        let bytes = Rc::new(Cell::new(0));
        let sink = FlakySink {
            broken: broken.clone(),
            bytes: bytes.clone(),
        };
        let config = LogConfig::new("flaky.dat", &["temperature", "N"], 10).unwrap();
        let mut logger = Logger::from_writer(config, Box::new(sink)).unwrap();
        logger.log(0, &thermo());
        assert_eq!(logger.rows_written(), 1);
        let written = bytes.get();

        broken.set(true);
        for t in [10, 20, 30] {
            assert!(logger.should_log(t));
            logger.log(t, &thermo());
        }
        // the rows are dropped but logging keeps advancing
        assert_eq!(logger.rows_written(), 1);
        assert_eq!(bytes.get(), written);
        assert!(!logger.should_log(30));
        assert!(logger.should_log(40));
    }

    #[test]
    fn unknown_quantity_fails() {
        assert!(matches!(
            LogConfig::new("out.dat", &["temperature", "entropy"], 10),
            Err(Error::UnknownQuantity(q)) if q == "entropy"
        ));
        assert!(LogConfig::new("out.dat", &["N"], 0).is_err());
    }

    #[test]
    fn writes_header_and_rows() {
        let path = temp_path("logger.dat");
        let config = LogConfig::new(&path, &["temperature", "N", "rotational_ndof"], 10).unwrap();
        assert_eq!(
            config.header(),
            vec!["timestep", "temperature", "N", "rotational_ndof"]
        );
        let mut logger = Logger::create(config).unwrap();
        for t in 0..=25 {
            if logger.should_log(t) {
                logger.log(t, &thermo());
            }
        }
        // a repeated timestep is not logged twice
        assert!(!logger.should_log(20));
        assert_eq!(logger.rows_written(), 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "timestep\ttemperature\tN\trotational_ndof");
        assert_eq!(lines[1], "0\t1.00000000e0\t6\t2");
        assert_eq!(lines[3], "20\t1.00000000e0\t6\t2");
        assert_eq!(lines.len(), 4);
        std::fs::remove_file(&path).unwrap();
    }
}
