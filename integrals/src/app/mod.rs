mod matrices;
mod report;
mod system;

pub use matrices::{
    amplitudes, coulomb_integrals, kinetic_matrix, nuclear_matrix, nuclear_repulsion,
    overlap_matrix, symmetric_matrix, unique_quartets, CoulombIntegral,
};
pub use report::{log_report, matrix_rows, Report};
pub use system::{build_nuclei, build_system, MolecularSystem, Nucleus, Orbital};

use crate::config::{Args, Config};
use crate::io::{save_json_report, setup_output};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use nalgebra::Vector3;
use std::fs;
use tracing::info;

pub struct IntegralApplication {
    args: Args,
    config: Config,
}

impl IntegralApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args.config_file)?;
        Ok(Self { args, config })
    }

    pub fn new(args: Args, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_deref())?;
        info!("Configuration loaded from: {}", self.args.config_file);

        let report = self.compute()?;
        log_report(&report);

        if let Some(path) = &self.args.json {
            save_json_report(path, &report)?;
        }
        Ok(())
    }

    /// Build the orbitals and evaluate every requested quantity.
    pub fn compute(&self) -> Result<Report> {
        let system = build_system(&self.config)?;
        let orbitals = system.cgtos();
        let mut report = Report::describe(&system);

        let scale = self.config.units().to_bohr();
        let points: Vec<Vector3<f64>> = self
            .config
            .points
            .iter()
            .map(|p| Vector3::from(*p) * scale)
            .collect();
        if !points.is_empty() {
            info!("Evaluating amplitudes at {} points", points.len());
            let values = amplitudes(&orbitals, &points)?;
            report.set_amplitudes(&points, &values);
        }

        if self.args.points_only {
            return Ok(report);
        }

        report.nuclear_repulsion = nuclear_repulsion(&system.nuclei);

        info!("Computing overlap matrix");
        report.overlap = Some(matrix_rows(&overlap_matrix(&orbitals)?));

        let kinetic = if self.config.kinetic_enabled() {
            info!("Computing kinetic energy matrix");
            Some(kinetic_matrix(&orbitals)?)
        } else {
            None
        };
        let nuclear = if self.config.nuclear_enabled() {
            info!("Computing nuclear attraction matrix");
            Some(nuclear_matrix(&orbitals, &system.nuclei)?)
        } else {
            None
        };
        if let (Some(t), Some(v)) = (&kinetic, &nuclear) {
            report.core_hamiltonian = Some(matrix_rows(&(t + v)));
        }
        report.kinetic = kinetic.as_ref().map(matrix_rows);
        report.nuclear_attraction = nuclear.as_ref().map(matrix_rows);

        if self.config.coulomb_enabled(&self.args) {
            info!(
                "Computing {} unique two-electron integrals",
                unique_quartets(orbitals.len()).len()
            );
            report.coulomb = Some(coulomb_integrals(&orbitals)?);
        }

        Ok(report)
    }
}

pub fn load_config(path: &str) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
