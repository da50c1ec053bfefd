//! Configuration for integral calculations
//!
//! Command-line arguments and the YAML description of a molecule, its
//! contracted orbitals and the sample points for amplitude evaluation.

use clap::Parser;
use color_eyre::eyre::{bail, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Bohr radius in angstrom (CODATA 2010).
pub const BOHR_IN_ANGSTROM: f64 = 0.52917721092;

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "integrals")]
#[command(about = "Contracted Gaussian orbital integral calculator", long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "integrals/example/h2_sto3g.yaml")]
    pub config_file: String,

    /// Log file path (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the full report as JSON to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Skip two-electron integrals even if the config enables them
    #[arg(long)]
    pub skip_coulomb: bool,

    /// Only evaluate orbital amplitudes at the configured points
    #[arg(long)]
    pub points_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub atoms: Vec<AtomConfig>,

    pub orbitals: Vec<OrbitalConfig>,

    /// Points at which orbital amplitudes are reported
    #[serde(default)]
    pub points: Vec<[f64; 3]>,

    #[serde(default)]
    pub options: IntegralOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomConfig {
    /// Element symbol (e.g., "H", "O", "C")
    pub element: String,

    /// Nuclear position, in the units selected by `options.units`
    pub coords: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalConfig {
    /// Index into `atoms` of the center
    pub atom: usize,

    pub shell: ShellSpec,

    pub primitives: Vec<PrimitiveConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveConfig {
    pub alpha: f64,
    pub coefficient: f64,
}

/// Angular part of an orbital entry: explicit Cartesian powers, or a shell
/// letter standing for all Cartesian components of that angular momentum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShellSpec {
    Cartesian([i32; 3]),
    Label(String),
}

const SHELL_LETTERS: [char; 4] = ['s', 'p', 'd', 'f'];

/// Highest total angular momentum of an orbital. A Coulomb integral over
/// four such orbitals needs Boys order `4 * 3 = 12`, the largest available.
pub const MAX_ANGULAR_MOMENTUM: i32 = 3;

impl ShellSpec {
    /// Cartesian powers `(l, m, n)` generated by this entry.
    ///
    /// Labels expand in the order x^l, x^(l-1)y, x^(l-1)z, ... , z^l.
    pub fn components(&self) -> Result<Vec<Vector3<i32>>> {
        match self {
            ShellSpec::Cartesian(powers) => {
                if powers.iter().any(|&p| p < 0) {
                    bail!("Cartesian powers must be non-negative, got {:?}", powers);
                }
                let l: i32 = powers.iter().sum();
                if l > MAX_ANGULAR_MOMENTUM {
                    bail!(
                        "Angular momentum {} of {:?} exceeds the supported maximum {}",
                        l,
                        powers,
                        MAX_ANGULAR_MOMENTUM
                    );
                }
                Ok(vec![Vector3::new(powers[0], powers[1], powers[2])])
            }
            ShellSpec::Label(label) => {
                let l = shell_angular_momentum(label)?;
                let mut components = Vec::new();
                for i in (0..=l).rev() {
                    for j in (0..=l - i).rev() {
                        components.push(Vector3::new(i, j, l - i - j));
                    }
                }
                Ok(components)
            }
        }
    }
}

fn shell_angular_momentum(label: &str) -> Result<i32> {
    let lower = label.trim().to_lowercase();
    let mut chars = lower.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => match SHELL_LETTERS.iter().position(|&c| c == letter) {
            Some(l) => Ok(l as i32),
            None => bail!("Unknown shell label: {}", label),
        },
        _ => bail!("Unknown shell label: {}", label),
    }
}

/// Orbital name such as `s`, `px` or `dxy` for Cartesian powers `l_xyz`.
pub fn shell_label(l_xyz: &Vector3<i32>) -> String {
    let l = l_xyz.sum();
    let mut label = match SHELL_LETTERS.get(l as usize) {
        Some(letter) => letter.to_string(),
        None => format!("l{}", l),
    };
    for (axis, power) in ['x', 'y', 'z'].iter().zip(l_xyz.iter()) {
        for _ in 0..*power {
            label.push(*axis);
        }
    }
    label
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Bohr,
    Angstrom,
}

impl Units {
    /// Factor converting a length in these units to bohr.
    pub fn to_bohr(self) -> f64 {
        match self {
            Units::Bohr => 1.0,
            Units::Angstrom => 1.0 / BOHR_IN_ANGSTROM,
        }
    }
}

/// Which integral classes to compute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegralOptions {
    #[serde(default)]
    pub units: Option<Units>,

    #[serde(default)]
    pub kinetic: Option<bool>,

    #[serde(default)]
    pub nuclear: Option<bool>,

    /// Two-electron repulsion integrals, quartic in the basis size
    #[serde(default)]
    pub coulomb: Option<bool>,
}

impl Default for IntegralOptions {
    fn default() -> Self {
        IntegralOptions {
            units: Some(Units::Bohr),
            kinetic: Some(true),
            nuclear: Some(true),
            coulomb: Some(false),
        }
    }
}

impl IntegralOptions {
    /// Apply default values to any missing fields
    pub fn with_defaults(mut self) -> Self {
        let defaults = IntegralOptions::default();
        if self.units.is_none() {
            self.units = defaults.units;
        }
        if self.kinetic.is_none() {
            self.kinetic = defaults.kinetic;
        }
        if self.nuclear.is_none() {
            self.nuclear = defaults.nuclear;
        }
        if self.coulomb.is_none() {
            self.coulomb = defaults.coulomb;
        }
        self
    }
}

impl Config {
    pub fn with_defaults(mut self) -> Self {
        self.options = self.options.with_defaults();
        self
    }

    pub fn units(&self) -> Units {
        self.options.units.unwrap_or(Units::Bohr)
    }

    pub fn kinetic_enabled(&self) -> bool {
        self.options.kinetic.unwrap_or(true)
    }

    pub fn nuclear_enabled(&self) -> bool {
        self.options.nuclear.unwrap_or(true)
    }

    /// Coulomb integrals are computed only if requested and not skipped on
    /// the command line.
    pub fn coulomb_enabled(&self, args: &Args) -> bool {
        self.options.coulomb.unwrap_or(false) && !args.skip_coulomb
    }
}
