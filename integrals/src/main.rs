//! Contracted Gaussian integral calculator
//!
//! Reads a molecule and its contracted orbitals from YAML, then reports the
//! one- and two-electron integral matrices and orbital amplitudes.

use color_eyre::eyre::Result;
use integrals::app::IntegralApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    IntegralApplication::from_cli()?.run()
}
