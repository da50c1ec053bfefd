use crate::config::{shell_label, Config};
use basis::{ContractedGTO, GTO};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use nalgebra::Vector3;
use periodic_table_on_an_enum::Element;
use tracing::{debug, info};

/// Point nucleus, position in bohr.
#[derive(Debug, Clone)]
pub struct Nucleus {
    pub symbol: String,
    pub charge: u32,
    pub position: Vector3<f64>,
}

/// Normalized contracted orbital with a printable name.
#[derive(Debug, Clone)]
pub struct Orbital {
    pub label: String,
    pub cgto: ContractedGTO,
}

pub struct MolecularSystem {
    pub nuclei: Vec<Nucleus>,
    pub orbitals: Vec<Orbital>,
}

impl MolecularSystem {
    pub fn cgtos(&self) -> Vec<ContractedGTO> {
        self.orbitals.iter().map(|o| o.cgto.clone()).collect()
    }
}

pub fn build_nuclei(config: &Config) -> Result<Vec<Nucleus>> {
    let scale = config.units().to_bohr();
    let mut nuclei = Vec::with_capacity(config.atoms.len());

    for atom in &config.atoms {
        let element = Element::from_symbol(&atom.element)
            .ok_or_else(|| eyre!("Invalid element symbol: {}", atom.element))?;
        let charge = element.get_atomic_number() as u32;
        let position = Vector3::from(atom.coords) * scale;
        nuclei.push(Nucleus {
            symbol: element.get_symbol().to_string(),
            charge,
            position,
        });
    }

    for (i, a) in nuclei.iter().enumerate() {
        for (j, b) in nuclei.iter().enumerate().skip(i + 1) {
            if (a.position - b.position).norm() < 1e-8 {
                bail!("Atoms {} and {} occupy the same position", i, j);
            }
        }
    }

    Ok(nuclei)
}

/// Build and normalize every contracted orbital of the configuration.
///
/// A shell label expands into one orbital per Cartesian component, all
/// sharing the listed primitives.
pub fn build_system(config: &Config) -> Result<MolecularSystem> {
    info!("Preparing molecular system...");
    let nuclei = build_nuclei(config)?;
    let mut orbitals = Vec::new();

    for (idx, entry) in config.orbitals.iter().enumerate() {
        let nucleus = nuclei.get(entry.atom).ok_or_else(|| {
            eyre!(
                "Orbital {} refers to atom {}, but only {} atoms are defined",
                idx,
                entry.atom,
                nuclei.len()
            )
        })?;
        if entry.primitives.is_empty() {
            bail!("Orbital {} has no primitives", idx);
        }
        if let Some(bad) = entry.primitives.iter().find(|p| !(p.alpha > 0.0)) {
            bail!("Orbital {} has a non-positive exponent: {}", idx, bad.alpha);
        }

        let components = entry
            .shell
            .components()
            .wrap_err_with(|| format!("Invalid shell for orbital {}", idx))?;

        for l_xyz in components {
            let center = nucleus.position;
            let mut cgto = ContractedGTO::new(center, l_xyz, entry.atom);
            for prim in &entry.primitives {
                cgto.add_primitive(GTO::new(prim.alpha, l_xyz, center), prim.coefficient)
                    .wrap_err_with(|| format!("Failed to add primitive to orbital {}", idx))?;
            }
            let norm = cgto
                .normalize()
                .wrap_err_with(|| format!("Unable to normalize orbital {}", idx))?;

            let label = format!(
                "{}{}:{}",
                nucleus.symbol,
                entry.atom + 1,
                shell_label(&l_xyz)
            );
            debug!("Orbital {} ({} primitives), norm = {:.8}", label, cgto.len(), norm);
            orbitals.push(Orbital { label, cgto });
        }
    }

    info!(
        "{} atoms, {} contracted orbitals",
        nuclei.len(),
        orbitals.len()
    );
    Ok(MolecularSystem { nuclei, orbitals })
}
