use super::matrices::CoulombIntegral;
use super::system::{MolecularSystem, Nucleus};
use nalgebra::{DMatrix, Vector3};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct NucleusSummary {
    pub symbol: String,
    pub charge: u32,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct OrbitalSummary {
    pub label: String,
    pub atom: usize,
    pub l_xyz: [i32; 3],
    pub exponents: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub norm: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointAmplitudes {
    pub point: [f64; 3],
    pub values: Vec<f64>,
}

/// Everything computed in one run; matrices are stored row by row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub nuclei: Vec<NucleusSummary>,
    pub orbitals: Vec<OrbitalSummary>,
    pub nuclear_repulsion: f64,
    pub overlap: Option<Vec<Vec<f64>>>,
    pub kinetic: Option<Vec<Vec<f64>>>,
    pub nuclear_attraction: Option<Vec<Vec<f64>>>,
    pub core_hamiltonian: Option<Vec<Vec<f64>>>,
    pub coulomb: Option<Vec<CoulombIntegral>>,
    pub amplitudes: Vec<PointAmplitudes>,
}

fn to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

pub fn matrix_rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

impl Report {
    pub fn describe(system: &MolecularSystem) -> Self {
        let nuclei = system
            .nuclei
            .iter()
            .map(|n: &Nucleus| NucleusSummary {
                symbol: n.symbol.clone(),
                charge: n.charge,
                position: to_array(&n.position),
            })
            .collect();

        let orbitals = system
            .orbitals
            .iter()
            .map(|o| {
                let l = o.cgto.l_xyz();
                OrbitalSummary {
                    label: o.label.clone(),
                    atom: o.cgto.atom_id(),
                    l_xyz: [l.x, l.y, l.z],
                    exponents: o.cgto.exponents(),
                    coefficients: o.cgto.coefficients().to_vec(),
                    norm: o.cgto.norm(),
                }
            })
            .collect();

        Report {
            nuclei,
            orbitals,
            ..Default::default()
        }
    }

    pub fn set_amplitudes(&mut self, points: &[Vector3<f64>], values: &DMatrix<f64>) {
        self.amplitudes = points
            .iter()
            .zip(values.row_iter())
            .map(|(point, row)| PointAmplitudes {
                point: to_array(point),
                values: row.iter().copied().collect(),
            })
            .collect();
    }
}

fn log_matrix(title: &str, labels: &[String], rows: &[Vec<f64>]) {
    info!("\n{}:", title);
    for (label, row) in labels.iter().zip(rows) {
        let line: Vec<String> = row.iter().map(|v| format!("{:>12.6}", v)).collect();
        info!("  {:<10}{}", label, line.join(""));
    }
}

pub fn log_report(report: &Report) {
    info!("\nNuclei (bohr):");
    for (idx, n) in report.nuclei.iter().enumerate() {
        info!(
            "  Atom {:>2} {:>2} (Z = {:>3}): [{:+.6}, {:+.6}, {:+.6}]",
            idx + 1,
            n.symbol,
            n.charge,
            n.position[0],
            n.position[1],
            n.position[2]
        );
    }

    info!("\nContracted orbitals:");
    for o in &report.orbitals {
        info!(
            "  {:<10} {} primitives, norm = {:.8}",
            o.label,
            o.exponents.len(),
            o.norm.unwrap_or(f64::NAN)
        );
    }

    info!("\nNuclear repulsion energy: {:.10} au", report.nuclear_repulsion);

    let labels: Vec<String> = report.orbitals.iter().map(|o| o.label.clone()).collect();
    let matrices = [
        ("Overlap matrix S", &report.overlap),
        ("Kinetic energy matrix T", &report.kinetic),
        ("Nuclear attraction matrix V", &report.nuclear_attraction),
        ("Core Hamiltonian H = T + V", &report.core_hamiltonian),
    ];
    for (title, rows) in matrices {
        if let Some(rows) = rows {
            log_matrix(title, &labels, rows);
        }
    }

    if let Some(coulomb) = &report.coulomb {
        info!("\nTwo-electron integrals (ij|kl), {} unique:", coulomb.len());
        for c in coulomb {
            info!(
                "  ({:>3} {:>3} |{:>3} {:>3}) = {:>14.8}",
                c.i + 1,
                c.j + 1,
                c.k + 1,
                c.l + 1,
                c.value
            );
        }
    }

    if !report.amplitudes.is_empty() {
        info!("\nOrbital amplitudes:");
        for p in &report.amplitudes {
            info!(
                "  at [{:+.4}, {:+.4}, {:+.4}]",
                p.point[0], p.point[1], p.point[2]
            );
            for (label, value) in labels.iter().zip(&p.values) {
                info!("    {:<10}{:>14.8}", label, value);
            }
        }
    }
}
