//! Integral matrices over a set of contracted orbitals, evaluated in parallel.

use super::system::Nucleus;
use basis::{CgtoError, ContractedGTO};
use color_eyre::eyre::Result;
use nalgebra::{DMatrix, Vector3};
use rayon::prelude::*;
use serde::Serialize;

/// One symmetry-unique two-electron integral `(ij|kl)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoulombIntegral {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
    pub value: f64,
}

// lower triangle (i >= j) in row-major order
fn lower_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|i| (0..=i).map(move |j| (i, j))).collect()
}

/// Symmetric matrix `M[i][j] = integral(orbital i, orbital j)`; only the
/// lower triangle is evaluated.
pub fn symmetric_matrix<F>(orbitals: &[ContractedGTO], integral: F) -> Result<DMatrix<f64>>
where
    F: Fn(&ContractedGTO, &ContractedGTO) -> Result<f64, CgtoError> + Sync,
{
    let n = orbitals.len();
    let pairs = lower_pairs(n);

    let values = pairs
        .par_iter()
        .map(|&(i, j)| integral(&orbitals[i], &orbitals[j]))
        .collect::<Result<Vec<f64>, CgtoError>>()?;

    let mut matrix = DMatrix::zeros(n, n);
    for (&(i, j), value) in pairs.iter().zip(values) {
        matrix[(i, j)] = value;
        matrix[(j, i)] = value;
    }
    Ok(matrix)
}

pub fn overlap_matrix(orbitals: &[ContractedGTO]) -> Result<DMatrix<f64>> {
    symmetric_matrix(orbitals, |a, b| ContractedGTO::overlap(a, b))
}

pub fn kinetic_matrix(orbitals: &[ContractedGTO]) -> Result<DMatrix<f64>> {
    symmetric_matrix(orbitals, |a, b| ContractedGTO::kinetic(a, b))
}

/// Electron-nuclear attraction summed over all nuclei.
pub fn nuclear_matrix(orbitals: &[ContractedGTO], nuclei: &[Nucleus]) -> Result<DMatrix<f64>> {
    symmetric_matrix(orbitals, |a, b| {
        nuclei
            .iter()
            .map(|nucleus| ContractedGTO::nuclear(a, b, nucleus.position, nucleus.charge))
            .sum()
    })
}

pub fn nuclear_repulsion(nuclei: &[Nucleus]) -> f64 {
    let mut energy = 0.0;
    for (i, a) in nuclei.iter().enumerate() {
        for b in nuclei.iter().skip(i + 1) {
            let r = (a.position - b.position).norm();
            energy += (a.charge * b.charge) as f64 / r;
        }
    }
    energy
}

/// Index quartets with `i >= j`, `k >= l` and `ij >= kl` (compound indices).
pub fn unique_quartets(n: usize) -> Vec<[usize; 4]> {
    let pairs = lower_pairs(n);
    let pairs = &pairs;
    pairs
        .iter()
        .enumerate()
        .flat_map(move |(ij, &(i, j))| pairs[..=ij].iter().map(move |&(k, l)| [i, j, k, l]))
        .collect()
}

pub fn coulomb_integrals(orbitals: &[ContractedGTO]) -> Result<Vec<CoulombIntegral>> {
    let quartets = unique_quartets(orbitals.len());
    let integrals = quartets
        .par_iter()
        .map(|&[i, j, k, l]| -> Result<CoulombIntegral, CgtoError> {
            let value =
                ContractedGTO::coulomb(&orbitals[i], &orbitals[j], &orbitals[k], &orbitals[l])?;
            Ok(CoulombIntegral { i, j, k, l, value })
        })
        .collect::<Result<Vec<_>, CgtoError>>()?;
    Ok(integrals)
}

/// Orbital amplitudes, one row per point.
pub fn amplitudes(orbitals: &[ContractedGTO], points: &[Vector3<f64>]) -> Result<DMatrix<f64>> {
    let rows = points
        .par_iter()
        .map(|r| {
            orbitals
                .iter()
                .map(|orbital| orbital.amplitude(r))
                .collect::<Result<Vec<f64>, CgtoError>>()
        })
        .collect::<Result<Vec<_>, CgtoError>>()?;

    let mut matrix = DMatrix::zeros(points.len(), orbitals.len());
    for (p, row) in rows.iter().enumerate() {
        for (i, value) in row.iter().enumerate() {
            matrix[(p, i)] = *value;
        }
    }
    Ok(matrix)
}
