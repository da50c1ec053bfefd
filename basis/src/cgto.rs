/* Contracted gaussian type orbital (CGTO): a fixed linear combination of
   primitive gaussians sharing one center and one set of angular labels,
   together with the coefficient-weighted integral sums over its primitives.
*/
#![allow(non_snake_case)]

use crate::basis::Basis;
use crate::error::CgtoError;
use crate::gto::GTO;
use itertools::iproduct;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Cached normalization constant of a contraction.
///
/// Every mutation of the primitive list drops the cache back to
/// `Unnormalized`; integrals refuse to run until `normalize` is called again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Normalization {
    Unnormalized,
    Normalized(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractedGTO<P = GTO> {
    center: Vector3<f64>,
    l_xyz: Vector3<i32>,
    atom_id: usize,
    primitives: Vec<P>,
    coefficients: Vec<f64>,
    normalization: Normalization,
}

impl<P: Basis + Clone> ContractedGTO<P> {
    /// Empty contraction at `center` with Cartesian powers `l_xyz`.
    ///
    /// The powers are expected to be non-negative and to match the
    /// primitives added later.
    pub fn new(center: Vector3<f64>, l_xyz: Vector3<i32>, atom_id: usize) -> Self {
        Self {
            center,
            l_xyz,
            atom_id,
            primitives: Vec::new(),
            coefficients: Vec::new(),
            normalization: Normalization::Unnormalized,
        }
    }

    /// Append `primitive` with contraction `coefficient`.
    ///
    /// On allocation failure the contraction is left untouched.
    pub fn add_primitive(&mut self, primitive: P, coefficient: f64) -> Result<(), CgtoError> {
        self.primitives.try_reserve(1)?;
        self.coefficients.try_reserve(1)?;

        self.primitives.push(primitive);
        self.coefficients.push(coefficient);
        self.normalization = Normalization::Unnormalized;
        Ok(())
    }

    /// Replace the primitive list with `primitives`, in order.
    ///
    /// Without `coefficients` every primitive enters with weight 1, i.e. an
    /// uncontracted expansion. Either the whole list is replaced or nothing
    /// changes.
    pub fn build_from_primitives(
        &mut self,
        primitives: &[P],
        coefficients: Option<&[f64]>,
    ) -> Result<(), CgtoError> {
        if let Some(coefs) = coefficients {
            if coefs.len() != primitives.len() {
                return Err(CgtoError::CoefficientCountMismatch {
                    primitives: primitives.len(),
                    coefficients: coefs.len(),
                });
            }
        }

        let mut new_primitives = Vec::new();
        new_primitives.try_reserve_exact(primitives.len())?;
        let mut new_coefficients = Vec::new();
        new_coefficients.try_reserve_exact(primitives.len())?;

        new_primitives.extend_from_slice(primitives);
        match coefficients {
            Some(coefs) => new_coefficients.extend_from_slice(coefs),
            None => new_coefficients.resize(primitives.len(), 1.0),
        }

        trace!(
            atom_id = self.atom_id,
            nprims = new_primitives.len(),
            "rebuilt contraction from primitive array"
        );

        self.primitives = new_primitives;
        self.coefficients = new_coefficients;
        self.normalization = Normalization::Unnormalized;
        Ok(())
    }

    /// Compute and cache `1 / sqrt(sum_ij c_i c_j <p_i|p_j>)`.
    pub fn normalize(&mut self) -> Result<f64, CgtoError> {
        if self.is_empty() {
            return Err(CgtoError::EmptyContraction);
        }

        let self_overlap = Self::pair_sum(self, self, P::Sab);
        if !(self_overlap.is_finite() && self_overlap > 0.0) {
            return Err(CgtoError::NonPositiveSelfOverlap(self_overlap));
        }

        let norm = 1.0 / self_overlap.sqrt();
        debug!(
            atom_id = self.atom_id,
            nprims = self.len(),
            self_overlap,
            norm,
            "normalized contracted orbital"
        );
        self.normalization = Normalization::Normalized(norm);
        Ok(norm)
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    pub fn l_xyz(&self) -> Vector3<i32> {
        self.l_xyz
    }

    pub fn angular_momentum(&self) -> i32 {
        self.l_xyz.sum()
    }

    pub fn atom_id(&self) -> usize {
        self.atom_id
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn norm(&self) -> Option<f64> {
        match self.normalization {
            Normalization::Normalized(norm) => Some(norm),
            Normalization::Unnormalized => None,
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.norm().is_some()
    }

    // (primitive, coefficient) pairs in insertion order
    fn components(&self) -> impl Iterator<Item = (&P, f64)> + Clone {
        self.primitives.iter().zip(self.coefficients.iter().copied())
    }

    // normalization constant, or the reason the orbital cannot be integrated
    fn checked_norm(&self) -> Result<f64, CgtoError> {
        if self.is_empty() {
            return Err(CgtoError::EmptyContraction);
        }
        self.norm().ok_or(CgtoError::NotNormalized)
    }

    fn pair_sum<F>(a: &Self, b: &Self, integral: F) -> f64
    where
        F: Fn(&P, &P) -> f64,
    {
        iproduct!(a.components(), b.components())
            .map(|((pa, ca), (pb, cb))| ca * cb * integral(pa, pb))
            .sum()
    }

    /// Overlap `<a|b>` of two normalized contractions.
    pub fn overlap(a: &Self, b: &Self) -> Result<f64, CgtoError> {
        let norm = a.checked_norm()? * b.checked_norm()?;
        Ok(norm * Self::pair_sum(a, b, P::Sab))
    }

    /// Kinetic energy integral `<a|-1/2 nabla^2|b>`.
    pub fn kinetic(a: &Self, b: &Self) -> Result<f64, CgtoError> {
        let norm = a.checked_norm()? * b.checked_norm()?;
        Ok(norm * Self::pair_sum(a, b, P::Tab))
    }

    /// Attraction `<a|-Z/|r-R||b>` to a point nucleus.
    pub fn nuclear(a: &Self, b: &Self, R: Vector3<f64>, Z: u32) -> Result<f64, CgtoError> {
        let norm = a.checked_norm()? * b.checked_norm()?;
        Ok(norm * Self::pair_sum(a, b, |pa, pb| P::Vab(pa, pb, R, Z)))
    }

    /// Product of the four cached normalization constants, the prefactor of
    /// a contracted four-center integral.
    pub fn renorm_prefactor(a: &Self, b: &Self, c: &Self, d: &Self) -> Result<f64, CgtoError> {
        Ok(a.checked_norm()? * b.checked_norm()? * c.checked_norm()? * d.checked_norm()?)
    }

    /// Electron repulsion integral `(ab|cd)` over four contractions.
    pub fn coulomb(a: &Self, b: &Self, c: &Self, d: &Self) -> Result<f64, CgtoError> {
        let prefactor = Self::renorm_prefactor(a, b, c, d)?;
        let sum: f64 = iproduct!(a.components(), b.components(), c.components(), d.components())
            .map(|((pa, ca), (pb, cb), (pc, cc), (pd, cd))| {
                ca * cb * cc * cd * P::JKabcd(pa, pb, pc, pd)
            })
            .sum();
        Ok(prefactor * sum)
    }

    /// Amplitude of the orbital at `r`.
    pub fn amplitude(&self, r: &Vector3<f64>) -> Result<f64, CgtoError> {
        let norm = self.checked_norm()?;
        let sum: f64 = self.components().map(|(p, c)| c * p.evaluate(r)).sum();
        Ok(norm * sum)
    }

    pub fn gradient(&self, r: &Vector3<f64>) -> Result<Vector3<f64>, CgtoError> {
        let norm = self.checked_norm()?;
        let sum = self
            .components()
            .fold(Vector3::zeros(), |acc, (p, c)| acc + p.gradient(r) * c);
        Ok(sum * norm)
    }
}

impl ContractedGTO<GTO> {
    /// Gaussian exponents of the primitives, in insertion order.
    pub fn exponents(&self) -> Vec<f64> {
        self.primitives.iter().map(|p| p.alpha).collect()
    }
}
