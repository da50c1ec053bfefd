#![allow(non_snake_case)]
use nalgebra::Vector3;

/// Capabilities a primitive basis function must provide so that it can be
/// contracted into a [`ContractedGTO`](crate::cgto::ContractedGTO).
///
/// Every integral is taken between already-normalized primitives, i.e. the
/// primitive's own normalization constant is folded into the returned value.
pub trait Basis {
    /// Amplitude of the primitive at `r`.
    fn evaluate(&self, r: &Vector3<f64>) -> f64;

    /// Gradient of the amplitude at `r`.
    fn gradient(&self, r: &Vector3<f64>) -> Vector3<f64>;

    // overlap <a|b>
    fn Sab(a: &Self, b: &Self) -> f64;

    // kinetic <a|-1/2 nabla^2|b>
    fn Tab(a: &Self, b: &Self) -> f64;

    /// Attraction of the charge distribution `a * b` to a point nucleus of
    /// charge `Z` at `R`. Negative for `Z > 0`.
    fn Vab(a: &Self, b: &Self, R: Vector3<f64>, Z: u32) -> f64;

    /// Two-electron repulsion integral `(ab|cd)` in chemists' notation.
    fn JKabcd(a: &Self, b: &Self, c: &Self, d: &Self) -> f64;
}
