#![allow(non_snake_case)]
extern crate nalgebra as na;

use crate::basis::Basis;
use crate::helper::boys_function;
use itertools::iproduct;
use na::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One Cartesian factor `N x^l exp(-alpha x^2)` of a primitive Gaussian,
/// normalized on the real line.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct GTO1d {
    pub alpha: f64,
    pub l: i32,
    pub center: f64,
    pub norm: f64,
}

fn factorial(n: i32) -> f64 {
    (1..=n).fold(1.0, |acc, x| acc * x as f64)
}

// x^k, vanishing for negative k so that l * x^(l-1) terms drop out at l = 0
fn xpow(x: f64, k: i32) -> f64 {
    if k < 0 {
        0.0
    } else {
        x.powi(k)
    }
}

impl GTO1d {
    pub fn new(alpha: f64, l: i32, center: f64) -> Self {
        let norm = GTO1d::compute_norm(alpha, l);
        Self {
            alpha,
            l,
            center,
            norm,
        }
    }

    fn compute_norm(alpha: f64, l: i32) -> f64 {
        // N^2 = 2^(3l) * l! * alpha^l * sqrt(2 alpha / pi) / (2l)!
        let n_squared = 2.0_f64.powi(3 * l) * factorial(l) * alpha.powi(l)
            * (2.0 * alpha / PI).sqrt()
            / factorial(2 * l);
        n_squared.sqrt()
    }

    fn radial(&self, x: f64) -> f64 {
        (-self.alpha * x * x).exp()
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let x = x - self.center;
        self.norm * xpow(x, self.l) * self.radial(x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        let x = x - self.center;
        let l = self.l as f64;
        let poly = l * xpow(x, self.l - 1) - 2.0 * self.alpha * xpow(x, self.l + 1);
        self.norm * poly * self.radial(x)
    }

    /// Second derivative along this axis.
    pub fn laplacian(&self, x: f64) -> f64 {
        let x = x - self.center;
        let l = self.l as f64;
        let poly = l * (l - 1.0) * xpow(x, self.l - 2)
            - 2.0 * self.alpha * (2.0 * l + 1.0) * xpow(x, self.l)
            + 4.0 * self.alpha.powi(2) * xpow(x, self.l + 2);
        self.norm * poly * self.radial(x)
    }

    /// McMurchie-Davidson Hermite expansion coefficient `E_t^{ij}` of the
    /// product of two unnormalized 1-D Gaussians with exponents `a`, `b`
    /// separated by `qx = A - B`.
    pub fn hermite_expansion(i: i32, j: i32, t: i32, qx: f64, a: f64, b: f64) -> f64 {
        if t < 0 || t > i + j || i < 0 || j < 0 {
            return 0.0;
        }

        let p = a + b;
        let q = a * b / p;

        if i == 0 && j == 0 {
            (-q * qx * qx).exp()
        } else if j == 0 {
            // lower i
            GTO1d::hermite_expansion(i - 1, j, t - 1, qx, a, b) / (2.0 * p)
                - GTO1d::hermite_expansion(i - 1, j, t, qx, a, b) * q * qx / a
                + GTO1d::hermite_expansion(i - 1, j, t + 1, qx, a, b) * (t + 1) as f64
        } else {
            // lower j
            GTO1d::hermite_expansion(i, j - 1, t - 1, qx, a, b) / (2.0 * p)
                + GTO1d::hermite_expansion(i, j - 1, t, qx, a, b) * q * qx / b
                + GTO1d::hermite_expansion(i, j - 1, t + 1, qx, a, b) * (t + 1) as f64
        }
    }

    /// All coefficients `E_t^{ij}` for `t = 0..=i+j` of the pair `(a, b)`.
    pub fn hermite_coefficients(a: &GTO1d, b: &GTO1d) -> Vec<f64> {
        let qx = a.center - b.center;
        (0..=a.l + b.l)
            .map(|t| GTO1d::hermite_expansion(a.l, b.l, t, qx, a.alpha, b.alpha))
            .collect()
    }

    pub fn Sab(a: &GTO1d, b: &GTO1d) -> f64 {
        let p = a.alpha + b.alpha;
        let qx = a.center - b.center;
        GTO1d::hermite_expansion(a.l, b.l, 0, qx, a.alpha, b.alpha)
            * (PI / p).sqrt()
            * a.norm
            * b.norm
    }

    // -1/2 <a| d^2/dx^2 |b>, with the derivative expanded on b
    pub fn Tab(a: &GTO1d, b: &GTO1d) -> f64 {
        let p = a.alpha + b.alpha;
        let qx = a.center - b.center;
        let lb = b.l as f64;
        let e = |j: i32| GTO1d::hermite_expansion(a.l, j, 0, qx, a.alpha, b.alpha);

        let second = lb * (lb - 1.0) * e(b.l - 2)
            - 2.0 * b.alpha * (2.0 * lb + 1.0) * e(b.l)
            + 4.0 * b.alpha.powi(2) * e(b.l + 2);

        -0.5 * a.norm * b.norm * (PI / p).sqrt() * second
    }
}

/// Normalized primitive Cartesian Gaussian
/// `N (x-Ax)^l (y-Ay)^m (z-Az)^n exp(-alpha |r-A|^2)`.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct GTO {
    pub alpha: f64,
    pub l_xyz: Vector3<i32>,
    pub center: Vector3<f64>,
    pub norm: f64,
    pub gto1d: [GTO1d; 3],
}

impl GTO {
    pub fn new(alpha: f64, l_xyz: Vector3<i32>, center: Vector3<f64>) -> Self {
        let gto1d = [
            GTO1d::new(alpha, l_xyz.x, center.x),
            GTO1d::new(alpha, l_xyz.y, center.y),
            GTO1d::new(alpha, l_xyz.z, center.z),
        ];
        let norm = gto1d.iter().map(|g| g.norm).product();
        Self {
            alpha,
            l_xyz,
            center,
            norm,
            gto1d,
        }
    }

    pub fn angular_momentum(&self) -> i32 {
        self.l_xyz.sum()
    }

    pub fn laplacian(&self, r: &Vector3<f64>) -> f64 {
        let [gx, gy, gz] = &self.gto1d;
        let (ex, ey, ez) = (gx.evaluate(r.x), gy.evaluate(r.y), gz.evaluate(r.z));

        gx.laplacian(r.x) * ey * ez + ex * gy.laplacian(r.y) * ez + ex * ey * gz.laplacian(r.z)
    }

    // exponent and center of the Gaussian product a * b
    fn product_center(a: &GTO, b: &GTO) -> (f64, Vector3<f64>) {
        let p = a.alpha + b.alpha;
        (p, (a.center * a.alpha + b.center * b.alpha) / p)
    }

    fn hermite_tables(a: &GTO, b: &GTO) -> [Vec<f64>; 3] {
        [
            GTO1d::hermite_coefficients(&a.gto1d[0], &b.gto1d[0]),
            GTO1d::hermite_coefficients(&a.gto1d[1], &b.gto1d[1]),
            GTO1d::hermite_coefficients(&a.gto1d[2], &b.gto1d[2]),
        ]
    }

    /// Hermite Coulomb integral `R^n_{tuv}(p, PC)` (Helgaker, Jorgensen and
    /// Olsen, eq. 9.9.18-20), built on the Boys function.
    pub fn hermite_coulomb(t: i32, u: i32, v: i32, n: i32, p: f64, pc: &Vector3<f64>) -> f64 {
        if t < 0 || u < 0 || v < 0 {
            return 0.0;
        }

        if t == 0 && u == 0 && v == 0 {
            (-2.0 * p).powi(n) * boys_function(n, p * pc.norm_squared())
        } else if t > 0 {
            (t - 1) as f64 * GTO::hermite_coulomb(t - 2, u, v, n + 1, p, pc)
                + pc.x * GTO::hermite_coulomb(t - 1, u, v, n + 1, p, pc)
        } else if u > 0 {
            (u - 1) as f64 * GTO::hermite_coulomb(t, u - 2, v, n + 1, p, pc)
                + pc.y * GTO::hermite_coulomb(t, u - 1, v, n + 1, p, pc)
        } else {
            (v - 1) as f64 * GTO::hermite_coulomb(t, u, v - 2, n + 1, p, pc)
                + pc.z * GTO::hermite_coulomb(t, u, v - 1, n + 1, p, pc)
        }
    }
}

impl Basis for GTO {
    fn evaluate(&self, r: &Vector3<f64>) -> f64 {
        self.gto1d[0].evaluate(r.x) * self.gto1d[1].evaluate(r.y) * self.gto1d[2].evaluate(r.z)
    }

    fn gradient(&self, r: &Vector3<f64>) -> Vector3<f64> {
        let [gx, gy, gz] = &self.gto1d;
        let (ex, ey, ez) = (gx.evaluate(r.x), gy.evaluate(r.y), gz.evaluate(r.z));

        Vector3::new(
            gx.derivative(r.x) * ey * ez,
            ex * gy.derivative(r.y) * ez,
            ex * ey * gz.derivative(r.z),
        )
    }

    fn Sab(a: &GTO, b: &GTO) -> f64 {
        (0..3).map(|k| GTO1d::Sab(&a.gto1d[k], &b.gto1d[k])).product()
    }

    fn Tab(a: &GTO, b: &GTO) -> f64 {
        let s: [f64; 3] = std::array::from_fn(|k| GTO1d::Sab(&a.gto1d[k], &b.gto1d[k]));
        let t: [f64; 3] = std::array::from_fn(|k| GTO1d::Tab(&a.gto1d[k], &b.gto1d[k]));

        t[0] * s[1] * s[2] + s[0] * t[1] * s[2] + s[0] * s[1] * t[2]
    }

    fn Vab(a: &GTO, b: &GTO, R: Vector3<f64>, Z: u32) -> f64 {
        let (p, P) = GTO::product_center(a, b);
        let pc = P - R;
        let [ex, ey, ez] = GTO::hermite_tables(a, b);

        let val: f64 = iproduct!(0..ex.len(), 0..ey.len(), 0..ez.len())
            .map(|(t, u, v)| {
                ex[t] * ey[u] * ez[v]
                    * GTO::hermite_coulomb(t as i32, u as i32, v as i32, 0, p, &pc)
            })
            .sum();

        // attractive, hence the sign
        -(Z as f64) * 2.0 * PI / p * a.norm * b.norm * val
    }

    fn JKabcd(a: &GTO, b: &GTO, c: &GTO, d: &GTO) -> f64 {
        let (p, P) = GTO::product_center(a, b);
        let (q, Q) = GTO::product_center(c, d);
        let alpha = p * q / (p + q);
        let pq = P - Q;

        let [eab_x, eab_y, eab_z] = GTO::hermite_tables(a, b);
        let [ecd_x, ecd_y, ecd_z] = GTO::hermite_tables(c, d);

        let val: f64 = iproduct!(
            0..eab_x.len(),
            0..eab_y.len(),
            0..eab_z.len(),
            0..ecd_x.len(),
            0..ecd_y.len(),
            0..ecd_z.len()
        )
        .map(|(t, u, v, tau, nu, phi)| {
            let sign = if (tau + nu + phi) % 2 == 0 { 1.0 } else { -1.0 };
            let hermite = GTO::hermite_coulomb(
                (t + tau) as i32,
                (u + nu) as i32,
                (v + phi) as i32,
                0,
                alpha,
                &pq,
            );
            eab_x[t] * eab_y[u] * eab_z[v] * ecd_x[tau] * ecd_y[nu] * ecd_z[phi] * sign * hermite
        })
        .sum();

        a.norm * b.norm * c.norm * d.norm * val * 2.0 * PI.powf(2.5) / (p * q * (p + q).sqrt())
    }
}
