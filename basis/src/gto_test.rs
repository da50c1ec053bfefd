#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use crate::basis::Basis;
    use crate::gto::{GTO1d, GTO};
    use crate::helper::*;
    use libm::erf;
    use nalgebra::Vector3;
    use rand::Rng;
    use rand_distr::Normal;
    use std::f64::consts::PI;

    fn random_gto(max_l: i32) -> GTO {
        let mut rng = rand::thread_rng();
        let dist = Normal::new(0.0, 0.7).unwrap();
        let center = Vector3::<f64>::from_distribution(&dist, &mut rng);
        let l_xyz = Vector3::new(
            rng.gen_range(0..=max_l),
            rng.gen_range(0..=max_l),
            rng.gen_range(0..=max_l),
        );
        GTO::new(rng.gen_range(0.4..2.0), l_xyz, center)
    }

    #[test]
    fn test_gto1d_normalization() {
        for l in 0..=4 {
            let gto = GTO1d::new(1.3, l, 0.5);
            let integral = simpson_integration(|x| gto.evaluate(x).powi(2), -10.0, 10.0, 10_000);
            assert!(
                (integral - 1.0).abs() < 1e-8,
                "l = {}: integral is not close to 1: got {}",
                l,
                integral
            );
        }
    }

    #[test]
    fn test_gto1d_overlap() {
        let gto1 = GTO1d::new(1.2, 1, 1.0);
        let gto2 = GTO1d::new(0.8, 2, 2.5);

        let integral =
            simpson_integration(|x| gto1.evaluate(x) * gto2.evaluate(x), -10.0, 10.0, 10_000);
        let overlap = GTO1d::Sab(&gto1, &gto2);
        assert!(
            (integral - overlap).abs() < 1e-8,
            "Overlap {} is not close to integral {}",
            overlap,
            integral
        );
    }

    #[test]
    fn test_gto1d_derivative() {
        let gto = GTO1d::new(0.9, 2, -0.3);
        let h: f64 = 1e-5;
        for &x in &[-1.2, 0.0, 0.4, 1.7] {
            let numerical = (gto.evaluate(x + h) - gto.evaluate(x - h)) / (2.0 * h);
            let analytical = gto.derivative(x);
            assert!(
                (numerical - analytical).abs() < 1e-8,
                "Derivative mismatch at {}: numerical = {}, analytical = {}",
                x,
                numerical,
                analytical
            );
        }
    }

    #[test]
    fn test_gto1d_laplacian() {
        let h: f64 = 1e-4;
        for l in 0..=3 {
            let gto = GTO1d::new(0.8, l, 1.0);
            let x: f64 = 1.6;
            let numerical =
                (gto.evaluate(x + h) - 2.0 * gto.evaluate(x) + gto.evaluate(x - h)) / h.powi(2);
            let analytical = gto.laplacian(x);
            assert!(
                (numerical - analytical).abs() < 1e-5,
                "l = {}: Laplacian mismatch: numerical = {}, analytical = {}",
                l,
                numerical,
                analytical
            );
        }
    }

    fn check_gto1d_kinetic(alpha1: f64, l1: i32, center1: f64, alpha2: f64, l2: i32, center2: f64) {
        let gto1 = GTO1d::new(alpha1, l1, center1);
        let gto2 = GTO1d::new(alpha2, l2, center2);

        let integrand = |x: f64| -0.5 * gto1.evaluate(x) * gto2.laplacian(x);
        let integral = simpson_integration(integrand, -12.0, 12.0, 20_000);
        let kinetic = GTO1d::Tab(&gto1, &gto2);

        assert!(
            (integral - kinetic).abs() < 1e-7,
            "Kinetic integral {} differs from quadrature {}, \
             params: alpha1={}, l1={}, center1={}, alpha2={}, l2={}, center2={}",
            kinetic,
            integral,
            alpha1,
            l1,
            center1,
            alpha2,
            l2,
            center2
        );
    }

    #[test]
    fn test_gto1d_kinetic_with_params() {
        check_gto1d_kinetic(1.2, 0, 0.0, 0.8, 0, 1.0);
        check_gto1d_kinetic(1.2, 1, 0.0, 0.8, 0, 1.0);
        check_gto1d_kinetic(0.5, 2, -0.5, 1.1, 1, 0.7);
        check_gto1d_kinetic(0.9, 3, 0.2, 0.6, 2, -0.4);
    }

    #[test]
    fn test_hermite_expansion_out_of_range() {
        let (qx, a, b): (f64, f64, f64) = (0.3, 1.0, 0.7);
        assert_eq!(GTO1d::hermite_expansion(-1, 0, 0, qx, a, b), 0.0);
        assert_eq!(GTO1d::hermite_expansion(0, -1, 0, qx, a, b), 0.0);
        assert_eq!(GTO1d::hermite_expansion(0, 0, -1, qx, a, b), 0.0);
        assert_eq!(GTO1d::hermite_expansion(1, 1, 3, qx, a, b), 0.0);
    }

    #[test]
    fn test_hermite_expansion_base_case() {
        let (qx, a, b): (f64, f64, f64) = (0.3, 1.0, 0.7);
        let expected = (-(a * b / (a + b)) * qx * qx).exp();
        assert!((GTO1d::hermite_expansion(0, 0, 0, qx, a, b) - expected).abs() < 1e-15);
        // E_{i+j}^{ij} = 1 / (2p)^(i+j)
        let top = GTO1d::hermite_expansion(1, 1, 2, qx, a, b);
        assert!((top - expected / (2.0 * (a + b)).powi(2)).abs() < 1e-14);
    }

    #[test]
    fn test_gto_normalization() {
        let gto = GTO::new(1.0, Vector3::new(1, 1, 1), Vector3::new(0.0, 0.0, 0.0));
        let integrand = |r: &Vector3<f64>| gto.evaluate(r).powi(2);

        let lower = Vector3::new(-8.0, -8.0, -8.0);
        let upper = Vector3::new(8.0, 8.0, 8.0);
        let integral = simpson_integration_3d(integrand, lower, upper, 80);
        assert!(
            (integral - 1.0).abs() < 1e-6,
            "Integral is not close to 1: got {}",
            integral
        );
        assert!((GTO::Sab(&gto, &gto) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gto_overlap() {
        let gto1 = GTO::new(1.2, Vector3::new(1, 0, 1), Vector3::new(0.0, 0.0, 0.0));
        let gto2 = GTO::new(0.8, Vector3::new(0, 1, 1), Vector3::new(0.5, -0.4, 0.8));
        let integrand = |r: &Vector3<f64>| gto1.evaluate(r) * gto2.evaluate(r);

        let lower = Vector3::new(-8.0, -8.0, -8.0);
        let upper = Vector3::new(8.0, 8.0, 8.0);
        let integral = simpson_integration_3d(integrand, lower, upper, 80);
        let overlap = GTO::Sab(&gto1, &gto2);
        assert!(
            (integral - overlap).abs() < 1e-6,
            "Overlap {} is not close to integral {}",
            overlap,
            integral
        );
    }

    #[test]
    fn test_gto_normalization_random() {
        for _ in 0..10 {
            let gto = random_gto(3);
            let s = GTO::Sab(&gto, &gto);
            assert!((s - 1.0).abs() < 1e-10, "self overlap {} for {:?}", s, gto);
        }
    }

    #[test]
    fn test_gto_gradient() {
        let gto = GTO::new(0.9, Vector3::new(1, 2, 0), Vector3::new(0.1, -0.2, 0.3));
        let r: Vector3<f64> = Vector3::new(0.7, 0.4, -0.5);
        let h: f64 = 1e-6;

        let analytical = gto.gradient(&r);
        for k in 0..3 {
            let mut dr = Vector3::<f64>::zeros();
            dr[k] = h;
            let numerical = (gto.evaluate(&(r + dr)) - gto.evaluate(&(r - dr))) / (2.0 * h);
            assert!(
                (numerical - analytical[k]).abs() < 1e-8,
                "Gradient component {} mismatch: numerical = {}, analytical = {}",
                k,
                numerical,
                analytical[k]
            );
        }
    }

    #[test]
    fn test_gto_laplacian() {
        let gto = GTO::new(1.1, Vector3::new(1, 0, 2), Vector3::new(0.0, 0.2, -0.1));
        let r: Vector3<f64> = Vector3::new(0.3, -0.6, 0.5);
        let h: f64 = 1e-4;

        let numerical: f64 = (0..3)
            .map(|k| {
                let mut dr = Vector3::<f64>::zeros();
                dr[k] = h;
                (gto.evaluate(&(r + dr)) - 2.0 * gto.evaluate(&r) + gto.evaluate(&(r - dr)))
                    / h.powi(2)
            })
            .sum();
        let analytical = gto.laplacian(&r);
        assert!(
            (numerical - analytical).abs() < 1e-5,
            "Laplacian mismatch: numerical = {}, analytical = {}",
            numerical,
            analytical
        );
    }

    #[test]
    fn test_gto_kinetic_s_same_center() {
        // <g|-1/2 nabla^2|g> = 3 alpha / 2 for a normalized s Gaussian
        let alpha = 1.3;
        let gto = GTO::new(alpha, Vector3::new(0, 0, 0), Vector3::new(0.2, 0.1, 0.0));
        let kinetic = GTO::Tab(&gto, &gto);
        assert!((kinetic - 1.5 * alpha).abs() < 1e-12, "got {}", kinetic);
    }

    #[test]
    fn test_gto_kinetic_symmetric() {
        for _ in 0..10 {
            let a = random_gto(2);
            let b = random_gto(2);
            let tab = GTO::Tab(&a, &b);
            let tba = GTO::Tab(&b, &a);
            assert!(
                (tab - tba).abs() < 1e-10,
                "Kinetic integral is not symmetric: {} vs {}",
                tab,
                tba
            );
        }
    }

    #[test]
    fn test_kinetic_energy_positive() {
        let s = GTO::new(1.0, Vector3::new(0, 0, 0), Vector3::zeros());
        let p = GTO::new(0.7, Vector3::new(1, 0, 0), Vector3::zeros());
        assert!(GTO::Tab(&s, &s) > 0.0);
        assert!(GTO::Tab(&p, &p) > 0.0);
    }

    #[test]
    fn test_vab_on_center() {
        // <g|1/r|g> = 2 sqrt(2 alpha / pi) with the nucleus on the center
        let alpha = 0.8;
        let Z = 2;
        let center = Vector3::new(0.3, -0.1, 0.4);
        let gto = GTO::new(alpha, Vector3::new(0, 0, 0), center);
        let val = GTO::Vab(&gto, &gto, center, Z);
        let expected = -(Z as f64) * 2.0 * (2.0 * alpha / PI).sqrt();
        assert!((val - expected).abs() < 1e-10, "got {}, expected {}", val, expected);
    }

    #[test]
    fn test_vab_off_center() {
        // g^2 is a normalized charge with exponent 2 alpha, whose potential
        // at distance D is erf(sqrt(2 alpha) D) / D
        let alpha = 0.7;
        let D = 1.5;
        let gto = GTO::new(alpha, Vector3::new(0, 0, 0), Vector3::zeros());
        let val = GTO::Vab(&gto, &gto, Vector3::new(0.0, D, 0.0), 1);
        let expected = -erf((2.0 * alpha).sqrt() * D) / D;
        assert!((val - expected).abs() < 1e-10, "got {}, expected {}", val, expected);
    }

    #[test]
    fn test_vab_symmetric() {
        for _ in 0..5 {
            let a = random_gto(2);
            let b = random_gto(2);
            let R = Vector3::new(0.2, 0.5, -0.3);
            let vab = GTO::Vab(&a, &b, R, 3);
            let vba = GTO::Vab(&b, &a, R, 3);
            assert!((vab - vba).abs() < 1e-10, "Vab is not symmetric: {} vs {}", vab, vba);
        }
    }

    #[test]
    fn test_vab_against_numerical() {
        let a = GTO::new(1.1, Vector3::new(1, 0, 0), Vector3::new(0.0, 0.0, 0.0));
        let b = GTO::new(0.9, Vector3::new(1, 0, 0), Vector3::new(0.0, 0.0, 0.5));
        // nucleus away from the grid nodes
        let R = Vector3::new(0.013, 0.021, 3.017);

        let integrand = |r: &Vector3<f64>| -a.evaluate(r) * b.evaluate(r) / (r - R).norm();
        let lower = Vector3::new(-6.0, -6.0, -6.0);
        let upper = Vector3::new(6.0, 6.0, 6.0);
        let numerical = simpson_integration_3d(integrand, lower, upper, 120);
        let analytical = GTO::Vab(&a, &b, R, 1);
        assert!(
            (numerical - analytical).abs() < 1e-3,
            "Vab = {}, quadrature = {}",
            analytical,
            numerical
        );
    }

    #[test]
    fn test_jkabcd_same_center() {
        // (gg|gg) = 2 sqrt(alpha / pi) for four identical normalized s Gaussians
        let alpha = 1.0;
        let g = GTO::new(alpha, Vector3::new(0, 0, 0), Vector3::zeros());
        let val = GTO::JKabcd(&g, &g, &g, &g);
        let expected = 2.0 * (alpha / PI).sqrt();
        assert!((val - expected).abs() < 1e-10, "got {}, expected {}", val, expected);
    }

    #[test]
    fn test_jkabcd_separated_charges() {
        let (alpha, beta, D) = (0.9, 0.6, 1.2);
        let a = GTO::new(alpha, Vector3::new(0, 0, 0), Vector3::zeros());
        let b = GTO::new(beta, Vector3::new(0, 0, 0), Vector3::new(D, 0.0, 0.0));
        let val = GTO::JKabcd(&a, &a, &b, &b);

        let gamma = (2.0 * alpha) * (2.0 * beta) / (2.0 * alpha + 2.0 * beta);
        let expected = erf(gamma.sqrt() * D) / D;
        assert!((val - expected).abs() < 1e-10, "got {}, expected {}", val, expected);
    }

    #[test]
    fn test_jkabcd_permutational_symmetry() {
        let a = GTO::new(1.0, Vector3::new(1, 0, 0), Vector3::new(0.0, 0.0, 0.0));
        let b = GTO::new(0.7, Vector3::new(0, 1, 0), Vector3::new(0.5, 0.0, 0.2));
        let c = GTO::new(0.9, Vector3::new(0, 0, 1), Vector3::new(-0.3, 0.4, 0.0));
        let d = GTO::new(1.2, Vector3::new(1, 1, 0), Vector3::new(0.1, -0.2, 0.6));

        let abcd = GTO::JKabcd(&a, &b, &c, &d);
        for (label, val) in [
            ("(ba|cd)", GTO::JKabcd(&b, &a, &c, &d)),
            ("(ab|dc)", GTO::JKabcd(&a, &b, &d, &c)),
            ("(cd|ab)", GTO::JKabcd(&c, &d, &a, &b)),
            ("(dc|ba)", GTO::JKabcd(&d, &c, &b, &a)),
        ] {
            assert!(
                (abcd - val).abs() < 1e-10,
                "{} = {} differs from (ab|cd) = {}",
                label,
                val,
                abcd
            );
        }
    }

    #[test]
    fn test_two_electron_repulsion_positive() {
        for _ in 0..5 {
            let a = random_gto(1);
            let b = random_gto(1);
            let val = GTO::JKabcd(&a, &b, &a, &b);
            assert!(val > 0.0, "(ab|ab) should be positive, got {}", val);
        }
    }
}
