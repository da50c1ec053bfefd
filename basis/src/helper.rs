use libm::erf;
use nalgebra::Vector3;

// Simpson's rule integration
pub fn simpson_integration<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;

    let interior: f64 = (1..n)
        .map(|i| simpson_weight(i, n) * f(a + i as f64 * h))
        .sum();
    (f(a) + f(b) + interior) * h / 3.0
}

fn simpson_weight(i: usize, n: usize) -> f64 {
    if i == 0 || i == n {
        1.0
    } else if i % 2 == 1 {
        4.0
    } else {
        2.0
    }
}

/// Simpson's rule over the box `[a.x,b.x] x [a.y,b.y] x [a.z,b.z]`.
///
/// `n` subdivisions per axis, rounded up to an even number. Used as the
/// numerical reference for the analytic integrals.
pub fn simpson_integration_3d<F>(f: F, a: Vector3<f64>, b: Vector3<f64>, n: usize) -> f64
where
    F: Fn(&Vector3<f64>) -> f64,
{
    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;

    let nodes: Vec<(f64, f64, f64, f64)> = (0..=n)
        .map(|i| {
            let t = i as f64;
            (a.x + t * h.x, a.y + t * h.y, a.z + t * h.z, simpson_weight(i, n))
        })
        .collect();

    let mut sum = 0.0;
    for &(x, _, _, wx) in &nodes {
        for &(_, y, _, wy) in &nodes {
            for &(_, _, z, wz) in &nodes {
                sum += wx * wy * wz * f(&Vector3::new(x, y, z));
            }
        }
    }

    // 1/27 = (1/3)^3 from the three Simpson factors
    sum * h.x * h.y * h.z / 27.0
}

const BOYS_MAX_ORDER: usize = 12;
// above this the upward recursion from F_0 is stable for every order
const BOYS_SERIES_LIMIT: f64 = 30.0;
const BOYS_SERIES_EPS: f64 = 1.0e-17;
const BOYS_SERIES_MAX_TERMS: usize = 500;
const SQRT_PI_OVER_2: f64 = 0.886226925452758014;

/// Boys function F_n(x) for n = 0..=12.
///
/// Small and moderate `x` sum the positive series
/// `F_n(x) = e^-x / 2 * sum_i x^i / ((n+1/2)(n+3/2)...(n+i+1/2))`;
/// large `x` starts from the erf closed form of F_0 and recurses upward.
pub fn boys_function(n: i32, x: f64) -> f64 {
    assert!(
        (0..=BOYS_MAX_ORDER as i32).contains(&n),
        "Boys order must be between 0 and {}, got {}",
        BOYS_MAX_ORDER,
        n
    );
    assert!(x >= 0.0, "Boys argument must be nonnegative, got {}", x);

    if x < BOYS_SERIES_LIMIT {
        return boys_series(n as usize, x);
    }

    let half_y = 0.5 * (-x).exp();
    let sx = x.sqrt();
    let mut val = SQRT_PI_OVER_2 * erf(sx) / sx;
    for k in 1..=n {
        val = ((k as f64 - 0.5) * val - half_y) / x;
    }
    val
}

fn boys_series(n: usize, x: f64) -> f64 {
    let half_y = 0.5 * (-x).exp();
    let mut b = n as f64 + 0.5;
    let mut term = 1.0 / b;
    let mut sum = term;
    for _ in 0..BOYS_SERIES_MAX_TERMS {
        b += 1.0;
        term *= x / b;
        sum += term;
        if term <= BOYS_SERIES_EPS * sum {
            break;
        }
    }
    half_y * sum
}
