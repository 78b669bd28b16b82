//! Elliptic integrals and Jacobi elliptic functions used by the prototype
//! designer. All functions take the *parameter* `m = k²`, not the modulus.

use crate::error::{DesignError, Result};
use num_complex::Complex64;
use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, PI};

const MACHEP: f64 = 1.110_223_024_625_156_5e-16;

/// Terms of the nome series used to solve the degree equation
const ELLIPDEG_TERMS: i32 = 7;

/// Descending Landen transformations allowed before giving up
const LANDEN_MAX_ITER: usize = 10;

/// Arithmetic-geometric mean of two non-negative reals.
fn agm(mut a: f64, mut b: f64) -> f64 {
    for _ in 0..64 {
        if (a - b).abs() <= MACHEP * a {
            break;
        }
        let next_a = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = next_a;
    }
    a
}

/// Complete elliptic integral of the first kind, `K(m)`.
pub fn ellipk(m: f64) -> f64 {
    ellipkm1(1.0 - m)
}

/// `K(1 - p)`, accurate when `p` is tiny.
pub fn ellipkm1(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::INFINITY;
    }
    FRAC_PI_2 / agm(1.0, p.sqrt())
}

/// Jacobi elliptic functions at a real argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jacobi {
    pub sn: f64,
    pub cn: f64,
    pub dn: f64,
    /// Amplitude φ
    pub ph: f64,
}

/// Jacobi elliptic functions `sn`, `cn`, `dn` and amplitude, by the
/// descending AGM with small-`m` and near-unity-`m` expansions.
pub fn ellipj(u: f64, m: f64) -> Jacobi {
    if !(0.0..=1.0).contains(&m) || !u.is_finite() {
        return Jacobi {
            sn: f64::NAN,
            cn: f64::NAN,
            dn: f64::NAN,
            ph: f64::NAN,
        };
    }

    if m < 1.0e-9 {
        let t = u.sin();
        let b = u.cos();
        let ai = 0.25 * m * (u - t * b);
        return Jacobi {
            sn: t - ai * b,
            cn: b + ai * t,
            dn: 1.0 - 0.5 * m * t * t,
            ph: u - ai,
        };
    }

    if m >= 0.999_999_999_9 {
        let mut ai = 0.25 * (1.0 - m);
        let b = u.cosh();
        let t = u.tanh();
        let phi = 1.0 / b;
        let twon = b * u.sinh();
        let sn = t + ai * (twon - u) / (b * b);
        let ph = 2.0 * u.exp().atan() - FRAC_PI_2 + ai * (twon - u) / b;
        ai *= t * phi;
        return Jacobi {
            sn,
            cn: phi - ai * (twon - u),
            dn: phi + ai * (twon + u),
            ph,
        };
    }

    let mut a = [0.0f64; 9];
    let mut c = [0.0f64; 9];
    a[0] = 1.0;
    let mut b = (1.0 - m).sqrt();
    c[0] = m.sqrt();
    let mut twon = 1.0;
    let mut i = 0;

    while (c[i] / a[i]).abs() > MACHEP {
        if i > 7 {
            break;
        }
        let ai = a[i];
        i += 1;
        c[i] = 0.5 * (ai - b);
        let t = (ai * b).sqrt();
        a[i] = 0.5 * (ai + b);
        b = t;
        twon *= 2.0;
    }

    let mut phi = twon * a[i] * u;
    let mut prev = phi;
    while i > 0 {
        let t = c[i] * phi.sin() / a[i];
        prev = phi;
        phi = 0.5 * (t.asin() + phi);
        i -= 1;
    }

    let t = phi.cos();
    Jacobi {
        sn: phi.sin(),
        cn: t,
        dn: t / (phi - prev).cos(),
        ph: phi,
    }
}

/// Solve the degree equation: the selectivity parameter `m` of an order-`n`
/// elliptic filter whose discrimination parameter is `m1`.
pub fn ellipdeg(n: usize, m1: f64) -> f64 {
    let k1 = ellipk(m1);
    let k1p = ellipkm1(m1);
    let q1 = (-PI * k1p / k1).exp();
    let q = q1.powf(1.0 / n as f64);

    let num: f64 = (0..=ELLIPDEG_TERMS).map(|j| q.powi(j * (j + 1))).sum();
    let den: f64 = 1.0 + 2.0 * (1..=ELLIPDEG_TERMS + 1).map(|j| q.powi(j * j)).sum::<f64>();

    16.0 * q * (num / den).powi(4)
}

/// Inverse Jacobi `sn` for complex `w`, by descending Landen transformations.
pub fn arc_jac_sn(w: Complex64, m: f64) -> Result<Complex64> {
    let one = Complex64::new(1.0, 0.0);
    let complement = |kx: Complex64| ((one - kx) * (one + kx)).sqrt();

    let k = m.sqrt();
    if k.is_nan() || k > 1.0 {
        return Err(DesignError::Synthesis(format!(
            "inverse sn undefined for parameter m = {}",
            m
        )));
    }
    if k == 1.0 {
        return Ok(w.atanh());
    }

    let mut ks = vec![k];
    while let Some(&last) = ks.last() {
        if last == 0.0 {
            break;
        }
        if ks.len() > LANDEN_MAX_ITER {
            return Err(DesignError::Synthesis(
                "Landen transformation not converging".to_string(),
            ));
        }
        let kp = ((1.0 - last) * (1.0 + last)).sqrt();
        ks.push((1.0 - kp) / (1.0 + kp));
    }

    let capk = ks[1..].iter().map(|k| 1.0 + k).product::<f64>() * FRAC_PI_2;

    let mut wn = w;
    for pair in ks.windows(2) {
        let (kn, knext) = (pair[0], pair[1]);
        wn = 2.0 * wn / ((1.0 + knext) * (one + complement(kn * wn)));
    }

    Ok(capk * FRAC_2_PI * wn.asin())
}

/// Real inverse of Jacobi `sc`: `sc⁻¹(w, m) = Im sn⁻¹(i·w, m)`.
pub fn arc_jac_sc1(w: f64, m: f64) -> Result<f64> {
    let z = arc_jac_sn(Complex64::new(0.0, w), m)?;
    if z.re.abs() > 1e-14 {
        return Err(DesignError::Synthesis(format!(
            "inverse sc left the imaginary axis (real part {:e})",
            z.re
        )));
    }
    Ok(z.im)
}
