//! Analog elliptic (Cauer) low-pass prototype in zero-pole-gain form.

use crate::config::validate_prototype;
use crate::error::{DesignError, Result};
use crate::special::{arc_jac_sc1, ellipdeg, ellipj, ellipk};
use crate::types::Zpk;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Passband edge of the designed low-pass, in rad/s. Aligned with the
/// half-sample-rate normalization of the consumer.
pub const PASSBAND_EDGE: f64 = PI;

/// Roots whose magnitude falls below this are treated as exactly zero
const EPSILON: f64 = 2e-16;

/// `10^x - 1` without cancellation for small `x`.
fn pow10m1(x: f64) -> f64 {
    (x * std::f64::consts::LN_10).exp_m1()
}

/// Elliptic low-pass with its passband edge at [`PASSBAND_EDGE`].
pub fn design(order: usize, ripple_db: f64, stopband_db: f64) -> Result<Zpk> {
    validate_prototype(order, ripple_db, stopband_db)?;
    let prototype = prototype(order, ripple_db, stopband_db)?;
    let zpk = prototype.scale_frequency(PASSBAND_EDGE);
    log::debug!(
        "elliptic order {}: {} zeros, {} poles, gain {:e}",
        order,
        zpk.zeros.len(),
        zpk.poles.len(),
        zpk.gain
    );
    Ok(zpk)
}

/// Normalized prototype with its passband edge at 1 rad/s.
pub fn prototype(order: usize, ripple_db: f64, stopband_db: f64) -> Result<Zpk> {
    validate_prototype(order, ripple_db, stopband_db)?;

    if order == 1 {
        let p = -(1.0 / pow10m1(0.1 * ripple_db)).sqrt();
        return Ok(Zpk {
            zeros: Vec::new(),
            poles: vec![Complex64::new(p, 0.0)],
            gain: -p,
        });
    }

    let eps_sq = pow10m1(0.1 * ripple_db);
    let eps = eps_sq.sqrt();
    let ck1_sq = eps_sq / pow10m1(0.1 * stopband_db);
    if ck1_sq == 0.0 {
        return Err(DesignError::Synthesis(format!(
            "ripple {} dB and stopband {} dB leave no discrimination",
            ripple_db, stopband_db
        )));
    }

    let k1 = ellipk(ck1_sq);
    let m = ellipdeg(order, ck1_sq);
    let capk = ellipk(m);
    log::trace!("discrimination {:e}, selectivity {}", ck1_sq, m);

    // Odd orders start at j = 0, which yields the real pole and no zero
    let jacobi: Vec<_> = (1 - order % 2..order)
        .step_by(2)
        .map(|j| ellipj(j as f64 * capk / order as f64, m))
        .collect();

    let mut zeros: Vec<Complex64> = jacobi
        .iter()
        .filter(|j| j.sn.abs() > EPSILON)
        .map(|j| Complex64::new(0.0, 1.0 / (m.sqrt() * j.sn)))
        .collect();
    let conjugates: Vec<Complex64> = zeros.iter().map(|z| z.conj()).collect();
    zeros.extend(conjugates);

    let r = arc_jac_sc1(1.0 / eps, ck1_sq)?;
    let v0 = capk * r / (order as f64 * k1);
    let shifted = ellipj(v0, 1.0 - m);

    let mut poles: Vec<Complex64> = jacobi
        .iter()
        .map(|j| {
            let numerator = Complex64::new(j.cn * j.dn * shifted.sn * shifted.cn, j.sn * shifted.dn);
            -numerator / (1.0 - (j.dn * shifted.sn).powi(2))
        })
        .collect();

    let conjugates: Vec<Complex64> = if order % 2 == 1 {
        let energy = poles.iter().map(|p| p.norm_sqr()).sum::<f64>().sqrt();
        poles
            .iter()
            .filter(|p| p.im.abs() > EPSILON * energy)
            .map(|p| p.conj())
            .collect()
    } else {
        poles.iter().map(|p| p.conj()).collect()
    };
    poles.extend(conjugates);

    let pole_product: Complex64 = poles.iter().map(|p| -p).product();
    let zero_product: Complex64 = zeros.iter().map(|z| -z).product();
    let mut gain = (pole_product / zero_product).re;
    if order % 2 == 0 {
        gain /= (1.0 + eps_sq).sqrt();
    }

    Ok(Zpk { zeros, poles, gain })
}
