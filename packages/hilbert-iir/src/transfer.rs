//! Zero-pole-gain to polynomial (transfer function) form.

use crate::error::{DesignError, Result};
use crate::polynomial::{degree, poly_from_roots, polyval};
use crate::types::{TransferFunction, Zpk};
use num_complex::Complex64;

/// Imaginary parts below this, relative to the largest coefficient, count as zero
pub const REAL_TOLERANCE: f64 = 1e-9;

/// Expand `gain · Π(s - zᵢ) / Π(s - pᵢ)` into coefficient form.
pub fn to_transfer_function(zpk: &Zpk) -> Result<TransferFunction> {
    let numerator: Vec<Complex64> = poly_from_roots(&zpk.zeros)
        .into_iter()
        .map(|c| c * zpk.gain)
        .collect();
    let denominator = poly_from_roots(&zpk.poles);

    let tf = TransferFunction {
        numerator,
        denominator,
    };
    if let Some(bad) = tf
        .numerator
        .iter()
        .chain(&tf.denominator)
        .find(|c| !c.is_finite())
    {
        return Err(DesignError::numerical(
            "transfer function",
            format!("non-finite coefficient {}", bad),
        ));
    }

    log::debug!(
        "transfer function: numerator degree {}, denominator degree {}",
        tf.numerator.len() - 1,
        tf.denominator.len() - 1
    );
    Ok(tf)
}

impl TransferFunction {
    pub fn numerator_degree(&self) -> Option<usize> {
        degree(&self.numerator)
    }

    pub fn denominator_degree(&self) -> Option<usize> {
        degree(&self.denominator)
    }

    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        polyval(&self.numerator, s) / polyval(&self.denominator, s)
    }

    /// Real coefficient view. Fails if any coefficient carries an imaginary
    /// part above [`REAL_TOLERANCE`] relative to the largest coefficient of
    /// its polynomial.
    pub fn real_coefficients(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        Ok((
            real_parts(&self.numerator, "numerator")?,
            real_parts(&self.denominator, "denominator")?,
        ))
    }
}

fn real_parts(coeffs: &[Complex64], which: &str) -> Result<Vec<f64>> {
    let scale = coeffs.iter().map(|c| c.norm()).fold(0.0, f64::max);
    for (i, c) in coeffs.iter().enumerate() {
        if c.im.abs() > REAL_TOLERANCE * scale {
            return Err(DesignError::numerical(
                "transfer function",
                format!(
                    "{} coefficient {} has imaginary part {:e} (scale {:e})",
                    which, i, c.im, scale
                ),
            ));
        }
    }
    Ok(coeffs.iter().map(|c| c.re).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elliptic;
    use crate::warp::warp;

    #[test]
    fn test_gain_scales_numerator_only() {
        let zpk = Zpk {
            zeros: vec![Complex64::new(-1.0, 0.0)],
            poles: vec![Complex64::new(-2.0, 0.0), Complex64::new(-3.0, 0.0)],
            gain: 4.0,
        };
        let tf = to_transfer_function(&zpk).unwrap();
        let (b, a) = tf.real_coefficients().unwrap();
        assert_eq!(b, vec![4.0, 4.0]);
        assert_eq!(a, vec![1.0, 5.0, 6.0]);
    }

    #[test]
    fn test_matches_zpk_evaluation() {
        let zpk = elliptic::design(5, 1.0, 40.0).unwrap();
        let tf = to_transfer_function(&zpk).unwrap();
        for w in [0.0, 0.5, 2.0, 3.0, 7.5] {
            let s = Complex64::new(0.0, w);
            let expected = zpk.evaluate(s);
            assert!((tf.evaluate(s) - expected).norm() <= 1e-10 * expected.norm().max(1e-4));
        }
    }

    #[test]
    fn test_prototype_coefficients_are_real() {
        let zpk = elliptic::design(12, 0.5, 90.0).unwrap();
        let tf = to_transfer_function(&zpk).unwrap();
        let (b, a) = tf.real_coefficients().unwrap();
        assert_eq!(b.len(), 13);
        assert_eq!(a.len(), 13);
    }

    #[test]
    fn test_warped_coefficients_are_complex() {
        // The warp shifts roots along the imaginary axis, so conjugate symmetry is gone
        let zpk = elliptic::design(4, 0.5, 60.0).unwrap();
        let warped = warp(&zpk, 0.5, 0.01).unwrap();
        let tf = to_transfer_function(&warped).unwrap();
        assert!(matches!(
            tf.real_coefficients(),
            Err(DesignError::NumericalConsistency { .. })
        ));
    }

    #[test]
    fn test_non_finite_gain_is_fatal() {
        let zpk = Zpk {
            zeros: vec![],
            poles: vec![Complex64::new(-1.0, 0.0)],
            gain: f64::NAN,
        };
        assert!(matches!(
            to_transfer_function(&zpk),
            Err(DesignError::NumericalConsistency { .. })
        ));
    }
}
