//! Partial-fraction expansion of a rational function with simple poles.

use crate::error::{DesignError, Result};
use crate::polynomial::{polyval, roots, sort_by_modulus, trim_leading_zeros};
use crate::types::{HilbertCoefficients, PartialFractions, TransferFunction};
use num_complex::Complex64;

/// Residue scaling for the analytic-signal convention of the consumer
pub const RESIDUE_SCALE: f64 = 0.5;

/// Imaginary part allowed on the direct term, relative to its magnitude
pub const DIRECT_IMAG_TOLERANCE: f64 = 1e-9;

/// Decompose `numerator / denominator` into `Σ rᵢ/(s - pᵢ) + direct`.
///
/// Poles come back sorted by increasing modulus. Any two poles closer than
/// `pole_tolerance` make the simple-pole formula meaningless and are rejected.
pub fn decompose(
    numerator: &[Complex64],
    denominator: &[Complex64],
    pole_tolerance: f64,
) -> Result<PartialFractions> {
    let a = trim_leading_zeros(denominator);
    if a.is_empty() {
        return Err(DesignError::numerical(
            "partial fractions",
            "denominator is identically zero",
        ));
    }
    let b = trim_leading_zeros(numerator);
    let den_degree = a.len() - 1;

    let mut poles = roots(a)?;
    sort_by_modulus(&mut poles);
    check_simple_poles(&poles, pole_tolerance)?;

    if b.is_empty() {
        return Ok(PartialFractions {
            residues: vec![Complex64::new(0.0, 0.0); poles.len()],
            poles,
            direct: None,
        });
    }

    let num_degree = b.len() - 1;
    if num_degree > den_degree {
        return Err(DesignError::ImproperRational {
            numerator: num_degree,
            denominator: den_degree,
        });
    }

    // One long-division step when the degrees match
    let (remainder, direct) = if num_degree == den_degree {
        let quotient = b[0] / a[0];
        let remainder: Vec<Complex64> = b[1..]
            .iter()
            .zip(&a[1..])
            .map(|(bi, ai)| bi - quotient * ai)
            .collect();
        (remainder, Some(quotient))
    } else {
        (b.to_vec(), None)
    };

    let residues = poles
        .iter()
        .enumerate()
        .map(|(i, &pole)| {
            let others: Complex64 = poles
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &other)| pole - other)
                .product();
            polyval(&remainder, pole) / (a[0] * others)
        })
        .collect();

    log::debug!(
        "decomposed degree-{} / degree-{} into {} simple poles (direct term: {})",
        num_degree,
        den_degree,
        poles.len(),
        direct.is_some()
    );

    Ok(PartialFractions {
        residues,
        poles,
        direct,
    })
}

fn check_simple_poles(poles: &[Complex64], tolerance: f64) -> Result<()> {
    for (i, &first) in poles.iter().enumerate() {
        for &second in &poles[i + 1..] {
            let distance = (first - second).norm();
            if distance <= tolerance {
                return Err(DesignError::NonSimplePole {
                    first: first.to_string(),
                    second: second.to_string(),
                    distance,
                    tolerance,
                });
            }
        }
    }
    Ok(())
}

impl TransferFunction {
    pub fn decompose(&self, pole_tolerance: f64) -> Result<PartialFractions> {
        decompose(&self.numerator, &self.denominator, pole_tolerance)
    }
}

impl PartialFractions {
    /// Apply the consumer's fixed normalization: residues × 0.5, direct × 2K.
    ///
    /// `warp_scale` must be the same `K` the spectral warp used. The direct
    /// term has to be real; an absent direct term (odd orders) becomes 0.
    pub fn into_hilbert(self, warp_scale: f64) -> Result<HilbertCoefficients> {
        let direct = self.direct.unwrap_or_default() * (2.0 * warp_scale);
        if direct.im.abs() > DIRECT_IMAG_TOLERANCE * direct.norm() {
            return Err(DesignError::numerical(
                "partial fractions",
                format!("direct term {} is not real", direct),
            ));
        }

        let coefficients = HilbertCoefficients {
            order: self.poles.len(),
            residues: self
                .residues
                .iter()
                .map(|r| r * RESIDUE_SCALE)
                .collect(),
            poles: self.poles,
            direct: direct.re,
        };
        if !coefficients.all_finite() {
            return Err(DesignError::numerical(
                "partial fractions",
                "non-finite residue, pole or direct term",
            ));
        }
        Ok(coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn real(values: &[f64]) -> Vec<Complex64> {
        values.iter().map(|&v| c(v, 0.0)).collect()
    }

    #[test]
    fn test_two_real_poles() {
        // 1 / ((s + 1)(s + 2)) = 1/(s + 1) - 1/(s + 2)
        let pf = decompose(&real(&[1.0]), &real(&[1.0, 3.0, 2.0]), 1e-3).unwrap();
        assert_eq!(pf.poles.len(), 2);
        assert!(pf.direct.is_none());
        assert!((pf.poles[0] - c(-1.0, 0.0)).norm() < 1e-12);
        assert!((pf.residues[0] - c(1.0, 0.0)).norm() < 1e-12);
        assert!((pf.poles[1] - c(-2.0, 0.0)).norm() < 1e-12);
        assert!((pf.residues[1] - c(-1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_equal_degree_extracts_direct_term() {
        // (2s + 3) / (s + 1) = 2 + 1/(s + 1)
        let pf = decompose(&real(&[2.0, 3.0]), &real(&[1.0, 1.0]), 1e-3).unwrap();
        assert_eq!(pf.direct, Some(c(2.0, 0.0)));
        assert!((pf.residues[0] - c(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_non_monic_denominator() {
        // 1 / (2s + 4) = 0.5 / (s + 2)
        let pf = decompose(&real(&[1.0]), &real(&[2.0, 4.0]), 1e-3).unwrap();
        assert!((pf.residues[0] - c(0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_complex_poles_round_trip() {
        let num = vec![c(0.5, -1.0), c(2.0, 0.25), c(-1.0, 0.0)];
        let den = crate::polynomial::poly_from_roots(&[
            c(-0.1, 1.0),
            c(-0.3, -2.0),
            c(-1.0, 0.5),
        ]);
        let tf = TransferFunction {
            numerator: num,
            denominator: den,
        };
        let pf = tf.decompose(1e-3).unwrap();
        for k in 0..20 {
            let s = c(0.0, -4.0 + 0.4 * k as f64);
            let want = tf.evaluate(s);
            let got = pf.evaluate(s);
            assert!((got - want).norm() <= 1e-9 * want.norm(), "s = {}", s);
        }
    }

    #[test]
    fn test_repeated_pole_is_rejected() {
        // (s - 1)^2
        let err = decompose(&real(&[1.0]), &real(&[1.0, -2.0, 1.0]), 1e-3).unwrap_err();
        assert!(matches!(err, DesignError::NonSimplePole { .. }), "{}", err);
        assert!(err.to_string().contains("Non-simple pole"));
    }

    #[test]
    fn test_improper_rational_is_rejected() {
        let err = decompose(&real(&[1.0, 0.0, 0.0]), &real(&[1.0, 1.0]), 1e-3).unwrap_err();
        assert_eq!(
            err,
            DesignError::ImproperRational {
                numerator: 2,
                denominator: 1
            }
        );
    }

    #[test]
    fn test_zero_numerator_has_zero_residues() {
        let pf = decompose(&real(&[0.0]), &real(&[1.0, 1.0]), 1e-3).unwrap();
        assert_eq!(pf.residues, vec![c(0.0, 0.0)]);
        assert!(pf.direct.is_none());
    }

    #[test]
    fn test_into_hilbert_scaling() {
        let pf = PartialFractions {
            residues: vec![c(2.0, -4.0)],
            poles: vec![c(-1.0, 1.0)],
            direct: Some(c(0.25, 0.0)),
        };
        let k = 3.0;
        let coeffs = pf.into_hilbert(k).unwrap();
        assert_eq!(coeffs.order, 1);
        assert_eq!(coeffs.residues, vec![c(1.0, -2.0)]);
        assert_eq!(coeffs.poles, vec![c(-1.0, 1.0)]);
        assert_eq!(coeffs.direct, 1.5);
        assert_eq!(coeffs.emitted_residues().collect::<Vec<_>>(), vec![c(2.0, -4.0)]);
    }

    #[test]
    fn test_into_hilbert_rejects_complex_direct() {
        let pf = PartialFractions {
            residues: vec![c(1.0, 0.0)],
            poles: vec![c(-1.0, 0.0)],
            direct: Some(c(1.0, 0.5)),
        };
        assert!(matches!(
            pf.into_hilbert(2.0),
            Err(DesignError::NumericalConsistency { .. })
        ));
    }

    #[test]
    fn test_into_hilbert_without_direct_is_zero() {
        let pf = PartialFractions {
            residues: vec![c(1.0, 0.0)],
            poles: vec![c(-1.0, 0.0)],
            direct: None,
        };
        assert_eq!(pf.into_hilbert(2.0).unwrap().direct, 0.0);
    }
}
