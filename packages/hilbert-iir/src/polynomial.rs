//! Complex polynomial helpers. Coefficients are stored highest degree first.

use crate::error::{DesignError, Result};
use nalgebra::DMatrix;
use num_complex::Complex64;

/// Maximum guarded Newton steps used to polish each eigenvalue root
const POLISH_STEPS: usize = 3;

/// Expand `Π(s - rᵢ)` into monic coefficients.
pub fn poly_from_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex64::new(1.0, 0.0));
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}

/// Horner evaluation.
pub fn polyval(coeffs: &[Complex64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}

pub fn polyder(coeffs: &[Complex64]) -> Vec<Complex64> {
    let degree = coeffs.len().saturating_sub(1);
    coeffs[..degree]
        .iter()
        .enumerate()
        .map(|(i, &c)| c * (degree - i) as f64)
        .collect()
}

/// Drop leading (highest-degree) zero coefficients.
pub fn trim_leading_zeros(coeffs: &[Complex64]) -> &[Complex64] {
    let first = coeffs
        .iter()
        .position(|c| c.re != 0.0 || c.im != 0.0)
        .unwrap_or(coeffs.len());
    &coeffs[first..]
}

/// Degree of a polynomial after trimming; `None` for the zero polynomial.
pub fn degree(coeffs: &[Complex64]) -> Option<usize> {
    let trimmed = trim_leading_zeros(coeffs);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.len() - 1)
    }
}

/// Roots of a polynomial from the eigenvalues of its companion matrix.
///
/// Trailing zero coefficients are returned as exact roots at the origin.
/// Each eigenvalue is then polished with Newton steps that are only kept
/// while they reduce the residual `|p(r)|`.
pub fn roots(coeffs: &[Complex64]) -> Result<Vec<Complex64>> {
    let trimmed = trim_leading_zeros(coeffs);
    if trimmed.is_empty() {
        return Err(DesignError::RootFinding(
            "polynomial is identically zero".to_string(),
        ));
    }
    if let Some(bad) = trimmed.iter().find(|c| !c.is_finite()) {
        return Err(DesignError::RootFinding(format!(
            "non-finite coefficient {}",
            bad
        )));
    }

    let nonzero_end = trimmed
        .iter()
        .rposition(|c| c.re != 0.0 || c.im != 0.0)
        .map(|i| i + 1)
        .unwrap_or(trimmed.len());
    let trailing_zeros = trimmed.len() - nonzero_end;
    let core = &trimmed[..nonzero_end];

    let n = core.len() - 1;
    let mut found = Vec::with_capacity(n + trailing_zeros);

    if n == 1 {
        found.push(-core[1] / core[0]);
    } else if n > 1 {
        let lead = core[0];
        let mut companion = DMatrix::<Complex64>::zeros(n, n);
        for j in 0..n {
            companion[(0, j)] = -core[j + 1] / lead;
        }
        for i in 1..n {
            companion[(i, i - 1)] = Complex64::new(1.0, 0.0);
        }

        let eigenvalues = companion.eigenvalues().ok_or_else(|| {
            DesignError::RootFinding(format!(
                "Schur decomposition of the degree-{} companion matrix did not converge",
                n
            ))
        })?;

        let derivative = polyder(core);
        found.extend(eigenvalues.iter().map(|&r| polish_root(core, &derivative, r)));
    }

    found.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(trailing_zeros));
    log::trace!("roots of degree-{} polynomial: {:?}", trimmed.len() - 1, found);
    Ok(found)
}

fn polish_root(coeffs: &[Complex64], derivative: &[Complex64], mut root: Complex64) -> Complex64 {
    let mut residual = polyval(coeffs, root).norm();
    for _ in 0..POLISH_STEPS {
        if residual == 0.0 {
            break;
        }
        let slope = polyval(derivative, root);
        if slope.norm() == 0.0 {
            break;
        }
        let candidate = root - polyval(coeffs, root) / slope;
        let candidate_residual = polyval(coeffs, candidate).norm();
        if candidate_residual.is_nan() || candidate_residual >= residual {
            break;
        }
        root = candidate;
        residual = candidate_residual;
    }
    root
}

/// Stable sort by increasing modulus.
pub fn sort_by_modulus(values: &mut [Complex64]) {
    values.sort_by(|a, b| a.norm().total_cmp(&b.norm()));
}
