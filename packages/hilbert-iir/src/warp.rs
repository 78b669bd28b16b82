//! The "squinch": maps the symmetric low-pass onto the positive-frequency
//! band used by the Hilbert filter.
//!
//! Every zero and pole goes through the same three steps:
//!
//! 1. `z - iπ`
//! 2. `z / (1 + i·squinch·z)`
//! 3. `z·K + i(2π + offset)` with `K = 1 + 2π·squinch`
//!
//! The rational map in step 2 compresses high frequencies, sharpening the DC
//! transition at the expense of the upper band edge. The gain is not touched
//! here; the direct term is corrected with the same `K` after decomposition.

use crate::config::{validate_warp, DesignConfig};
use crate::error::{DesignError, Result};
use crate::types::Zpk;
use num_complex::Complex64;
use std::f64::consts::PI;

/// `K = 1 + 2π·squinch`, the scale of step 3 and of the direct-term correction.
pub fn warp_scale(squinch: f64) -> f64 {
    1.0 + 2.0 * PI * squinch
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralWarp {
    squinch: f64,
    offset: f64,
    scale: f64,
}

impl SpectralWarp {
    pub fn new(squinch: f64, offset: f64) -> Result<Self> {
        validate_warp(squinch, offset)?;
        Ok(Self {
            squinch,
            offset,
            scale: warp_scale(squinch),
        })
    }

    pub fn from_config(config: &DesignConfig) -> Result<Self> {
        Self::new(config.squinch, config.offset)
    }

    /// `K`, computed once at construction
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn squinch(&self) -> f64 {
        self.squinch
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Map a single root.
    pub fn map_root(&self, root: Complex64) -> Complex64 {
        let i = Complex64::i();
        let centred = root - i * PI;
        let squinched = centred / (1.0 + i * self.squinch * centred);
        squinched * self.scale + i * (2.0 * PI + self.offset)
    }

    /// Warp every zero and pole; the gain is left as is.
    pub fn apply(&self, zpk: &Zpk) -> Result<Zpk> {
        let warped = zpk.map_roots(|r| self.map_root(r));
        if !warped.all_finite() {
            return Err(DesignError::numerical(
                "spectral warp",
                format!(
                    "a root landed on the pole of the squinch map (squinch {})",
                    self.squinch
                ),
            ));
        }
        log::debug!(
            "warped {} zeros and {} poles with K = {}",
            warped.zeros.len(),
            warped.poles.len(),
            self.scale
        );
        Ok(warped)
    }
}

/// Convenience wrapper: build the warp and apply it in one go.
pub fn warp(zpk: &Zpk, squinch: f64, offset: f64) -> Result<Zpk> {
    SpectralWarp::new(squinch, offset)?.apply(zpk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_identity_squinch_is_pure_shift() {
        let warp = SpectralWarp::new(0.0, 0.01).unwrap();
        assert_eq!(warp.scale(), 1.0);
        let mapped = warp.map_root(c(-0.3, 1.0));
        // (z - iπ) + 2πi + 0.01i = z + (π + 0.01)i
        assert!((mapped - c(-0.3, 1.0 + PI + 0.01)).norm() < 1e-14);
    }

    #[test]
    fn test_imaginary_axis_maps_to_imaginary_axis() {
        let warp = SpectralWarp::new(0.5, 0.01).unwrap();
        for w in [-10.0, -PI, -1.0, 0.0, 1.0, PI, 4.0] {
            let mapped = warp.map_root(c(0.0, w));
            assert!(mapped.re.abs() < 1e-12, "w = {}: {}", w, mapped);
        }
    }

    #[test]
    fn test_passband_edges_land_on_offset_and_two_pi() {
        let warp = SpectralWarp::new(0.5, 0.01).unwrap();
        let upper = warp.map_root(c(0.0, PI));
        let lower = warp.map_root(c(0.0, -PI));
        assert!((upper.im - (2.0 * PI + 0.01)).abs() < 1e-12);
        assert!((lower.im - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_zeros_and_poles_share_transform() {
        let root = c(-0.2, 0.7);
        let zpk = Zpk {
            zeros: vec![root],
            poles: vec![root],
            gain: 3.0,
        };
        let warped = warp(&zpk, 0.5, 0.01).unwrap();
        assert_eq!(warped.zeros[0], warped.poles[0]);
        assert_eq!(warped.gain, 3.0);
    }

    #[test]
    fn test_root_on_map_singularity_is_fatal() {
        // 1 + i·s·(z - iπ) = 0  =>  z = iπ + i/s
        let squinch = 0.5;
        let singular = c(0.0, PI + 1.0 / squinch);
        let zpk = Zpk {
            zeros: vec![],
            poles: vec![singular],
            gain: 1.0,
        };
        let err = warp(&zpk, squinch, 0.01).unwrap_err();
        assert!(matches!(err, DesignError::NumericalConsistency { .. }));
    }

    #[test]
    fn test_rejects_non_positive_offset() {
        assert!(SpectralWarp::new(0.5, 0.0).unwrap_err().is_config_error());
    }
}
