//! Fixed design constants for the Hilbert IIR table.
//!
//! Edit the constants below to regenerate the table for a different design.
//! Everything downstream is a pure function of [`DesignConfig`].

use crate::error::{DesignError, Result};
use crate::warp;
use serde::{Deserialize, Serialize};

/// Elliptic prototype order (also the size of the emitted table)
pub const FILTER_ORDER: usize = 12;
/// Passband ripple in dB
pub const FILTER_RIPPLE_DB: f64 = 0.5;
/// Stopband attenuation in dB
pub const FILTER_STOP_DB: f64 = 90.0;
/// Squinch factor: trades the upper band edge for a sharper DC transition
pub const FILTER_SQUINCH: f64 = 0.5;
/// Moves the lower cutoff slightly above 0
pub const FILTER_OFFSET: f64 = 0.01;

/// Two poles closer than this (absolute distance) are treated as one repeated pole
pub const POLE_TOLERANCE: f64 = 1e-3;

/// Immutable configuration for one generation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignConfig {
    pub order: usize,
    pub ripple_db: f64,
    pub stopband_db: f64,
    pub squinch: f64,
    pub offset: f64,
    #[serde(default = "default_pole_tolerance")]
    pub pole_tolerance: f64,
}

fn default_pole_tolerance() -> f64 {
    POLE_TOLERANCE
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            order: FILTER_ORDER,
            ripple_db: FILTER_RIPPLE_DB,
            stopband_db: FILTER_STOP_DB,
            squinch: FILTER_SQUINCH,
            offset: FILTER_OFFSET,
            pole_tolerance: POLE_TOLERANCE,
        }
    }
}

impl DesignConfig {
    pub fn new(order: usize, ripple_db: f64, stopband_db: f64, squinch: f64, offset: f64) -> Self {
        Self {
            order,
            ripple_db,
            stopband_db,
            squinch,
            offset,
            pole_tolerance: POLE_TOLERANCE,
        }
    }

    pub fn with_squinch(mut self, squinch: f64) -> Self {
        self.squinch = squinch;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_pole_tolerance(mut self, tolerance: f64) -> Self {
        self.pole_tolerance = tolerance;
        self
    }

    /// The warp scale `K = 1 + 2π·squinch`.
    pub fn warp_scale(&self) -> f64 {
        warp::warp_scale(self.squinch)
    }

    /// Check every parameter before any numerical work is done
    pub fn validate(&self) -> Result<()> {
        validate_prototype(self.order, self.ripple_db, self.stopband_db)?;

        validate_warp(self.squinch, self.offset)?;
        if !self.pole_tolerance.is_finite() || self.pole_tolerance <= 0.0 {
            return Err(DesignError::config(
                "pole_tolerance",
                format!("must be strictly positive, got {}", self.pole_tolerance),
            ));
        }
        Ok(())
    }
}

/// Parameter checks shared with the standalone prototype designer.
pub(crate) fn validate_prototype(order: usize, ripple_db: f64, stopband_db: f64) -> Result<()> {
    if order < 1 {
        return Err(DesignError::config("order", "must be at least 1"));
    }
    if !ripple_db.is_finite() || ripple_db <= 0.0 {
        return Err(DesignError::config(
            "ripple_db",
            format!("must be positive, got {}", ripple_db),
        ));
    }
    if !stopband_db.is_finite() || stopband_db <= ripple_db {
        return Err(DesignError::config(
            "stopband_db",
            format!(
                "must exceed ripple_db ({}), got {}",
                ripple_db, stopband_db
            ),
        ));
    }
    Ok(())
}

/// Squinch and offset checks, shared with [`warp::SpectralWarp::new`].
pub(crate) fn validate_warp(squinch: f64, offset: f64) -> Result<()> {
    if !squinch.is_finite() || squinch < 0.0 {
        return Err(DesignError::config(
            "squinch",
            format!("must be finite and non-negative, got {}", squinch),
        ));
    }
    if !offset.is_finite() || offset <= 0.0 {
        return Err(DesignError::config(
            "offset",
            format!("must be strictly positive, got {}", offset),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_default_is_valid() {
        let config = DesignConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.order, 12);
    }

    #[test]
    fn test_warp_scale() {
        let config = DesignConfig::default();
        assert!((config.warp_scale() - (1.0 + PI)).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_zero_order() {
        let err = DesignConfig::new(0, 0.5, 90.0, 0.5, 0.01).validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("order"));
    }

    #[test]
    fn test_rejects_bad_ripple_and_stopband() {
        let err = DesignConfig::new(4, 0.0, 90.0, 0.5, 0.01).validate().unwrap_err();
        assert!(err.to_string().contains("ripple_db"));

        let err = DesignConfig::new(4, 3.0, 3.0, 0.5, 0.01).validate().unwrap_err();
        assert!(err.to_string().contains("stopband_db"));
    }

    #[test]
    fn test_rejects_non_positive_offset() {
        for offset in [0.0, -0.01, f64::NAN] {
            let err = DesignConfig::default().with_offset(offset).validate().unwrap_err();
            assert!(err.to_string().contains("offset"), "offset {offset}");
        }
    }

    #[test]
    fn test_warp_scale_matches_spectral_warp() {
        for squinch in [0.0, 0.25, 0.5, 2.0] {
            let config = DesignConfig::default().with_squinch(squinch);
            let warp = warp::SpectralWarp::from_config(&config).unwrap();
            assert_eq!(config.warp_scale(), warp.scale());
        }
    }

    #[test]
    fn test_config_and_warp_reject_the_same_values() {
        for (squinch, offset) in [(-0.5, 0.01), (f64::INFINITY, 0.01), (0.5, 0.0), (0.5, f64::NAN)] {
            let config = DesignConfig::default().with_squinch(squinch).with_offset(offset);
            let from_config = config.validate().unwrap_err();
            let from_warp = warp::SpectralWarp::new(squinch, offset).unwrap_err();
            assert_eq!(from_config, from_warp);
        }
    }

    #[test]
    fn test_serde_fills_default_tolerance() {
        let json = r#"{"order":4,"ripple_db":1.0,"stopband_db":40.0,"squinch":0.5,"offset":0.01}"#;
        let config: DesignConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.pole_tolerance, POLE_TOLERANCE);
    }
}
