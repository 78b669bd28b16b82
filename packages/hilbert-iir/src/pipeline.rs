//! Designer → warp → converter → decomposer, as one pure function of the
//! configuration.

use crate::config::DesignConfig;
use crate::elliptic;
use crate::error::{DesignError, Result};
use crate::transfer::to_transfer_function;
use crate::types::{HilbertCoefficients, PartialFractions, TransferFunction, Zpk};
use crate::warp::SpectralWarp;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Largest relative deviation allowed between the partial fractions and the
/// warped zero-pole-gain form on the passband
pub const ROUND_TRIP_TOLERANCE: f64 = 1e-9;

/// Passband frequencies sampled by the round-trip check
pub const ROUND_TRIP_POINTS: usize = 24;

/// Every intermediate product of one run, for inspection and testing
#[derive(Debug, Clone)]
pub struct DesignStages {
    pub config: DesignConfig,
    pub prototype: Zpk,
    pub warped: Zpk,
    pub transfer_function: TransferFunction,
    pub partial_fractions: PartialFractions,
    /// The `K` shared by the warp and the direct-term correction
    pub warp_scale: f64,
}

/// Run the full pipeline and keep the intermediate stages.
pub fn run_stages(config: &DesignConfig) -> Result<DesignStages> {
    config.validate()?;
    log::info!(
        "designing order-{} elliptic ({} dB ripple, {} dB stopband), squinch {}, offset {}",
        config.order,
        config.ripple_db,
        config.stopband_db,
        config.squinch,
        config.offset
    );

    let prototype = elliptic::design(config.order, config.ripple_db, config.stopband_db)?;
    check_prototype_real(&prototype)?;
    let warp = SpectralWarp::from_config(config)?;
    let warped = warp.apply(&prototype)?;
    let transfer_function = to_transfer_function(&warped)?;
    let partial_fractions = transfer_function.decompose(config.pole_tolerance)?;
    check_round_trip(&warped, &partial_fractions, warp.offset())?;

    Ok(DesignStages {
        config: *config,
        prototype,
        warped,
        transfer_function,
        partial_fractions,
        warp_scale: warp.scale(),
    })
}

/// The unwarped prototype is a real filter: its polynomial form must have
/// real coefficients.
pub fn check_prototype_real(prototype: &Zpk) -> Result<()> {
    to_transfer_function(prototype)?.real_coefficients()?;
    Ok(())
}

/// Compare the partial fractions with the exact warped roots on the passband
/// `s = iω`, `ω ∈ (offset, offset + 2π)`, and return the worst relative error.
///
/// Precision lost in the polynomial route (it grows quickly with the order)
/// shows up here before it reaches the table.
pub fn check_round_trip(
    warped: &Zpk,
    partial_fractions: &PartialFractions,
    offset: f64,
) -> Result<f64> {
    let mut worst = 0.0_f64;
    for k in 0..ROUND_TRIP_POINTS {
        let omega = offset + 2.0 * PI * (k as f64 + 0.5) / ROUND_TRIP_POINTS as f64;
        let s = Complex64::new(0.0, omega);
        let want = warped.evaluate(s);
        let got = partial_fractions.evaluate(s);
        let error = (got - want).norm() / want.norm();
        if error.is_nan() || error > ROUND_TRIP_TOLERANCE {
            return Err(DesignError::numerical(
                "partial fractions",
                format!(
                    "expansion deviates from the warped filter by {:e} at ω = {} (tolerance {:e})",
                    error, omega, ROUND_TRIP_TOLERANCE
                ),
            ));
        }
        worst = worst.max(error);
    }
    log::debug!("partial fractions round trip: worst relative error {:e}", worst);
    Ok(worst)
}

impl DesignStages {
    pub fn into_coefficients(self) -> Result<HilbertCoefficients> {
        self.partial_fractions.into_hilbert(self.warp_scale)
    }
}

/// Compute the coefficient table for `config`.
pub fn design_coefficients(config: &DesignConfig) -> Result<HilbertCoefficients> {
    let coefficients = run_stages(config)?.into_coefficients()?;
    log::info!(
        "coefficient table ready: {} poles, direct term {:e}",
        coefficients.order,
        coefficients.direct
    );
    Ok(coefficients)
}
