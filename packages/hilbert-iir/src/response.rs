//! Reference model of the real-time consumer of the coefficient table.
//!
//! The table is continuous-time; the consumer discretizes it per sample rate
//! with a frequency factor `min(0.46, 20000 / sample_rate)` so the designed
//! band always ends at 20 kHz (or 0.46 of the sample rate below 43.5 kHz).
//! Each branch is a one-pole complex recurrence
//! `state ← state·exp(pole·f) + x·coeff·f`, and the output is
//! `x·direct + Σ state`.

use crate::error::{DesignError, Result};
use crate::types::HilbertCoefficients;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Upper edge of the designed band, in Hz
pub const BAND_EDGE_HZ: f64 = 20_000.0;

/// Upper limit on the frequency factor at low sample rates
pub const MAX_FREQ_FACTOR: f64 = 0.46;

pub const DEFAULT_SAMPLE_RATES: &[f64] = &[44_100.0, 48_000.0, 96_000.0, 192_000.0];

/// Discretized Hilbert filter, one channel
#[derive(Debug, Clone)]
pub struct DiscreteHilbert {
    sample_rate: f64,
    freq_factor: f64,
    weights: Vec<Complex64>,
    poles: Vec<Complex64>,
    direct: f64,
    state: Vec<Complex64>,
}

impl DiscreteHilbert {
    pub fn new(coefficients: &HilbertCoefficients, sample_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(DesignError::config(
                "sample_rate",
                format!("must be positive, got {}", sample_rate),
            ));
        }
        let freq_factor = MAX_FREQ_FACTOR.min(BAND_EDGE_HZ / sample_rate);
        let weights = coefficients
            .emitted_residues()
            .map(|r| r * freq_factor)
            .collect();
        let poles = coefficients
            .poles
            .iter()
            .map(|p| (p * freq_factor).exp())
            .collect();

        Ok(Self {
            sample_rate,
            freq_factor,
            weights,
            poles,
            direct: coefficients.direct,
            state: vec![Complex64::new(0.0, 0.0); coefficients.order],
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn freq_factor(&self) -> f64 {
        self.freq_factor
    }

    /// Highest frequency (Hz) the design treats as passband at this rate.
    pub fn band_edge_hz(&self) -> f64 {
        self.freq_factor * self.sample_rate
    }

    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|s| *s = Complex64::new(0.0, 0.0));
    }

    /// Process one real sample into one analytic (complex) sample.
    pub fn process(&mut self, x: f64) -> Complex64 {
        let mut out = Complex64::new(x * self.direct, 0.0);
        for ((state, &pole), &weight) in self.state.iter_mut().zip(&self.poles).zip(&self.weights) {
            *state = *state * pole + weight * x;
            out += *state;
        }
        out
    }

    /// First `len` output samples for a unit impulse, starting from rest.
    /// Leaves the filter reset afterwards.
    pub fn impulse_response(&mut self, len: usize) -> Vec<Complex64> {
        self.reset();
        let response = (0..len)
            .map(|n| self.process(if n == 0 { 1.0 } else { 0.0 }))
            .collect();
        self.reset();
        response
    }

    /// Closed-form response `direct + Σ wᵢ / (1 - qᵢ e^{-jω})` at a signed
    /// frequency in Hz. Negative frequencies are the ones a Hilbert filter rejects.
    pub fn frequency_response(&self, freq_hz: f64) -> Complex64 {
        let omega = 2.0 * PI * freq_hz / self.sample_rate;
        let z_inv = Complex64::new(0.0, -omega).exp();
        let branches: Complex64 = self
            .weights
            .iter()
            .zip(&self.poles)
            .map(|(w, q)| w / (1.0 - q * z_inv))
            .sum();
        branches + self.direct
    }
}

/// Band limits used for the response summary, in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseBand {
    pub low_hz: f64,
    /// Fraction of the per-rate band edge used as the upper limit
    pub high_fraction: f64,
    /// Number of log-spaced evaluation points per side
    pub points: usize,
}

impl Default for ResponseBand {
    fn default() -> Self {
        Self {
            low_hz: 200.0,
            high_fraction: 0.9,
            points: 400,
        }
    }
}

/// Gain statistics for one sample rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub sample_rate: f64,
    pub freq_factor: f64,
    pub low_hz: f64,
    pub high_hz: f64,
    /// Smallest positive-frequency gain in dB
    pub passband_min_db: f64,
    /// Largest positive-frequency gain in dB
    pub passband_max_db: f64,
    /// Largest negative-frequency gain in dB
    pub rejection_db: f64,
    /// Frequency (half of `low_hz`) probing the transition around DC
    pub transition_hz: f64,
    /// Gain at `+transition_hz` in dB
    pub transition_gain_db: f64,
    /// Gain at `-transition_hz` in dB
    pub transition_rejection_db: f64,
}

fn to_db(h: Complex64) -> f64 {
    20.0 * (h.norm() + 1e-30).log10()
}

pub fn summarize(
    coefficients: &HilbertCoefficients,
    sample_rate: f64,
    band: &ResponseBand,
) -> Result<ResponseSummary> {
    let filter = DiscreteHilbert::new(coefficients, sample_rate)?;
    let high_hz = filter.band_edge_hz() * band.high_fraction;
    if !(band.low_hz > 0.0 && band.low_hz < high_hz) {
        return Err(DesignError::config(
            "low_hz",
            format!("must lie in (0, {}), got {}", high_hz, band.low_hz),
        ));
    }
    if band.points < 2 {
        return Err(DesignError::config("points", "need at least 2 points"));
    }

    let ratio = (high_hz / band.low_hz).ln();
    let freqs: Vec<f64> = (0..band.points)
        .map(|i| band.low_hz * (ratio * i as f64 / (band.points - 1) as f64).exp())
        .collect();

    let positive: Vec<f64> = freqs
        .iter()
        .map(|&f| to_db(filter.frequency_response(f)))
        .collect();
    let rejection_db = freqs
        .iter()
        .map(|&f| to_db(filter.frequency_response(-f)))
        .fold(f64::NEG_INFINITY, f64::max);

    let transition_hz = band.low_hz / 2.0;
    let summary = ResponseSummary {
        sample_rate,
        freq_factor: filter.freq_factor(),
        low_hz: band.low_hz,
        high_hz,
        passband_min_db: positive.iter().copied().fold(f64::INFINITY, f64::min),
        passband_max_db: positive.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        rejection_db,
        transition_hz,
        transition_gain_db: to_db(filter.frequency_response(transition_hz)),
        transition_rejection_db: to_db(filter.frequency_response(-transition_hz)),
    };
    log::debug!("response at {} Hz: {:?}", sample_rate, summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pole() -> HilbertCoefficients {
        HilbertCoefficients {
            order: 1,
            residues: vec![Complex64::new(0.5, 0.0)],
            poles: vec![Complex64::new(-1.0, 0.0)],
            direct: 0.25,
        }
    }

    #[test]
    fn test_freq_factor_caps_at_low_rates() {
        let coeffs = single_pole();
        let low = DiscreteHilbert::new(&coeffs, 32_000.0).unwrap();
        assert_eq!(low.freq_factor(), MAX_FREQ_FACTOR);
        let high = DiscreteHilbert::new(&coeffs, 96_000.0).unwrap();
        assert!((high.freq_factor() - 20_000.0 / 96_000.0).abs() < 1e-15);
        assert!((high.band_edge_hz() - 20_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_impulse_response_matches_recurrence() {
        let coeffs = single_pole();
        let mut filter = DiscreteHilbert::new(&coeffs, 48_000.0).unwrap();
        let f = filter.freq_factor();
        let w = 1.0 * f;
        let q = (-f).exp();

        let y0 = filter.process(1.0);
        assert!((y0.re - (0.25 + w)).abs() < 1e-15);
        for n in 1..10 {
            let y = filter.process(0.0);
            assert!((y.re - w * q.powi(n)).abs() < 1e-15);
            assert_eq!(y.im, 0.0);
        }

        filter.reset();
        assert!((filter.process(1.0).re - y0.re).abs() < 1e-15);
    }

    #[test]
    fn test_frequency_response_is_transform_of_impulse() {
        let coeffs = single_pole();
        let mut filter = DiscreteHilbert::new(&coeffs, 48_000.0).unwrap();
        let freq = 3_000.0;
        let omega = 2.0 * PI * freq / 48_000.0;
        let mut dft = Complex64::new(0.0, 0.0);
        for n in 0..4000 {
            let y = filter.process(if n == 0 { 1.0 } else { 0.0 });
            dft += y * Complex64::new(0.0, -omega * n as f64).exp();
        }
        assert!((dft - filter.frequency_response(freq)).norm() < 1e-9);
    }

    #[test]
    fn test_impulse_response_starts_from_rest() {
        let coeffs = single_pole();
        let mut filter = DiscreteHilbert::new(&coeffs, 48_000.0).unwrap();
        filter.process(5.0);
        let first = filter.impulse_response(100);
        let second = filter.impulse_response(100);
        assert_eq!(first.len(), 100);
        assert_eq!(first, second);

        let f = filter.freq_factor();
        assert!((first[0].re - (0.25 + f)).abs() < 1e-15);
        assert!((first[99].re - f * (-99.0 * f).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_summary_reports_transition_at_half_low_edge() {
        let coeffs = single_pole();
        let band = ResponseBand::default();
        let summary = summarize(&coeffs, 48_000.0, &band).unwrap();
        let filter = DiscreteHilbert::new(&coeffs, 48_000.0).unwrap();

        assert_eq!(summary.transition_hz, 100.0);
        assert_eq!(
            summary.transition_gain_db,
            to_db(filter.frequency_response(100.0))
        );
        assert_eq!(
            summary.transition_rejection_db,
            to_db(filter.frequency_response(-100.0))
        );
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        assert!(DiscreteHilbert::new(&single_pole(), 0.0).is_err());
    }

    #[test]
    fn test_summary_rejects_inverted_band() {
        let band = ResponseBand {
            low_hz: 30_000.0,
            ..ResponseBand::default()
        };
        assert!(summarize(&single_pole(), 48_000.0, &band).is_err());
    }
}
