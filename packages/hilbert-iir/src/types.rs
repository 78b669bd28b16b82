use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Zero-pole-gain representation: `gain · Π(s - zeros) / Π(s - poles)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zpk {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub gain: f64,
}

impl Zpk {
    /// Apply the same root transform to every zero and every pole, index by index.
    /// The gain is carried over unchanged.
    pub fn map_roots<F>(&self, transform: F) -> Zpk
    where
        F: Fn(Complex64) -> Complex64,
    {
        Zpk {
            zeros: self.zeros.iter().map(|&z| transform(z)).collect(),
            poles: self.poles.iter().map(|&p| transform(p)).collect(),
            gain: self.gain,
        }
    }

    /// Low-pass to low-pass frequency scaling: `H(s) → H(s / wo)`.
    pub fn scale_frequency(&self, wo: f64) -> Zpk {
        let relative_degree = self.relative_degree();
        let mut scaled = self.map_roots(|r| r * wo);
        scaled.gain = self.gain * wo.powi(relative_degree);
        scaled
    }

    /// Number of poles minus number of zeros
    pub fn relative_degree(&self) -> i32 {
        self.poles.len() as i32 - self.zeros.len() as i32
    }

    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        let num: Complex64 = self.zeros.iter().map(|z| s - z).product();
        let den: Complex64 = self.poles.iter().map(|p| s - p).product();
        self.gain * num / den
    }

    pub fn all_finite(&self) -> bool {
        self.gain.is_finite()
            && self.zeros.iter().all(|z| z.is_finite())
            && self.poles.iter().all(|p| p.is_finite())
    }
}

/// Rational function in polynomial form, coefficients highest degree first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    pub numerator: Vec<Complex64>,
    pub denominator: Vec<Complex64>,
}

/// `Σ residues[i] / (s - poles[i]) + direct`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialFractions {
    pub residues: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    /// Present only when numerator and denominator degrees are equal
    pub direct: Option<Complex64>,
}

impl PartialFractions {
    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        let sum: Complex64 = self
            .residues
            .iter()
            .zip(&self.poles)
            .map(|(r, p)| r / (s - p))
            .sum();
        sum + self.direct.unwrap_or_default()
    }
}

/// The coefficient table handed to the real-time filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HilbertCoefficients {
    pub order: usize,
    /// Residues after the 0.5 analytic-signal scaling
    pub residues: Vec<Complex64>,
    /// Poles in rad per (normalized) unit time, sorted by increasing modulus
    pub poles: Vec<Complex64>,
    /// Direct term after the `2K` correction
    pub direct: f64,
}

impl HilbertCoefficients {
    /// Residue weights as written into the table: both analytic halves, i.e.
    /// twice the scaled residue.
    pub fn emitted_residues(&self) -> impl Iterator<Item = Complex64> + '_ {
        self.residues.iter().map(|r| r * 2.0)
    }

    /// True if every value that ends up in the table is finite
    pub fn all_finite(&self) -> bool {
        self.direct.is_finite()
            && self.residues.iter().all(|r| r.is_finite())
            && self.poles.iter().all(|p| p.is_finite())
    }
}
