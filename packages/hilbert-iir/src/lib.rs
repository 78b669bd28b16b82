//! Hilbert IIR design pipeline
//!
//! Designs an analog elliptic low-pass, warps it onto the positive-frequency
//! band ("squinch"), and expands the result into one-pole complex branches.
//! The resulting poles, residues and direct term form the coefficient table of
//! a real-time Hilbert (analytic signal) filter.

pub mod config;
pub mod elliptic;
pub mod error;
pub mod pipeline;
pub mod polynomial;
pub mod residue;
pub mod response;
pub mod special;
pub mod transfer;
pub mod types;
pub mod warp;

pub use config::*;
pub use error::{DesignError, Result};
pub use pipeline::{design_coefficients, run_stages, DesignStages};
pub use residue::decompose;
pub use response::{summarize, DiscreteHilbert, ResponseBand, ResponseSummary};
pub use transfer::to_transfer_function;
pub use types::*;
pub use warp::{warp, SpectralWarp};

pub use num_complex::Complex64;
