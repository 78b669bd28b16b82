use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("Invalid configuration: {parameter} {reason}")]
    InvalidConfig {
        parameter: &'static str,
        reason: String,
    },

    #[error("Numerical consistency failure in {stage}: {detail}")]
    NumericalConsistency { stage: &'static str, detail: String },

    #[error("Non-simple pole: poles {first} and {second} are {distance:e} apart (tolerance {tolerance:e})")]
    NonSimplePole {
        first: String,
        second: String,
        distance: f64,
        tolerance: f64,
    },

    #[error("Improper rational function: numerator degree {numerator} exceeds denominator degree {denominator}")]
    ImproperRational { numerator: usize, denominator: usize },

    #[error("Root finding failed: {0}")]
    RootFinding(String),

    #[error("Elliptic synthesis failed: {0}")]
    Synthesis(String),
}

impl DesignError {
    pub(crate) fn config(parameter: &'static str, reason: impl Into<String>) -> Self {
        DesignError::InvalidConfig {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn numerical(stage: &'static str, detail: impl Into<String>) -> Self {
        DesignError::NumericalConsistency {
            stage,
            detail: detail.into(),
        }
    }

    /// True for errors caused by the configuration rather than by the numerics.
    pub fn is_config_error(&self) -> bool {
        matches!(self, DesignError::InvalidConfig { .. })
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;
