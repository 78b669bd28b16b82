//! Renders a `HilbertCoefficients` table as C++ or JSON.

use anyhow::{Context, Result};
use hilbert_iir::{Complex64, HilbertCoefficients};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context as TeraContext, Tera};

const TEMPLATE_NAME: &str = "hilbert_iir_coeffs.h";
const TEMPLATE_SOURCE: &str = include_str!("../templates/hilbert_iir_coeffs.h.tera");

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexEntry {
    pub re: f64,
    pub im: f64,
}

impl From<Complex64> for ComplexEntry {
    fn from(value: Complex64) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

/// The values exactly as they appear in the generated struct
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoefficientTable {
    pub order: usize,
    pub coeffs: Vec<ComplexEntry>,
    pub poles: Vec<ComplexEntry>,
    pub direct: f64,
}

impl From<&HilbertCoefficients> for CoefficientTable {
    fn from(coefficients: &HilbertCoefficients) -> Self {
        Self {
            order: coefficients.order,
            coeffs: coefficients.emitted_residues().map(ComplexEntry::from).collect(),
            poles: coefficients.poles.iter().copied().map(ComplexEntry::from).collect(),
            direct: coefficients.direct,
        }
    }
}

fn build_tera() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE_SOURCE)
        .with_context(|| format!("Failed to load template: {}", TEMPLATE_NAME))?;
    tera.register_filter("cpp_float", cpp_float_filter);
    Ok(tera)
}

pub fn render_cpp(table: &CoefficientTable) -> Result<String> {
    let tera = build_tera()?;
    let context = TeraContext::from_serialize(table).context("Failed to build template context")?;
    log::debug!("Rendering template: {}", TEMPLATE_NAME);
    tera.render(TEMPLATE_NAME, &context)
        .with_context(|| format!("Failed to render template: {}", TEMPLATE_NAME))
}

pub fn render_json(table: &CoefficientTable) -> Result<String> {
    crate::output::to_json(table)
}

/// Shortest representation that reads back to the same `f64`.
pub fn cpp_float(value: f64) -> String {
    format!("{:?}", value)
}

fn cpp_float_filter(
    value: &tera::Value,
    _: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    match value.as_f64() {
        Some(v) if v.is_finite() => Ok(tera::Value::String(cpp_float(v))),
        Some(v) => Err(format!("cpp_float filter got non-finite value {}", v).into()),
        None => Err("cpp_float filter expects a number".into()),
    }
}
