use crate::cli::{GenerateArgs, OutputFormat};
use crate::emit::{self, CoefficientTable};
use crate::exit_codes;
use crate::output;
use anyhow::{Context, Result};
use hilbert_iir::{design_coefficients, DesignConfig};

pub fn execute(args: GenerateArgs) -> i32 {
    match run(&args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => super::fail(e),
    }
}

fn run(args: &GenerateArgs) -> Result<()> {
    let config = DesignConfig::default();
    let coefficients = design_coefficients(&config).context("Failed to design the filter")?;
    let table = CoefficientTable::from(&coefficients);

    let rendered = match args.format {
        OutputFormat::Cpp => emit::render_cpp(&table)?,
        OutputFormat::Json => emit::render_json(&table)?,
    };

    if args.dry_run {
        let destination = args.output.as_deref().unwrap_or("stdout");
        log::info!("Would write {} bytes to {}", rendered.len(), destination);
        log::debug!("Content preview:\n{}", &rendered[..rendered.len().min(500)]);
        return Ok(());
    }

    output::write_output(&rendered, args.output.as_deref())?;
    if let Some(path) = &args.output {
        log::info!("Wrote order-{} table to {}", table.order, path);
    }
    Ok(())
}
