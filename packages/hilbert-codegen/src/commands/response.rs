use crate::cli::ResponseArgs;
use crate::exit_codes;
use crate::output;
use anyhow::{Context, Result};
use hilbert_iir::response::DEFAULT_SAMPLE_RATES;
use hilbert_iir::{design_coefficients, summarize, DesignConfig, ResponseBand, ResponseSummary};

pub fn execute(args: ResponseArgs) -> i32 {
    let summaries = match run(&args) {
        Ok(s) => s,
        Err(e) => return super::fail(e),
    };

    if args.json {
        if let Err(e) =
            output::to_json(&summaries).and_then(|json| output::write_output(&json, None))
        {
            return super::fail(e);
        }
    } else {
        println!(
            "  {:<10} {:<8} {:<18} {:<22} {:<16} {:<16}",
            "Rate (Hz)", "Factor", "Band (Hz)", "Passband (dB)", "Rejection (dB)", "Near DC (dB)"
        );
        println!("  {}", "-".repeat(92));
        for s in &summaries {
            println!(
                "  {:<10} {:<8.4} {:<18} {:<22} {:<16.2} {:<16}",
                s.sample_rate,
                s.freq_factor,
                format!("{:.0}-{:.0}", s.low_hz, s.high_hz),
                format!("{:+.3} .. {:+.3}", s.passband_min_db, s.passband_max_db),
                s.rejection_db,
                format!(
                    "{:+.2} / {:.1}",
                    s.transition_gain_db, s.transition_rejection_db
                )
            );
        }
    }

    exit_codes::SUCCESS
}

fn run(args: &ResponseArgs) -> Result<Vec<ResponseSummary>> {
    let coefficients =
        design_coefficients(&DesignConfig::default()).context("Failed to design the filter")?;
    let band = ResponseBand {
        low_hz: args.low_hz,
        points: args.points,
        ..ResponseBand::default()
    };
    let rates: &[f64] = if args.sample_rates.is_empty() {
        DEFAULT_SAMPLE_RATES
    } else {
        &args.sample_rates
    };

    rates
        .iter()
        .map(|&rate| {
            summarize(&coefficients, rate, &band)
                .with_context(|| format!("Failed to evaluate response at {} Hz", rate))
        })
        .collect()
}
