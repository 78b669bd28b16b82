use crate::cli::ConfigArgs;
use crate::exit_codes;
use crate::output;
use hilbert_iir::DesignConfig;
use serde::Serialize;

#[derive(Serialize)]
struct ConfigReport {
    #[serde(flatten)]
    config: DesignConfig,
    warp_scale: f64,
}

pub fn execute(args: ConfigArgs) -> i32 {
    let config = DesignConfig::default();
    let report = ConfigReport {
        config,
        warp_scale: config.warp_scale(),
    };

    if args.json {
        if let Err(e) = output::to_json(&report).and_then(|json| output::write_output(&json, None)) {
            return super::fail(e);
        }
    } else {
        println!("Hilbert IIR design parameters:\n");
        println!("  {:<18} {}", "order", config.order);
        println!("  {:<18} {} dB", "passband ripple", config.ripple_db);
        println!("  {:<18} {} dB", "stopband", config.stopband_db);
        println!("  {:<18} {}", "squinch", config.squinch);
        println!("  {:<18} {}", "offset", config.offset);
        println!("  {:<18} {:e}", "pole tolerance", config.pole_tolerance);
        println!("  {:<18} {}", "warp scale K", report.warp_scale);
    }

    exit_codes::SUCCESS
}
