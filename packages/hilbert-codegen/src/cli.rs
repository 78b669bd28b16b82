use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "hilbert-codegen",
    version,
    about = "Hilbert IIR coefficient table generator",
    long_about = "Design the continuous-time Hilbert IIR filter (elliptic prototype, squinch warp,\n\
                  partial fractions) and write the HilbertIIRCoeffs C++ table.\n\
                  With no subcommand the table is printed to stdout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the coefficient table (default)
    Generate(GenerateArgs),
    /// Evaluate the table through the discrete real-time model
    Response(ResponseArgs),
    /// Show the fixed design parameters
    Config(ConfigArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// C++ `HilbertIIRCoeffs` struct
    #[default]
    Cpp,
    /// JSON document with the same values
    Json,
}

#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Cpp)]
    pub format: OutputFormat,

    /// Design and render, but only log what would be written
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ResponseArgs {
    /// Sample rates in Hz (default: 44100 48000 96000 192000)
    #[arg(long = "sample-rate", num_args = 1..)]
    pub sample_rates: Vec<f64>,

    /// Lower edge of the evaluated band in Hz
    #[arg(long, default_value_t = 200.0)]
    pub low_hz: f64,

    /// Number of evaluation points per side
    #[arg(long, default_value_t = 400)]
    pub points: usize,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["hilbert-codegen"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_generate_json_format() {
        let cli =
            Cli::try_parse_from(["hilbert-codegen", "generate", "--format", "json", "-vv"]).unwrap();
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.output.is_none());
            }
            _ => panic!("expected generate"),
        }
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_response_sample_rates() {
        let cli = Cli::try_parse_from([
            "hilbert-codegen",
            "response",
            "--sample-rate",
            "44100",
            "96000",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Response(args)) => {
                assert_eq!(args.sample_rates, vec![44_100.0, 96_000.0]);
                assert_eq!(args.points, 400);
            }
            _ => panic!("expected response"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["hilbert-codegen", "generate", "--format", "yaml"]).is_err());
    }
}
