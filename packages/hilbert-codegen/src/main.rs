use clap::Parser;

mod cli;
mod commands;
mod emit;
mod exit_codes;
mod output;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let exit_code = match cli.command {
        None => commands::generate::execute(cli::GenerateArgs::default()),
        Some(cli::Command::Generate(args)) => commands::generate::execute(args),
        Some(cli::Command::Response(args)) => commands::response::execute(args),
        Some(cli::Command::Config(args)) => commands::config::execute(args),
    };

    std::process::exit(exit_code);
}
