pub mod config;
pub mod generate;
pub mod response;

use crate::exit_codes;

/// Report a failed command on stderr and pick its exit code.
fn fail(err: anyhow::Error) -> i32 {
    eprintln!("Error: {:#}", err);
    exit_codes::for_error(&err)
}
