use hilbert_iir::DesignError;

pub const SUCCESS: i32 = 0;
pub const EXECUTION_ERROR: i32 = 1;
pub const CONFIG_ERROR: i32 = 2;
pub const NUMERICAL_ERROR: i32 = 3;

/// Exit code for a failed command: design failures map to their category,
/// anything else (I/O, templates, serialization) is an execution error.
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<DesignError>() {
        Some(e) if e.is_config_error() => CONFIG_ERROR,
        Some(_) => NUMERICAL_ERROR,
        None => EXECUTION_ERROR,
    }
}
