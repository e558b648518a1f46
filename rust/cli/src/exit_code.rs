//! Exit codes returned by [`crate::run`].

use crate::error::CliError;

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code.
pub const ERROR: i32 = 2;

/// The user stopped the command before it finished.
pub const INTERRUPTED: i32 = 130;

pub fn for_error(error: &CliError) -> i32 {
    match error {
        CliError::Interrupted(_) => INTERRUPTED,
        _ => ERROR,
    }
}
