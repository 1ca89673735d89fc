use std::fmt::Display;
use std::panic::Location;

/// Unwraps a setup-time result, logging the failure with the caller's
/// location instead of propagating it.
///
/// Use for steps whose failure should degrade rendering rather than abort
/// the program.
#[track_caller]
pub fn checked<T, E: Display>(what: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            let loc = Location::caller();
            log::error!("{what} failed at {}:{}: {e}", loc.file(), loc.line());
            None
        }
    }
}
