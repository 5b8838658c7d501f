//! Core infrastructure: fundamental types, defaults, errors and the learner
//! capability traits everything else is built on.
//!
//! - [`types`]: numeric aliases and enumerations
//! - [`constants`]: configuration defaults
//! - [`error`]: [`BaggingError`] and [`Result`]
//! - [`traits`]: [`Regressor`], [`LearnerFactory`] and [`Transformer`]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{BaggingError, Result};
pub use traits::*;
pub use types::*;

use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Install the `env_logger` backend for the `log` facade.
///
/// The default filter is `info`; `RUST_LOG` overrides it. Calling this more
/// than once, or after another logger was installed, has no effect.
pub fn initialize_logging() {
    LOGGING_INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        if env_logger::Builder::from_env(env).try_init().is_ok() {
            log::debug!("Logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_logging_is_idempotent() {
        initialize_logging();
        initialize_logging();
    }

    #[test]
    fn test_constants() {
        assert!(DEFAULT_N_ESTIMATORS >= 1);
        assert!(DEFAULT_MIN_SAMPLES_SPLIT >= 2);
        assert!((EXPECTED_UNIQUE_FRACTION - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }
}
