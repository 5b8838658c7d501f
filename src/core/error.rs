//! Error handling and error types for the bagging library.
//!
//! Every fallible operation returns [`Result`], and failures are surfaced to
//! the caller immediately. Nothing in the crate retries or masks an error,
//! so a failed build never leaves a partially fitted ensemble behind.

use std::io;
use thiserror::Error;

/// Main error type for the bagging library.
#[derive(Error, Debug)]
pub enum BaggingError {
    /// A dataset must contain at least one sample
    #[error("Invalid dataset size: {size} samples (need at least 1)")]
    InvalidDatasetSize {
        /// Number of samples that was provided
        size: usize,
    },

    /// A base learner failed while being built on its bootstrap sample
    #[error("Base learner {member} failed: {source}")]
    LearnerFitFailure {
        /// Position of the failing member in the ensemble
        member: usize,
        /// Error reported by the learner
        source: Box<BaggingError>,
    },

    /// Input shapes do not line up
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },

    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Offending value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Dataset content errors
    #[error("Dataset error: {message}")]
    Dataset {
        /// Error description
        message: String,
    },

    /// Training-related errors raised by learners and transformers
    #[error("Training error: {message}")]
    Training {
        /// Error description
        message: String,
    },

    /// Prediction errors
    #[error("Prediction error: {message}")]
    Prediction {
        /// Error description
        message: String,
    },

    /// A model or transformer was used before being fit
    #[error("{component} is not fitted")]
    NotFitted {
        /// Name of the unfitted component
        component: String,
    },

    /// Numerical computation errors (singular systems, NaN)
    #[error("Numerical error: {message}")]
    Numerical {
        /// Error description
        message: String,
    },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        /// Underlying I/O error
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using BaggingError
pub type Result<T> = std::result::Result<T, BaggingError>;

impl BaggingError {
    /// Create an invalid dataset size error
    pub fn invalid_dataset_size(size: usize) -> Self {
        BaggingError::InvalidDatasetSize { size }
    }

    /// Wrap a learner's error with the index of the member that produced it
    pub fn learner_fit_failure(member: usize, source: BaggingError) -> Self {
        BaggingError::LearnerFitFailure {
            member,
            source: Box::new(source),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        BaggingError::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        BaggingError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        BaggingError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        BaggingError::Dataset {
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training<S: Into<String>>(message: S) -> Self {
        BaggingError::Training {
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        BaggingError::Prediction {
            message: message.into(),
        }
    }

    /// Create a not-fitted error
    pub fn not_fitted<S: Into<String>>(component: S) -> Self {
        BaggingError::NotFitted {
            component: component.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical<S: Into<String>>(message: S) -> Self {
        BaggingError::Numerical {
            message: message.into(),
        }
    }

    /// Check if retrying with different data or randomness could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            BaggingError::InvalidDatasetSize { .. } => false,
            BaggingError::LearnerFitFailure { .. } => true,
            BaggingError::ShapeMismatch { .. } => false,
            BaggingError::Config { .. } => false,
            BaggingError::InvalidParameter { .. } => false,
            BaggingError::Dataset { .. } => false,
            BaggingError::Training { .. } => true,
            BaggingError::Prediction { .. } => true,
            BaggingError::NotFitted { .. } => false,
            BaggingError::Numerical { .. } => true,
            BaggingError::IO { .. } => false,
            BaggingError::Json { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            BaggingError::InvalidDatasetSize { .. } => "invalid_dataset_size",
            BaggingError::LearnerFitFailure { .. } => "learner_fit_failure",
            BaggingError::ShapeMismatch { .. } => "shape_mismatch",
            BaggingError::Config { .. } => "config",
            BaggingError::InvalidParameter { .. } => "invalid_parameter",
            BaggingError::Dataset { .. } => "dataset",
            BaggingError::Training { .. } => "training",
            BaggingError::Prediction { .. } => "prediction",
            BaggingError::NotFitted { .. } => "not_fitted",
            BaggingError::Numerical { .. } => "numerical",
            BaggingError::IO { .. } => "io",
            BaggingError::Json { .. } => "json",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::BaggingError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::BaggingError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! training_error {
    ($msg:expr) => {
        $crate::core::error::BaggingError::training($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::BaggingError::training(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
