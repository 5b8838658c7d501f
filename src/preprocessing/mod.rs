//! Feature preprocessing transformers.

pub mod scaler;

pub use scaler::{MinMaxScaler, StandardScaler, StandardScalerConfig};
