//! Resampling utilities used to build ensemble members.

pub mod bootstrap;

pub use bootstrap::{bootstrap_sample, BootstrapSample, BootstrapSampler};
