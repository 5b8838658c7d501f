//! Base learners that can be bagged.
//!
//! Every learner implements [`Regressor`](crate::core::traits::Regressor),
//! rejects prediction before fitting and checks query width against the
//! training width.

pub mod linear;
pub mod mean;
pub mod pipeline;
pub mod tree;

pub use linear::LinearRegression;
pub use mean::MeanRegressor;
pub use pipeline::Pipeline;
pub use tree::{DecisionTreeConfig, DecisionTreeRegressor, TreeNode};
