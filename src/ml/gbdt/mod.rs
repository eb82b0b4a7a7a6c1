//! Gradient-boosted regression-tree classifier for binary failure prediction.
//!
//! Supports:
//! - Inference for models exported as a JSON node list (one list per tree).
//! - Structural validation at load time, including the feature column order.
//! - Importance weights exported with the model, or derived from split counts.

mod model;

pub use model::{GbdtModel, RegressionTree, TreeNode, sigmoid};
