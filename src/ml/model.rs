//! Serialized regression models
//!
//! Two families are supported, tagged by `kind` in the artifact file:
//! - `linear`: intercept plus a dot product with the coefficient row
//! - `tree_ensemble`: binary regression trees, averaged (random forest) or
//!   summed with a learning rate on top of a base score (gradient boosting)

use serde::{Deserialize, Serialize};

use super::encoder::EncodedVector;
use super::errors::{PredictError, PredictResult};
use super::Predictor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl RegressionModel {
    pub fn kind(&self) -> &'static str {
        match self {
            RegressionModel::Linear(_) => "linear",
            RegressionModel::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// Vector width the model was fit on, when the artifact declares one
    pub fn expected_features(&self) -> Option<usize> {
        match self {
            RegressionModel::Linear(model) => Some(model.coefficients.len()),
            RegressionModel::TreeEnsemble(model) => model.n_features,
        }
    }

    /// Raw model output for one aligned row
    pub fn evaluate(&self, values: &[f64]) -> PredictResult<f64> {
        if let Some(expected) = self.expected_features() {
            if expected != values.len() {
                return Err(PredictError::ShapeMismatch {
                    expected,
                    actual: values.len(),
                });
            }
        }

        let raw = match self {
            RegressionModel::Linear(model) => model.evaluate(values),
            RegressionModel::TreeEnsemble(model) => model.evaluate(values)?,
        };

        if !raw.is_finite() {
            return Err(PredictError::NonFinite(raw));
        }
        Ok(raw)
    }
}

impl Predictor for RegressionModel {
    type Input = EncodedVector;
    type Output = f64;

    fn predict(&self, input: &EncodedVector) -> PredictResult<f64> {
        self.evaluate(input.values())
    }
}

/// Ordinary least squares style model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    fn evaluate(&self, values: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(values)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// How per-tree outputs combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of leaves (bagging / random forest)
    #[default]
    Mean,
    /// `base_score + learning_rate * sum(leaves)` (boosting)
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub n_features: Option<usize>,
    pub trees: Vec<RegressionTree>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    fn evaluate(&self, values: &[f64]) -> PredictResult<f64> {
        if self.trees.is_empty() {
            return Ok(self.base_score);
        }

        let mut total = 0.0;
        for (index, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(index, values)?;
        }

        Ok(match self.aggregation {
            Aggregation::Mean => self.base_score + total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + self.learning_rate * total,
        })
    }
}

/// Flattened binary tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, otherwise `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

impl RegressionTree {
    fn evaluate(&self, tree: usize, values: &[f64]) -> PredictResult<f64> {
        let mut node = 0;
        // A well-formed path visits each node at most once
        for _ in 0..self.nodes.len() {
            match self.nodes.get(node) {
                Some(TreeNode::Leaf { leaf }) => return Ok(*leaf),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = values.get(*feature).ok_or(PredictError::FeatureOutOfBounds {
                        tree,
                        node,
                        feature: *feature,
                        width: values.len(),
                    })?;
                    node = if *x <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(PredictError::MalformedTree {
                        tree,
                        reason: format!("node {} does not exist", node),
                    })
                }
            }
        }

        Err(PredictError::MalformedTree {
            tree,
            reason: "cycle detected".to_string(),
        })
    }
}
