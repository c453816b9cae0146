//! Evaluation metrics used to score models during cross-validation.

pub mod classification;
pub mod regression;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::models::SupervisedModel;

/// Scoring rule applied to a fitted model
///
/// Every rule follows the "greater is better" convention, so error metrics
/// are negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scoring {
    /// Fraction of exactly matching predictions
    Accuracy,
    /// Coefficient of determination
    R2,
    /// Negated mean squared error
    NegMeanSquaredError,
    /// Negated mean absolute error
    NegMeanAbsoluteError,
}

impl Scoring {
    /// Score `model` on the samples `x` with true targets `y`
    pub fn evaluate<M: SupervisedModel + ?Sized>(
        &self,
        model: &M,
        x: &[Vec<f64>],
        y: &[f64],
    ) -> Result<f64> {
        let y_pred = model.predict(x)?;
        match self {
            Scoring::Accuracy => classification::accuracy_score(y, &y_pred),
            Scoring::R2 => regression::r2_score(y, &y_pred),
            Scoring::NegMeanSquaredError => regression::mean_squared_error(y, &y_pred).map(|v| -v),
            Scoring::NegMeanAbsoluteError => {
                regression::mean_absolute_error(y, &y_pred).map(|v| -v)
            }
        }
    }
}

/// Score with `scoring` if given, otherwise with the model's own `score`
pub fn score_with<M: SupervisedModel + ?Sized>(
    model: &M,
    scoring: Option<Scoring>,
    x: &[Vec<f64>],
    y: &[f64],
) -> Result<f64> {
    match scoring {
        Some(rule) => rule.evaluate(model, x, y),
        None => model.score(x, y),
    }
}
