//! Learning-curve summaries
//!
//! [`CurveResult`] holds the five aligned sequences a learning-curve plot is
//! drawn from. It is produced once by [`evaluate_learning_curve`] (or loaded
//! from JSON) and consumed by the renderer.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ml::model_selection::{learning_curve, LearningCurve, LearningCurveConfig, TrainSizes};
use crate::ml::models::SupervisedModel;
use crate::stats;

/// Per-size mean and population std of training and validation scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveResult {
    /// Number of training samples at each point
    pub train_sizes: Vec<f64>,
    pub train_mean: Vec<f64>,
    pub train_std: Vec<f64>,
    pub test_mean: Vec<f64>,
    pub test_std: Vec<f64>,
}

impl CurveResult {
    /// Assemble a curve from precomputed sequences
    ///
    /// All five sequences must have the same length.
    pub fn new(
        train_sizes: Vec<f64>,
        train_mean: Vec<f64>,
        train_std: Vec<f64>,
        test_mean: Vec<f64>,
        test_std: Vec<f64>,
    ) -> Result<Self> {
        let curve = CurveResult {
            train_sizes,
            train_mean,
            train_std,
            test_mean,
            test_std,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Reduce raw fold scores to means and population standard deviations
    pub fn from_scores(scores: &LearningCurve) -> Result<Self> {
        let (train_mean, train_std) = stats::row_mean_std(&scores.train_scores)?;
        let (test_mean, test_std) = stats::row_mean_std(&scores.test_scores)?;

        CurveResult::new(
            scores.train_sizes.iter().map(|&n| n as f64).collect(),
            train_mean,
            train_std,
            test_mean,
            test_std,
        )
    }

    /// Number of points on the curve
    pub fn len(&self) -> usize {
        self.train_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train_sizes.is_empty()
    }

    /// Check that every sequence is aligned with the size axis
    pub fn validate(&self) -> Result<()> {
        let expected = self.train_sizes.len();
        for seq in [
            &self.train_mean,
            &self.train_std,
            &self.test_mean,
            &self.test_std,
        ] {
            if seq.len() != expected {
                return Err(Error::LengthMismatch {
                    expected,
                    actual: seq.len(),
                });
            }
        }
        Ok(())
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let curve: CurveResult = serde_json::from_str(json)?;
        curve.validate()?;
        Ok(curve)
    }

    /// Save to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Load from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let curve: CurveResult = serde_json::from_reader(reader)?;
        curve.validate()?;
        Ok(curve)
    }
}

/// Run the learning-curve sweep and summarise it
///
/// Failures from the sweep or the model propagate unchanged.
pub fn evaluate_learning_curve<M: SupervisedModel + Clone>(
    model: &M,
    x: &[Vec<f64>],
    y: &[f64],
    train_sizes: &TrainSizes,
    config: &LearningCurveConfig,
) -> Result<CurveResult> {
    let scores = learning_curve(model, x, y, train_sizes, config)?;
    CurveResult::from_scores(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scores() -> LearningCurve {
        LearningCurve {
            train_sizes: vec![2, 4],
            train_scores: vec![vec![1.0, 1.0, 1.0], vec![0.9, 0.8, 0.7]],
            test_scores: vec![vec![0.5, 0.7, 0.6], vec![0.7, 0.7, 0.7]],
        }
    }

    #[test]
    fn test_from_scores() {
        let curve = CurveResult::from_scores(&sample_scores()).unwrap();

        assert_eq!(curve.train_sizes, vec![2.0, 4.0]);
        assert!((curve.train_mean[1] - 0.8).abs() < 1e-12);
        assert!(curve.train_std[0].abs() < 1e-12);
        // population std of (0.9, 0.8, 0.7)
        assert!((curve.train_std[1] - (0.02f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((curve.test_mean[0] - 0.6).abs() < 1e-12);
        assert!(curve.test_std[1].abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_misaligned() {
        let result = CurveResult::new(
            vec![1.0, 2.0],
            vec![0.5],
            vec![0.0, 0.0],
            vec![0.1, 0.2],
            vec![0.0, 0.0],
        );
        assert!(matches!(
            result,
            Err(Error::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_json_round_trip_validates() {
        let curve = CurveResult::from_scores(&sample_scores()).unwrap();
        let parsed = CurveResult::from_json(&curve.to_json().unwrap()).unwrap();
        assert_eq!(parsed, curve);

        let broken = r#"{
            "train_sizes": [1.0],
            "train_mean": [],
            "train_std": [0.0],
            "test_mean": [0.0],
            "test_std": [0.0]
        }"#;
        assert!(CurveResult::from_json(broken).is_err());
    }
}
