//! Machine learning models
//!
//! The [`SupervisedModel`] trait is the capability contract expected by the
//! cross-validation sweep in [`crate::ml::model_selection`]. Two reference
//! models are provided for experiments and demos.

use crate::error::{Error, Result};
use crate::ml::metrics;

/// Common trait for supervised learning models
///
/// Feature matrices are row-major: one `Vec<f64>` per sample.
pub trait SupervisedModel {
    /// Fit the model to the training data
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()>;

    /// Predict targets for new samples
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Score the model (R^2 by default)
    fn score(&self, x: &[Vec<f64>], y: &[f64]) -> Result<f64> {
        let y_pred = self.predict(x)?;
        metrics::regression::r2_score(y, &y_pred)
    }

    /// Whether targets are class labels; selects stratified folds by default
    fn is_classifier(&self) -> bool {
        false
    }
}

/// Number of features shared by every row of `x`
fn n_features(x: &[Vec<f64>]) -> Result<usize> {
    let first = x
        .first()
        .ok_or_else(|| Error::EmptyData("feature matrix has no rows".to_string()))?;
    let width = first.len();

    if let Some(row) = x.iter().find(|row| row.len() != width) {
        return Err(Error::DimensionMismatch(format!(
            "ragged feature matrix: rows of width {} and {}",
            width,
            row.len()
        )));
    }

    Ok(width)
}

fn check_fit_input(x: &[Vec<f64>], y: &[f64]) -> Result<usize> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    n_features(x)
}

/// Linear regression model (least squares with an optional ridge penalty)
///
/// Features are centred before solving, so the intercept is never
/// penalised. The default penalty is tiny and only keeps the normal
/// equations solvable for very small training sets.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Regression coefficients
    coefficients: Vec<f64>,
    /// Intercept
    intercept: f64,
    /// Ridge penalty added to the diagonal of X'X
    alpha: f64,
    /// Whether the model has been fitted
    fitted: bool,
}

impl LinearRegression {
    /// Create a new linear regression model
    pub fn new() -> Self {
        LinearRegression {
            coefficients: Vec::new(),
            intercept: 0.0,
            alpha: 1e-10,
            fitted: false,
        }
    }

    /// Set the ridge penalty
    pub fn with_ridge(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Get the coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Get the intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl SupervisedModel for LinearRegression {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let p = check_fit_input(x, y)?;
        let n = x.len() as f64;

        let x_mean: Vec<f64> = (0..p)
            .map(|j| x.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n;

        // Normal equations on centred data
        let mut gram = vec![vec![0.0; p]; p];
        let mut rhs = vec![0.0; p];
        for (row, &target) in x.iter().zip(y.iter()) {
            for i in 0..p {
                let xi = row[i] - x_mean[i];
                rhs[i] += xi * (target - y_mean);
                for j in 0..p {
                    gram[i][j] += xi * (row[j] - x_mean[j]);
                }
            }
        }
        for (i, gram_row) in gram.iter_mut().enumerate() {
            gram_row[i] += self.alpha;
        }

        let beta = solve_linear_system(gram, rhs)?;

        self.intercept = y_mean
            - beta
                .iter()
                .zip(x_mean.iter())
                .map(|(b, m)| b * m)
                .sum::<f64>();
        self.coefficients = beta;
        self.fitted = true;

        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(Error::Model("model has not been fitted yet".to_string()));
        }

        x.iter()
            .map(|row| {
                if row.len() != self.coefficients.len() {
                    return Err(Error::DimensionMismatch(format!(
                        "expected {} features, got {}",
                        self.coefficients.len(),
                        row.len()
                    )));
                }
                Ok(self.intercept
                    + row
                        .iter()
                        .zip(self.coefficients.iter())
                        .map(|(v, c)| v * c)
                        .sum::<f64>())
            })
            .collect()
    }
}

/// Gaussian elimination with partial pivoting
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);

        if a[pivot_row][col].abs() < 1e-14 {
            return Err(Error::Model(
                "normal equations are singular; increase the ridge penalty".to_string(),
            ));
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * solution[k]).sum();
        solution[row] = (b[row] - tail) / a[row][row];
    }

    Ok(solution)
}

/// Binary logistic regression trained by batch gradient descent
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Regression coefficients
    coefficients: Vec<f64>,
    /// Intercept
    intercept: f64,
    /// Class labels, `classes[1]` is the positive class
    classes: Vec<f64>,
    /// L2 regularization strength
    regularization: f64,
    /// Gradient descent step size
    learning_rate: f64,
    /// Maximum number of iterations
    max_iter: usize,
    /// Convergence threshold on the gradient norm
    tol: f64,
    /// Whether the model has been fitted
    fitted: bool,
}

impl LogisticRegression {
    /// Create a new logistic regression model
    pub fn new(regularization: f64, max_iter: usize, tol: f64) -> Self {
        LogisticRegression {
            coefficients: Vec::new(),
            intercept: 0.0,
            classes: Vec::new(),
            regularization,
            learning_rate: 0.1,
            max_iter,
            tol,
            fitted: false,
        }
    }

    /// Set the gradient descent step size
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Get the class labels seen during fitting
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    /// Probability of the positive class for every sample
    pub fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(Error::Model("model has not been fitted yet".to_string()));
        }

        x.iter()
            .map(|row| {
                if row.len() != self.coefficients.len() {
                    return Err(Error::DimensionMismatch(format!(
                        "expected {} features, got {}",
                        self.coefficients.len(),
                        row.len()
                    )));
                }
                let z = self.intercept
                    + row
                        .iter()
                        .zip(self.coefficients.iter())
                        .map(|(v, c)| v * c)
                        .sum::<f64>();
                Ok(Self::sigmoid(z))
            })
            .collect()
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(0.0, 1000, 1e-6)
    }
}

impl SupervisedModel for LogisticRegression {
    fn is_classifier(&self) -> bool {
        true
    }

    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let p = check_fit_input(x, y)?;

        let mut classes: Vec<f64> = Vec::new();
        for &label in y {
            if !classes.contains(&label) {
                classes.push(label);
            }
        }
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        if classes.len() > 2 {
            return Err(Error::Model(format!(
                "binary logistic regression got {} classes",
                classes.len()
            )));
        }

        self.coefficients = vec![0.0; p];
        self.intercept = 0.0;

        if classes.len() == 1 {
            // A single class: push the decision function far towards it
            self.intercept = -20.0;
            self.classes = vec![classes[0], f64::NAN];
            self.fitted = true;
            return Ok(());
        }

        let targets: Vec<f64> = y
            .iter()
            .map(|&label| if label == classes[1] { 1.0 } else { 0.0 })
            .collect();
        let n = x.len() as f64;

        for _ in 0..self.max_iter {
            let mut grad_w = vec![0.0; p];
            let mut grad_b = 0.0;

            for (row, &t) in x.iter().zip(targets.iter()) {
                let z = self.intercept
                    + row
                        .iter()
                        .zip(self.coefficients.iter())
                        .map(|(v, c)| v * c)
                        .sum::<f64>();
                let err = Self::sigmoid(z) - t;
                for (g, v) in grad_w.iter_mut().zip(row.iter()) {
                    *g += err * v;
                }
                grad_b += err;
            }

            let mut norm = (grad_b / n).powi(2);
            for (g, c) in grad_w.iter_mut().zip(self.coefficients.iter()) {
                *g = *g / n + self.regularization * c;
                norm += *g * *g;
            }

            for (c, g) in self.coefficients.iter_mut().zip(grad_w.iter()) {
                *c -= self.learning_rate * g;
            }
            self.intercept -= self.learning_rate * grad_b / n;

            if norm.sqrt() < self.tol {
                break;
            }
        }

        self.classes = classes;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        let proba = self.predict_proba(x)?;
        Ok(proba
            .into_iter()
            .map(|p| if p >= 0.5 { self.classes[1] } else { self.classes[0] })
            .collect())
    }

    fn score(&self, x: &[Vec<f64>], y: &[f64]) -> Result<f64> {
        let y_pred = self.predict(x)?;
        metrics::classification::accuracy_score(y, &y_pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_regression_recovers_line() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 2.0 * i as f64 + 1.0).collect();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert!((model.coefficients()[0] - 2.0).abs() < 1e-6);
        assert!((model.intercept() - 1.0).abs() < 1e-6);
        assert!((model.score(&x, &y).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_regression_single_sample() {
        let mut model = LinearRegression::new();
        model.fit(&[vec![3.0, 4.0]], &[7.0]).unwrap();
        let pred = model.predict(&[vec![3.0, 4.0]]).unwrap();
        assert!((pred[0] - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LinearRegression::new();
        assert!(matches!(model.predict(&[vec![1.0]]), Err(Error::Model(_))));
    }

    #[test]
    fn test_ragged_matrix() {
        let mut model = LinearRegression::new();
        let result = model.fit(&[vec![1.0], vec![1.0, 2.0]], &[1.0, 2.0]);
        assert!(matches!(result, Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn test_logistic_regression_separable() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64 / 10.0 - 1.0]).collect();
        let y: Vec<f64> = (0..20).map(|i| if i < 10 { 0.0 } else { 1.0 }).collect();

        let mut model = LogisticRegression::new(0.0, 2000, 1e-8).with_learning_rate(1.0);
        model.fit(&x, &y).unwrap();

        assert!(model.score(&x, &y).unwrap() >= 0.95);
        assert_eq!(model.classes(), &[0.0, 1.0]);
    }

    #[test]
    fn test_logistic_regression_single_class() {
        let mut model = LogisticRegression::default();
        model.fit(&[vec![1.0], vec![2.0]], &[1.0, 1.0]).unwrap();
        assert_eq!(model.predict(&[vec![5.0]]).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_logistic_regression_rejects_multiclass() {
        let mut model = LogisticRegression::default();
        let result = model.fit(&[vec![0.0], vec![1.0], vec![2.0]], &[0.0, 1.0, 2.0]);
        assert!(matches!(result, Err(Error::Model(_))));
    }
}
