//! Metrics for classification models

use crate::error::{Error, Result};


/// Compute the accuracy
///
/// Class labels are compared for exact equality.
///
/// # Arguments
/// * `y_true` - true labels
/// * `y_pred` - predicted labels
///
/// # Returns
/// * `Result<f64>` - accuracy in `[0, 1]`
pub fn accuracy_score<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(Error::DimensionMismatch(format!(
            "true and predicted labels differ in length: {} vs {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    if y_true.is_empty() {
        return Err(Error::EmptyData("cannot score an empty sample".to_string()));
    }

    let correct_count = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();

    Ok(correct_count as f64 / y_true.len() as f64)
}
