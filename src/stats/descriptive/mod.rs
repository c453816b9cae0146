// Descriptive statistics

use crate::error::{Error, Result};

pub(crate) fn mean_impl(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "the mean needs at least one value".into(),
        ));
    }

    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

pub(crate) fn population_std_impl(data: &[f64]) -> Result<f64> {
    mean_std_impl(data).map(|(_, std)| std)
}

/// Mean and population standard deviation in one pass over the mean
pub(crate) fn mean_std_impl(data: &[f64]) -> Result<(f64, f64)> {
    let mean = mean_impl(data)?;

    let variance = data
        .iter()
        .map(|&x| (x - mean).powi(2))
        .sum::<f64>()
        / data.len() as f64;

    Ok((mean, variance.sqrt()))
}
