//! Mean/standard-deviation band plots
//!
//! Every series is drawn as a line with circular markers and a translucent
//! band covering one standard deviation on either side of the mean.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vis::config::{
    FigureConfig, LegendConfig, LineStyle, MarkerShape, BAND_ALPHA, DEFAULT_MARKER_SIZE,
};
use crate::vis::figure::{Figure, Line};

/// Options for [`plot_means_w_stds`]
///
/// # Example
///
/// ```no_run
/// use learnplot::vis::{plot_means_w_stds, BandPlotOptions, FigureConfig};
///
/// let xrange = vec![0.01, 0.1, 1.0, 10.0];
/// let means = vec![vec![0.60, 0.72, 0.81, 0.79], vec![0.58, 0.69, 0.75, 0.70]];
/// let stds = vec![vec![0.02, 0.02, 0.01, 0.03], vec![0.03, 0.02, 0.02, 0.04]];
///
/// let options = BandPlotOptions {
///     series_labels: Some(vec!["train".into(), "validation".into()]),
///     xlabel: Some("C".into()),
///     ylabel: Some("Accuracy".into()),
///     logx: true,
///     figure_config: FigureConfig::with_output("validation_curve.png"),
///     ..BandPlotOptions::default()
/// };
/// plot_means_w_stds(&means, &stds, &xrange, &options).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandPlotOptions {
    /// Legend label per series; empty labels when unset
    pub series_labels: Option<Vec<String>>,
    pub ylabel: Option<String>,
    pub xlabel: Option<String>,
    /// Draw the legend
    pub legend: bool,
    /// Line style per series; see [`default_linestyles`] when unset
    pub linestyles: Option<Vec<LineStyle>>,
    pub title: Option<String>,
    pub ylim: Option<(f64, f64)>,
    /// Log-scaled x axis
    pub logx: bool,
    pub legend_config: LegendConfig,
    pub figure_config: FigureConfig,
    /// Marker size; 5 when unset or zero
    pub markersize: Option<u32>,
}

impl Default for BandPlotOptions {
    fn default() -> Self {
        BandPlotOptions {
            series_labels: None,
            ylabel: None,
            xlabel: None,
            legend: true,
            linestyles: None,
            title: None,
            ylim: None,
            logx: false,
            legend_config: LegendConfig::default(),
            figure_config: FigureConfig::default(),
            markersize: None,
        }
    }
}

impl BandPlotOptions {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Marker size after applying the default
    pub fn effective_markersize(&self) -> u32 {
        match self.markersize {
            Some(size) if size > 0 => size,
            _ => DEFAULT_MARKER_SIZE,
        }
    }
}

/// Default line styles for `n` series
///
/// An even count draws the first half solid and the second half dashed,
/// an odd count draws everything solid.
pub fn default_linestyles(n: usize) -> Vec<LineStyle> {
    if n % 2 == 1 {
        vec![LineStyle::Solid; n]
    } else {
        let mut styles = vec![LineStyle::Solid; n / 2];
        styles.extend(std::iter::repeat(LineStyle::Dashed).take(n / 2));
        styles
    }
}

fn per_series<T: Clone>(
    given: &Option<Vec<T>>,
    n: usize,
    fallback: impl FnOnce() -> Vec<T>,
) -> Result<Vec<T>> {
    match given {
        Some(values) if !values.is_empty() => {
            if values.len() != n {
                return Err(Error::LengthMismatch {
                    expected: n,
                    actual: values.len(),
                });
            }
            Ok(values.clone())
        }
        _ => Ok(fallback()),
    }
}

/// Draw mean/std bands onto an existing figure
///
/// `means[i]` and `stds[i]` must both be aligned with `xrange`. The figure
/// is decorated (grid, labels, limits, scale, legend, title) but not shown.
pub fn draw_means_w_stds(
    fig: &mut Figure,
    means: &[Vec<f64>],
    stds: &[Vec<f64>],
    xrange: &[f64],
    options: &BandPlotOptions,
) -> Result<()> {
    if means.len() != stds.len() {
        return Err(Error::LengthMismatch {
            expected: means.len(),
            actual: stds.len(),
        });
    }
    for series in means.iter().chain(stds.iter()) {
        if series.len() != xrange.len() {
            return Err(Error::LengthMismatch {
                expected: xrange.len(),
                actual: series.len(),
            });
        }
    }

    let n = means.len();
    let linestyles = per_series(&options.linestyles, n, || default_linestyles(n))?;
    let labels = per_series(&options.series_labels, n, || vec![String::new(); n])?;
    let markersize = options.effective_markersize();

    for (ix, (mean, std)) in means.iter().zip(stds.iter()).enumerate() {
        let color = fig.color(ix);
        fig.plot(Line {
            xs: xrange.to_vec(),
            ys: mean.clone(),
            color,
            style: linestyles[ix],
            marker: MarkerShape::Circle,
            markersize,
            label: labels[ix].clone(),
        })?;

        let upper: Vec<f64> = mean.iter().zip(std.iter()).map(|(m, s)| m + s).collect();
        let lower: Vec<f64> = mean.iter().zip(std.iter()).map(|(m, s)| m - s).collect();
        fig.fill_between(xrange, &upper, &lower, color, BAND_ALPHA)?;
    }

    fig.grid(true);
    if let Some(xlabel) = &options.xlabel {
        fig.set_xlabel(xlabel.as_str());
    }
    if let Some(ylabel) = &options.ylabel {
        fig.set_ylabel(ylabel.as_str());
    }
    fig.set_ylim(options.ylim)?;
    if options.logx {
        fig.semilogx();
    }
    if options.legend {
        fig.legend(options.legend_config.clone());
    }
    if let Some(title) = &options.title {
        fig.set_title(title.as_str());
    }

    Ok(())
}

/// Plot several mean/std series over a shared x range
///
/// Creates a figure from `options.figure_config`, draws every series with
/// its ±1 std band and renders the chart to the configured output.
pub fn plot_means_w_stds(
    means: &[Vec<f64>],
    stds: &[Vec<f64>],
    xrange: &[f64],
    options: &BandPlotOptions,
) -> Result<()> {
    let mut fig = Figure::new(options.figure_config.clone());
    draw_means_w_stds(&mut fig, means, stds, xrange, options)?;
    fig.show()
}
