//! Learning-curve plots
//!
//! Training and validation scores against the number of training samples,
//! with fixed styling: training is a solid C0 line with circles, validation
//! a dashed C1 line with squares, both with ±1 std bands.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::curve::{evaluate_learning_curve, CurveResult};
use crate::ml::model_selection::{LearningCurveConfig, TrainSizes};
use crate::ml::models::SupervisedModel;
use crate::vis::config::{
    FigureConfig, LegendConfig, LegendPosition, LineStyle, MarkerShape, BAND_ALPHA,
    DEFAULT_MARKER_SIZE,
};
use crate::vis::figure::{Figure, Line};

/// Fixed x-axis description
pub const TRAINING_SAMPLES_LABEL: &str = "Number of training samples";

/// Y-axis description used when none is given
pub const DEFAULT_SCORE_LABEL: &str = "Accuracy";

/// Options for [`plot_learning_curve`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningCurvePlotOptions {
    pub ylim: Option<(f64, f64)>,
    /// Y-axis description; "Accuracy" when unset or empty
    pub ylabel: Option<String>,
    pub title: Option<String>,
    pub figure_config: FigureConfig,
}

impl Default for LearningCurvePlotOptions {
    fn default() -> Self {
        LearningCurvePlotOptions {
            ylim: None,
            ylabel: None,
            title: None,
            figure_config: FigureConfig::default(),
        }
    }
}

impl LearningCurvePlotOptions {
    /// Y-axis description after applying the default
    pub fn effective_ylabel(&self) -> &str {
        match self.ylabel.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => DEFAULT_SCORE_LABEL,
        }
    }
}

/// Draw a learning curve onto an existing figure without showing it
pub fn draw_learning_curve(
    fig: &mut Figure,
    curve: &CurveResult,
    options: &LearningCurvePlotOptions,
) -> Result<()> {
    curve.validate()?;

    let series = [
        (
            &curve.train_mean,
            &curve.train_std,
            0,
            LineStyle::Solid,
            MarkerShape::Circle,
            "training",
        ),
        (
            &curve.test_mean,
            &curve.test_std,
            1,
            LineStyle::Dashed,
            MarkerShape::Square,
            "validation",
        ),
    ];

    for (mean, std, color_ix, style, marker, label) in series {
        let color = fig.color(color_ix);
        fig.plot(Line {
            xs: curve.train_sizes.clone(),
            ys: mean.clone(),
            color,
            style,
            marker,
            markersize: DEFAULT_MARKER_SIZE,
            label: label.to_string(),
        })?;

        let upper: Vec<f64> = mean.iter().zip(std.iter()).map(|(m, s)| m + s).collect();
        let lower: Vec<f64> = mean.iter().zip(std.iter()).map(|(m, s)| m - s).collect();
        fig.fill_between(&curve.train_sizes, &upper, &lower, color, BAND_ALPHA)?;
    }

    fig.grid(true);
    fig.set_xlabel(TRAINING_SAMPLES_LABEL);
    fig.set_ylabel(options.effective_ylabel());
    fig.legend(LegendConfig::at(LegendPosition::LowerRight));
    if let Some(title) = &options.title {
        fig.set_title(title.as_str());
    }
    fig.set_ylim(options.ylim)?;

    Ok(())
}

/// Render a precomputed learning curve
pub fn plot_learning_curve(curve: &CurveResult, options: &LearningCurvePlotOptions) -> Result<()> {
    let mut fig = Figure::new(options.figure_config.clone());
    draw_learning_curve(&mut fig, curve, options)?;
    fig.show()
}

/// Compute a learning curve for `model` and render it
///
/// The training-size sweep is configured by `train_sizes` and `config`; see
/// [`crate::ml::model_selection::learning_curve`]. Returns the computed
/// curve so it can be inspected or saved.
///
/// # Example
///
/// ```no_run
/// use learnplot::ml::models::LogisticRegression;
/// use learnplot::vis::{gen_and_plot_learning_curve, FigureConfig, LearningCurvePlotOptions};
/// use learnplot::{LearningCurveConfig, TrainSizes};
///
/// let x: Vec<Vec<f64>> = (0..100).map(|i| vec![(i % 10) as f64, (i / 10) as f64]).collect();
/// let y: Vec<f64> = x.iter().map(|r| if r[0] + r[1] > 9.0 { 1.0 } else { 0.0 }).collect();
///
/// let options = LearningCurvePlotOptions {
///     title: Some("Logistic regression".into()),
///     figure_config: FigureConfig::with_output("learning_curve.svg"),
///     ..LearningCurvePlotOptions::default()
/// };
/// let curve = gen_and_plot_learning_curve(
///     &LogisticRegression::default(),
///     &x,
///     &y,
///     &TrainSizes::default(),
///     &LearningCurveConfig::default(),
///     &options,
/// )
/// .unwrap();
/// println!("{:?}", curve.test_mean);
/// ```
pub fn gen_and_plot_learning_curve<M: SupervisedModel + Clone>(
    model: &M,
    x: &[Vec<f64>],
    y: &[f64],
    train_sizes: &TrainSizes,
    config: &LearningCurveConfig,
    options: &LearningCurvePlotOptions,
) -> Result<CurveResult> {
    let curve = evaluate_learning_curve(model, x, y, train_sizes, config)?;
    plot_learning_curve(&curve, options)?;
    Ok(curve)
}
