//! # learnplot
//!
//! Helpers for visualising machine-learning training curves:
//!
//! - band plots of several mean/std series over a shared parameter range
//!   ([`vis::plot_means_w_stds`])
//! - learning curves, i.e. training and validation score against training
//!   set size ([`vis::gen_and_plot_learning_curve`])
//!
//! Charts are drawn through an explicit [`vis::Figure`] handle and rendered
//! with `plotters` to PNG or SVG files. The training-size sweep itself lives
//! in [`ml::model_selection`].
#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod ml;
pub mod stats;
#[cfg(feature = "visualization")]
pub mod vis;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ml::curve::CurveResult;
pub use ml::model_selection::{learning_curve, LearningCurve, LearningCurveConfig, TrainSizes};
pub use ml::models::SupervisedModel;
#[cfg(feature = "visualization")]
pub use vis::{
    gen_and_plot_learning_curve, plot_learning_curve, plot_means_w_stds, BandPlotOptions, Figure,
    FigureConfig, LearningCurvePlotOptions, LegendConfig, LineStyle, OutputType,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
