//! Module providing chart rendering with plotters
//!
//! - [`band`]: several mean/std series with shaded ±1 std bands
//! - [`learning_curve`]: training and validation score against training
//!   set size
//! - [`figure`]: the figure handle both of them draw onto

pub mod band;
pub mod config;
pub mod figure;
pub mod learning_curve;

// Re-export public items
pub use self::band::{default_linestyles, draw_means_w_stds, plot_means_w_stds, BandPlotOptions};
pub use self::config::{
    FigureConfig, LegendConfig, LegendPosition, LineStyle, MarkerShape, OutputType,
    DEFAULT_PALETTE,
};
pub use self::figure::{AxisScale, Band, Figure, Line};
pub use self::learning_curve::{
    draw_learning_curve, gen_and_plot_learning_curve, plot_learning_curve,
    LearningCurvePlotOptions,
};
