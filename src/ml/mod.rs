//! Machine learning support
//!
//! The model capability trait, scoring metrics and the cross-validation
//! sweep behind learning curves.

pub mod curve;
pub mod metrics;
pub mod model_selection;
pub mod models;

pub use curve::{evaluate_learning_curve, CurveResult};
pub use metrics::Scoring;
pub use model_selection::{
    cross_val_score, learning_curve, CvStrategy, LearningCurve, LearningCurveConfig, TrainSizes,
};
pub use models::{LinearRegression, LogisticRegression, SupervisedModel};
