//! Learning curves for the two reference models
//!
//! Writes `learning_curve_linear.png` and `learning_curve_logistic.svg` and
//! stores the computed curve next to them as JSON.

use learnplot::ml::models::{LinearRegression, LogisticRegression};
use learnplot::ml::{CvStrategy, Scoring};
use learnplot::vis::{gen_and_plot_learning_curve, FigureConfig, LearningCurvePlotOptions};
use learnplot::{LearningCurveConfig, TrainSizes};
use rand::{rng, Rng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rng();

    // Regression data: y = 3 x0 - 2 x1 + noise
    let x: Vec<Vec<f64>> = (0..200)
        .map(|_| vec![rng.random_range(0.0..10.0), rng.random_range(0.0..5.0)])
        .collect();
    let y: Vec<f64> = x
        .iter()
        .map(|r| 3.0 * r[0] - 2.0 * r[1] + rng.random_range(-2.0..2.0))
        .collect();

    let options = LearningCurvePlotOptions {
        ylabel: Some("R^2".to_string()),
        title: Some("Linear regression".to_string()),
        figure_config: FigureConfig::with_output("learning_curve_linear.png"),
        ..LearningCurvePlotOptions::default()
    };
    let curve = gen_and_plot_learning_curve(
        &LinearRegression::new(),
        &x,
        &y,
        &TrainSizes::default(),
        &LearningCurveConfig::default(),
        &options,
    )?;
    curve.save_json("learning_curve_linear.json")?;

    println!("Linear regression");
    for i in 0..curve.len() {
        println!(
            "  n={:>4}  train {:.3} ± {:.3}  validation {:.3} ± {:.3}",
            curve.train_sizes[i],
            curve.train_mean[i],
            curve.train_std[i],
            curve.test_mean[i],
            curve.test_std[i]
        );
    }

    // Classification data: two overlapping blobs
    let x: Vec<Vec<f64>> = (0..300)
        .map(|i| {
            let centre = if i % 2 == 0 { 1.0 } else { -1.0 };
            vec![
                centre + rng.random_range(-1.5..1.5),
                centre + rng.random_range(-1.5..1.5),
            ]
        })
        .collect();
    let y: Vec<f64> = (0..300).map(|i| if i % 2 == 0 { 1.0 } else { 0.0 }).collect();

    let config = LearningCurveConfig {
        cv: Some(CvStrategy::stratified(5)),
        scoring: Some(Scoring::Accuracy),
        shuffle: true,
        random_state: Some(0),
    };
    let options = LearningCurvePlotOptions {
        ylim: Some((0.5, 1.01)),
        title: Some("Logistic regression".to_string()),
        figure_config: FigureConfig::with_output("learning_curve_logistic.svg"),
        ..LearningCurvePlotOptions::default()
    };
    let curve = gen_and_plot_learning_curve(
        &LogisticRegression::default(),
        &x,
        &y,
        &TrainSizes::linspace(0.05, 1.0, 8),
        &config,
        &options,
    )?;

    println!(
        "Logistic regression: final validation accuracy {:.3}",
        curve.test_mean[curve.len() - 1]
    );
    println!("Charts written to learning_curve_linear.png and learning_curve_logistic.svg");

    Ok(())
}
