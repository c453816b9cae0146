//! Validation-curve style band plot over a log-scaled parameter range

use learnplot::ml::models::LinearRegression;
use learnplot::ml::{cross_val_score, CvStrategy, Scoring};
use learnplot::stats;
use learnplot::vis::{
    plot_means_w_stds, BandPlotOptions, FigureConfig, LegendConfig, LegendPosition,
};
use rand::{rng, Rng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rng();

    let x: Vec<Vec<f64>> = (0..120)
        .map(|_| (0..4).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect();
    let y: Vec<f64> = x
        .iter()
        .map(|r| r[0] - 0.5 * r[1] + 0.25 * r[2] + rng.random_range(-0.3..0.3))
        .collect();

    // Ridge penalty sweep
    let alphas = vec![1e-3, 1e-2, 1e-1, 1.0, 10.0, 100.0];
    let cv = CvStrategy::KFold {
        n_splits: 5,
        shuffle: true,
        seed: Some(1),
    };

    let mut means = vec![Vec::new(), Vec::new()];
    let mut stds = vec![Vec::new(), Vec::new()];
    for &alpha in &alphas {
        let model = LinearRegression::new().with_ridge(alpha);
        for (i, scoring) in [Scoring::R2, Scoring::NegMeanAbsoluteError].into_iter().enumerate() {
            let scores = cross_val_score(&model, &x, &y, &cv, Some(scoring))?;
            means[i].push(stats::mean(&scores)?);
            stds[i].push(stats::population_std(&scores)?);
        }
    }

    let options = BandPlotOptions {
        series_labels: Some(vec!["R^2".to_string(), "-MAE".to_string()]),
        xlabel: Some("ridge alpha".to_string()),
        ylabel: Some("score".to_string()),
        title: Some("Ridge penalty sweep".to_string()),
        logx: true,
        legend_config: LegendConfig::at(LegendPosition::LowerLeft),
        figure_config: FigureConfig::with_output("ridge_sweep.svg"),
        ..BandPlotOptions::default()
    };
    plot_means_w_stds(&means, &stds, &alphas, &options)?;

    println!("Chart written to ridge_sweep.svg");
    Ok(())
}
