//! Integration tests for learning-curve evaluation and plotting

mod common;

#[cfg(test)]
mod tests {
    use super::common::{
        binary_dataset, linear_dataset, ConstantModel, FailingModel, TempTestDir,
    };
    use learnplot::ml::models::{LinearRegression, LogisticRegression};
    use learnplot::ml::{evaluate_learning_curve, CvStrategy, Scoring};
    use learnplot::{CurveResult, Error, LearningCurveConfig, TrainSizes};

    #[test]
    fn test_fraction_sizes_give_aligned_curve() -> Result<(), Error> {
        let (x, y) = linear_dataset(100);
        let sizes = TrainSizes::Fractions(vec![0.1, 0.5, 1.0]);

        let curve = evaluate_learning_curve(
            &LinearRegression::new(),
            &x,
            &y,
            &sizes,
            &LearningCurveConfig::default(),
        )?;

        assert_eq!(curve.len(), 3);
        assert_eq!(curve.train_sizes, vec![8.0, 40.0, 80.0]);
        assert_eq!(curve.train_mean.len(), 3);
        assert_eq!(curve.train_std.len(), 3);
        assert_eq!(curve.test_mean.len(), 3);
        assert_eq!(curve.test_std.len(), 3);
        assert!(curve.train_std.iter().chain(curve.test_std.iter()).all(|s| *s >= 0.0));
        // a nearly noiseless linear target is learned well from 40 samples
        assert!(curve.test_mean[2] > 0.99);
        Ok(())
    }

    #[test]
    fn test_default_sizes_span_ten_points() -> Result<(), Error> {
        let (x, y) = linear_dataset(100);
        let curve = evaluate_learning_curve(
            &LinearRegression::new(),
            &x,
            &y,
            &TrainSizes::default(),
            &LearningCurveConfig::default(),
        )?;

        assert_eq!(curve.len(), 10);
        assert_eq!(curve.train_sizes.first(), Some(&8.0));
        assert_eq!(curve.train_sizes.last(), Some(&80.0));
        Ok(())
    }

    #[test]
    fn test_constant_scores_have_zero_std() -> Result<(), Error> {
        let (x, y) = linear_dataset(30);
        let curve = evaluate_learning_curve(
            &ConstantModel::new(0.75),
            &x,
            &y,
            &TrainSizes::Absolute(vec![5, 10]),
            &LearningCurveConfig {
                cv: Some(CvStrategy::k_fold(3)),
                ..LearningCurveConfig::default()
            },
        )?;

        assert_eq!(curve.train_sizes, vec![5.0, 10.0]);
        assert!(curve.train_mean.iter().all(|m| (m - 0.75).abs() < 1e-12));
        assert!(curve.test_std.iter().all(|s| s.abs() < 1e-12));
        Ok(())
    }

    #[test]
    fn test_model_errors_propagate() {
        let (x, y) = linear_dataset(50);
        let result = evaluate_learning_curve(
            &FailingModel { limit: 20 },
            &x,
            &y,
            &TrainSizes::Absolute(vec![10, 30]),
            &LearningCurveConfig::default(),
        );

        match result {
            Err(Error::Model(msg)) => assert!(msg.contains("30")),
            other => panic!("expected model error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_sizes_fail() {
        let (x, y) = linear_dataset(20);
        let model = LinearRegression::new();
        let config = LearningCurveConfig::default();

        let too_large = TrainSizes::Absolute(vec![17]);
        assert!(evaluate_learning_curve(&model, &x, &y, &too_large, &config).is_err());

        let bad_fraction = TrainSizes::Fractions(vec![0.0, 0.5]);
        assert!(evaluate_learning_curve(&model, &x, &y, &bad_fraction, &config).is_err());
    }

    #[test]
    fn test_classifier_with_explicit_scoring() -> Result<(), Error> {
        let (x, y) = binary_dataset(120);
        let config = LearningCurveConfig {
            cv: Some(CvStrategy::stratified(4)),
            scoring: Some(Scoring::Accuracy),
            shuffle: true,
            random_state: Some(3),
        };

        let curve = evaluate_learning_curve(
            &LogisticRegression::default(),
            &x,
            &y,
            &TrainSizes::Fractions(vec![0.25, 1.0]),
            &config,
        )?;

        assert_eq!(curve.len(), 2);
        assert!(curve
            .test_mean
            .iter()
            .chain(curve.train_mean.iter())
            .all(|m| (0.0..=1.0).contains(m)));
        assert!(curve.test_mean[1] > 0.75);
        Ok(())
    }

    #[test]
    fn test_curve_json_file_round_trip() -> Result<(), Error> {
        let curve = CurveResult::new(
            vec![10.0, 20.0],
            vec![0.9, 0.85],
            vec![0.01, 0.02],
            vec![0.6, 0.7],
            vec![0.05, 0.04],
        )?;

        let dir = TempTestDir::new()?;
        let path = dir.join("curve.json");
        curve.save_json(&path)?;
        let loaded = CurveResult::load_json(&path)?;

        assert_eq!(loaded, curve);
        Ok(())
    }

    #[test]
    fn test_saved_curve_reloads_bit_exact() -> Result<(), Error> {
        let awkward = vec![1.1102230246251563e-16, 0.1 + 0.2, 2.0f64.sqrt() / 3.0];
        let curve = CurveResult::new(
            vec![5.0, 10.0, 20.0],
            awkward.clone(),
            awkward.clone(),
            awkward.iter().map(|v| v / 7.0).collect(),
            awkward.iter().map(|v| v * 1e-300).collect(),
        )?;

        let dir = TempTestDir::new()?;
        let path = dir.join("precise.json");
        curve.save_json(&path)?;
        let loaded = CurveResult::load_json(&path)?;

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&loaded.train_mean), bits(&curve.train_mean));
        assert_eq!(bits(&loaded.test_mean), bits(&curve.test_mean));
        assert_eq!(bits(&loaded.test_std), bits(&curve.test_std));
        Ok(())
    }

    #[test]
    fn test_missing_curve_file_is_io_error() {
        let dir = TempTestDir::new().unwrap();
        let result = CurveResult::load_json(dir.join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[cfg(feature = "visualization")]
    mod plotting {
        use super::super::common::{linear_dataset, TempTestFile};
        use learnplot::ml::models::LinearRegression;
        use learnplot::vis::{
            draw_learning_curve, gen_and_plot_learning_curve, plot_learning_curve, Figure,
            FigureConfig, LearningCurvePlotOptions, LegendPosition, LineStyle,
        };
        use learnplot::{CurveResult, Error, LearningCurveConfig, TrainSizes};

        fn curve() -> CurveResult {
            CurveResult {
                train_sizes: vec![10.0, 50.0, 100.0],
                train_mean: vec![1.0, 0.95, 0.93],
                train_std: vec![0.0, 0.01, 0.01],
                test_mean: vec![0.7, 0.8, 0.85],
                test_std: vec![0.05, 0.03, 0.02],
            }
        }

        #[test]
        fn test_two_series_with_bands() -> Result<(), Error> {
            let mut fig = Figure::new(FigureConfig::default());
            draw_learning_curve(&mut fig, &curve(), &LearningCurvePlotOptions::default())?;

            assert_eq!(fig.lines().len(), 2);
            assert_eq!(fig.bands().len(), 2);
            assert_eq!(fig.lines()[0].style, LineStyle::Solid);
            assert_eq!(fig.lines()[1].style, LineStyle::Dashed);

            let validation = &fig.bands()[1];
            assert!((validation.upper[0] - 0.75).abs() < 1e-12);
            assert!((validation.lower[2] - 0.83).abs() < 1e-12);

            assert_eq!(fig.xlabel(), Some("Number of training samples"));
            assert_eq!(fig.ylabel(), Some("Accuracy"));
            assert_eq!(
                fig.legend_config().map(|l| l.position),
                Some(LegendPosition::LowerRight)
            );
            Ok(())
        }

        #[test]
        fn test_ylabel_title_and_ylim() -> Result<(), Error> {
            let options = LearningCurvePlotOptions {
                ylabel: Some("R^2".to_string()),
                title: Some("Linear model".to_string()),
                ylim: Some((0.5, 1.01)),
                ..LearningCurvePlotOptions::default()
            };
            let mut fig = Figure::new(FigureConfig::default());
            draw_learning_curve(&mut fig, &curve(), &options)?;

            assert_eq!(fig.ylabel(), Some("R^2"));
            assert_eq!(fig.title(), Some("Linear model"));
            assert_eq!(fig.ylim(), Some((0.5, 1.01)));
            Ok(())
        }

        #[test]
        fn test_misaligned_curve_is_rejected() {
            let mut broken = curve();
            broken.test_std.pop();
            let file = TempTestFile::new("broken_curve", "png");
            let options = LearningCurvePlotOptions {
                figure_config: FigureConfig::with_output(file.path()),
                ..LearningCurvePlotOptions::default()
            };

            assert!(plot_learning_curve(&broken, &options).is_err());
            assert!(!file.path().exists());
        }

        #[test]
        fn test_plot_learning_curve_writes_svg() -> Result<(), Error> {
            let file = TempTestFile::new("learning_curve", "svg");
            let options = LearningCurvePlotOptions {
                title: Some("Curve".to_string()),
                figure_config: FigureConfig::with_output(file.path()),
                ..LearningCurvePlotOptions::default()
            };

            plot_learning_curve(&curve(), &options)?;

            let svg = std::fs::read_to_string(file.path())?;
            assert!(svg.contains("training"));
            assert!(svg.contains("validation"));
            assert!(svg.contains("Number of training samples"));
            Ok(())
        }

        #[test]
        fn test_gen_and_plot_returns_curve() -> Result<(), Error> {
            let (x, y) = linear_dataset(60);
            let file = TempTestFile::new("gen_and_plot", "png");
            let options = LearningCurvePlotOptions {
                ylabel: Some("R^2".to_string()),
                figure_config: FigureConfig::with_output(file.path()),
                ..LearningCurvePlotOptions::default()
            };

            let curve = gen_and_plot_learning_curve(
                &LinearRegression::new(),
                &x,
                &y,
                &TrainSizes::linspace(0.2, 1.0, 3),
                &LearningCurveConfig::default(),
                &options,
            )?;

            assert_eq!(curve.len(), 3);
            assert!(file.path().exists());
            Ok(())
        }
    }
}
