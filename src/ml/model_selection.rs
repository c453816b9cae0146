//! Utilities for model selection and evaluation
//!
//! Cross-validation splitters, training-set-size translation and the
//! learning-curve sweep that repeatedly trains and scores a model on growing
//! prefixes of every training fold.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ml::metrics::{self, Scoring};
use crate::ml::models::SupervisedModel;

/// A `(train_indices, test_indices)` pair
pub type Split = (Vec<usize>, Vec<usize>);

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn check_n_splits(n_splits: usize, n_samples: usize) -> Result<()> {
    if n_splits < 2 {
        return Err(Error::InvalidInput(format!(
            "cross-validation needs at least 2 splits, got {}",
            n_splits
        )));
    }
    if n_splits > n_samples {
        return Err(Error::InvalidInput(format!(
            "cannot split {} samples into {} folds",
            n_samples, n_splits
        )));
    }
    Ok(())
}

fn complement(n_samples: usize, test: &[usize]) -> Vec<usize> {
    let mut in_test = vec![false; n_samples];
    for &idx in test {
        in_test[idx] = true;
    }
    (0..n_samples).filter(|&idx| !in_test[idx]).collect()
}

/// Split `n_samples` indices into `n_splits` contiguous folds
///
/// The first `n_samples % n_splits` folds receive one extra sample. With
/// `shuffle`, the indices are permuted before being cut into folds.
pub fn k_fold_split(
    n_samples: usize,
    n_splits: usize,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<Vec<Split>> {
    check_n_splits(n_splits, n_samples)?;

    let mut indices: Vec<usize> = (0..n_samples).collect();
    if shuffle {
        indices.shuffle(&mut make_rng(seed));
    }

    let fold_size = n_samples / n_splits;
    let remainder = n_samples % n_splits;

    let mut folds = Vec::with_capacity(n_splits);
    let mut start = 0;
    for i in 0..n_splits {
        let size = fold_size + usize::from(i < remainder);
        let mut test: Vec<usize> = indices[start..start + size].to_vec();
        test.sort_unstable();
        let train = complement(n_samples, &test);
        folds.push((train, test));
        start += size;
    }

    Ok(folds)
}

/// Split indices into folds that preserve the class proportions of `y`
///
/// Samples of each class are dealt round-robin across the folds, continuing
/// where the previous class stopped so fold sizes stay balanced.
pub fn stratified_k_fold_split(
    y: &[f64],
    n_splits: usize,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<Vec<Split>> {
    let n_samples = y.len();
    check_n_splits(n_splits, n_samples)?;

    let mut classes: Vec<f64> = Vec::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    for (idx, &label) in y.iter().enumerate() {
        match classes.iter().position(|&c| c == label) {
            Some(pos) => members[pos].push(idx),
            None => {
                classes.push(label);
                members.push(vec![idx]);
            }
        }
    }

    if let Some(smallest) = members.iter().map(Vec::len).min() {
        if smallest < n_splits {
            log::warn!(
                "least populated class has {} members, fewer than n_splits={}",
                smallest,
                n_splits
            );
        }
    }

    let mut rng = make_rng(seed);
    let mut test_folds: Vec<Vec<usize>> = vec![Vec::new(); n_splits];
    let mut next_fold = 0;
    for class_members in members.iter_mut() {
        if shuffle {
            class_members.shuffle(&mut rng);
        }
        for &idx in class_members.iter() {
            test_folds[next_fold].push(idx);
            next_fold = (next_fold + 1) % n_splits;
        }
    }

    Ok(test_folds
        .into_iter()
        .map(|mut test| {
            test.sort_unstable();
            let train = complement(n_samples, &test);
            (train, test)
        })
        .collect())
}

/// Cross-validation strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CvStrategy {
    /// Plain K-fold
    KFold {
        n_splits: usize,
        #[serde(default)]
        shuffle: bool,
        #[serde(default)]
        seed: Option<u64>,
    },
    /// K-fold preserving class proportions of the target
    StratifiedKFold {
        n_splits: usize,
        #[serde(default)]
        shuffle: bool,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl CvStrategy {
    /// Unshuffled K-fold with `n_splits` folds
    pub fn k_fold(n_splits: usize) -> Self {
        CvStrategy::KFold {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    /// Unshuffled stratified K-fold with `n_splits` folds
    pub fn stratified(n_splits: usize) -> Self {
        CvStrategy::StratifiedKFold {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    /// Number of folds
    pub fn n_splits(&self) -> usize {
        match self {
            CvStrategy::KFold { n_splits, .. } | CvStrategy::StratifiedKFold { n_splits, .. } => {
                *n_splits
            }
        }
    }

    /// Generate the splits for target `y`
    pub fn split(&self, y: &[f64]) -> Result<Vec<Split>> {
        match *self {
            CvStrategy::KFold {
                n_splits,
                shuffle,
                seed,
            } => k_fold_split(y.len(), n_splits, shuffle, seed),
            CvStrategy::StratifiedKFold {
                n_splits,
                shuffle,
                seed,
            } => stratified_k_fold_split(y, n_splits, shuffle, seed),
        }
    }
}

impl Default for CvStrategy {
    fn default() -> Self {
        CvStrategy::k_fold(5)
    }
}

impl CvStrategy {
    /// Unshuffled 5-fold split for `model`, stratified for classifiers
    pub fn default_for<M: SupervisedModel + ?Sized>(model: &M) -> Self {
        if model.is_classifier() {
            CvStrategy::stratified(5)
        } else {
            CvStrategy::default()
        }
    }
}

/// Training set sizes to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainSizes {
    /// Fractions of the largest training fold, each in `(0, 1]`
    Fractions(Vec<f64>),
    /// Absolute numbers of samples
    Absolute(Vec<usize>),
}

impl TrainSizes {
    /// `num` fractions evenly spaced from `start` to `stop`, both inclusive
    pub fn linspace(start: f64, stop: f64, num: usize) -> Self {
        let fractions = match num {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (num - 1) as f64;
                (0..num)
                    .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                    .collect()
            }
        };
        TrainSizes::Fractions(fractions)
    }

    /// Number of requested sizes
    pub fn len(&self) -> usize {
        match self {
            TrainSizes::Fractions(v) => v.len(),
            TrainSizes::Absolute(v) => v.len(),
        }
    }

    /// Whether no size was requested
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to absolute sizes given the largest usable training set
    ///
    /// Fractions are floored and clamped to `[1, n_max]`. The result is
    /// sorted and free of duplicates.
    pub fn translate(&self, n_max: usize) -> Result<Vec<usize>> {
        if self.is_empty() {
            return Err(Error::InvalidInput(
                "at least one training size is required".to_string(),
            ));
        }

        let mut sizes: Vec<usize> = match self {
            TrainSizes::Fractions(fractions) => {
                if let Some(bad) = fractions.iter().find(|&&f| !(f > 0.0 && f <= 1.0)) {
                    return Err(Error::InvalidValue(format!(
                        "training size fractions must be within (0, 1], got {}",
                        bad
                    )));
                }
                fractions
                    .iter()
                    .map(|&f| ((f * n_max as f64).floor() as usize).clamp(1, n_max.max(1)))
                    .collect()
            }
            TrainSizes::Absolute(sizes) => {
                if let Some(bad) = sizes.iter().find(|&&s| s == 0 || s > n_max) {
                    return Err(Error::InvalidValue(format!(
                        "training sizes must be within [1, {}], got {}",
                        n_max, bad
                    )));
                }
                sizes.clone()
            }
        };

        let requested = sizes.len();
        sizes.sort_unstable();
        sizes.dedup();
        if sizes.len() < requested {
            log::warn!(
                "removed {} duplicate training sizes; evaluating {} sizes instead of {}",
                requested - sizes.len(),
                sizes.len(),
                requested
            );
        }

        Ok(sizes)
    }
}

impl Default for TrainSizes {
    fn default() -> Self {
        TrainSizes::linspace(0.1, 1.0, 10)
    }
}

/// Settings forwarded to the learning-curve sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningCurveConfig {
    /// Cross-validation strategy; `None` picks [`CvStrategy::default_for`]
    /// the model
    pub cv: Option<CvStrategy>,
    /// Scoring rule; `None` uses the model's own `score`
    pub scoring: Option<Scoring>,
    /// Shuffle each training fold before taking prefixes
    pub shuffle: bool,
    /// Seed for `shuffle`
    pub random_state: Option<u64>,
}

impl Default for LearningCurveConfig {
    fn default() -> Self {
        LearningCurveConfig {
            cv: None,
            scoring: None,
            shuffle: false,
            random_state: None,
        }
    }
}

impl LearningCurveConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Strategy used for `model`
    pub fn cv_for<M: SupervisedModel + ?Sized>(&self, model: &M) -> CvStrategy {
        self.cv
            .clone()
            .unwrap_or_else(|| CvStrategy::default_for(model))
    }
}

/// Raw learning-curve scores
///
/// `train_scores[i][k]` is the training score of the model fitted on
/// `train_sizes[i]` samples of fold `k`; `test_scores` holds the matching
/// held-out scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    pub train_sizes: Vec<usize>,
    pub train_scores: Vec<Vec<f64>>,
    pub test_scores: Vec<Vec<f64>>,
}

fn take_rows(x: &[Vec<f64>], indices: &[usize]) -> Vec<Vec<f64>> {
    indices.iter().map(|&i| x[i].clone()).collect()
}

fn take(y: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| y[i]).collect()
}

fn check_samples(x: &[Vec<f64>], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}

/// Compute a learning curve
///
/// For every cross-validation split and every training size `n`, a fresh
/// clone of `model` is fitted on the first `n` training indices of the
/// split, then scored on those same samples and on the test fold. Errors
/// raised by the model propagate unchanged.
///
/// # Example
/// ```rust
/// use learnplot::ml::model_selection::{learning_curve, LearningCurveConfig, TrainSizes};
/// use learnplot::ml::models::LinearRegression;
///
/// let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
/// let y: Vec<f64> = x.iter().map(|r| 3.0 * r[0] - 1.0).collect();
///
/// let curve = learning_curve(
///     &LinearRegression::new(),
///     &x,
///     &y,
///     &TrainSizes::Fractions(vec![0.5, 1.0]),
///     &LearningCurveConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(curve.train_sizes, vec![8, 16]);
/// assert_eq!(curve.test_scores[0].len(), 5);
/// ```
pub fn learning_curve<M: SupervisedModel + Clone>(
    model: &M,
    x: &[Vec<f64>],
    y: &[f64],
    train_sizes: &TrainSizes,
    config: &LearningCurveConfig,
) -> Result<LearningCurve> {
    check_samples(x, y)?;

    let splits = config.cv_for(model).split(y)?;
    let n_max = splits.first().map(|(train, _)| train.len()).unwrap_or(0);
    let sizes = train_sizes.translate(n_max)?;

    log::debug!(
        "learning curve: {} samples, {} folds, sizes {:?}",
        x.len(),
        splits.len(),
        sizes
    );

    let mut rng = config.shuffle.then(|| make_rng(config.random_state));
    let mut train_scores = vec![Vec::with_capacity(splits.len()); sizes.len()];
    let mut test_scores = vec![Vec::with_capacity(splits.len()); sizes.len()];

    for (fold, (train, test)) in splits.iter().enumerate() {
        let mut train = train.clone();
        if let Some(rng) = rng.as_mut() {
            train.shuffle(rng);
        }

        let x_test = take_rows(x, test);
        let y_test = take(y, test);

        for (i, &n) in sizes.iter().enumerate() {
            let subset = &train[..n.min(train.len())];
            let x_train = take_rows(x, subset);
            let y_train = take(y, subset);

            let mut fitted = model.clone();
            fitted.fit(&x_train, &y_train)?;

            let train_score = metrics::score_with(&fitted, config.scoring, &x_train, &y_train)?;
            let test_score = metrics::score_with(&fitted, config.scoring, &x_test, &y_test)?;
            log::debug!(
                "fold {} size {}: train={:.4} test={:.4}",
                fold,
                n,
                train_score,
                test_score
            );

            train_scores[i].push(train_score);
            test_scores[i].push(test_score);
        }
    }

    Ok(LearningCurve {
        train_sizes: sizes,
        train_scores,
        test_scores,
    })
}

/// Evaluate a model by cross-validation
///
/// Returns one score per fold.
pub fn cross_val_score<M: SupervisedModel + Clone>(
    model: &M,
    x: &[Vec<f64>],
    y: &[f64],
    cv: &CvStrategy,
    scoring: Option<Scoring>,
) -> Result<Vec<f64>> {
    check_samples(x, y)?;

    let folds = cv.split(y)?;
    let mut scores = Vec::with_capacity(folds.len());

    for (train, test) in folds {
        let mut fold_model = model.clone();
        fold_model.fit(&take_rows(x, &train), &take(y, &train))?;
        let (x_test, y_test) = (take_rows(x, &test), take(y, &test));
        let score = metrics::score_with(&fold_model, scoring, &x_test, &y_test)?;
        scores.push(score);
    }

    Ok(scores)
}
