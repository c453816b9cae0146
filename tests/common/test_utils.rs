//! Test utilities for temporary files, datasets and stub models

#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use learnplot::{Error, Result, SupervisedModel};

static TEST_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Generate a unique test file path in the system temp directory
pub fn test_temp_path(test_name: &str, extension: &str) -> PathBuf {
    let counter = TEST_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "learnplot_test_{}_{}_{}.{}",
        test_name,
        std::process::id(),
        counter,
        extension
    );
    env::temp_dir().join(filename)
}

/// RAII wrapper for temporary test files with automatic cleanup
pub struct TempTestFile {
    path: PathBuf,
}

impl TempTestFile {
    pub fn new(test_name: &str, extension: &str) -> Self {
        TempTestFile {
            path: test_temp_path(test_name, extension),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempTestFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Temporary directory removed on drop
pub struct TempTestDir {
    dir: tempfile::TempDir,
}

impl TempTestDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(TempTestDir {
            dir: tempfile::Builder::new().prefix("learnplot_test").tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Simple LCG so datasets are reproducible without a seeded RNG
fn lcg(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    (*state >> 33) as f64 / (u32::MAX as f64)
}

/// `y = 2 x0 - x1 + 0.5` plus a little noise
pub fn linear_dataset(n_samples: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut state = 42;
    let mut x = Vec::with_capacity(n_samples);
    let mut y = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let x0 = lcg(&mut state) * 10.0;
        let x1 = lcg(&mut state) * 5.0;
        let noise = (lcg(&mut state) - 0.5) * 0.2;
        x.push(vec![x0, x1]);
        y.push(2.0 * x0 - x1 + 0.5 + noise);
    }
    (x, y)
}

/// Two classes split by `x0 + x1 > 1`
pub fn binary_dataset(n_samples: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut state = 7;
    let mut x = Vec::with_capacity(n_samples);
    let mut y = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let x0 = lcg(&mut state);
        let x1 = lcg(&mut state);
        x.push(vec![x0, x1]);
        y.push(if x0 + x1 > 1.0 { 1.0 } else { 0.0 });
    }
    (x, y)
}

/// Always predicts the same value and reports a fixed score
#[derive(Debug, Clone)]
pub struct ConstantModel {
    pub value: f64,
    pub fitted_on: usize,
}

impl ConstantModel {
    pub fn new(value: f64) -> Self {
        ConstantModel {
            value,
            fitted_on: 0,
        }
    }
}

impl SupervisedModel for ConstantModel {
    fn fit(&mut self, x: &[Vec<f64>], _y: &[f64]) -> Result<()> {
        self.fitted_on = x.len();
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        Ok(vec![self.value; x.len()])
    }

    fn score(&self, _x: &[Vec<f64>], _y: &[f64]) -> Result<f64> {
        Ok(self.value)
    }
}

/// Fails to fit once the training set reaches `limit` samples
#[derive(Debug, Clone)]
pub struct FailingModel {
    pub limit: usize,
}

impl SupervisedModel for FailingModel {
    fn fit(&mut self, x: &[Vec<f64>], _y: &[f64]) -> Result<()> {
        if x.len() >= self.limit {
            return Err(Error::Model(format!("cannot fit {} samples", x.len())));
        }
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        Ok(vec![0.0; x.len()])
    }
}
