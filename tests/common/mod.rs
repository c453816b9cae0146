//! Common test utilities module
//!
//! Provides shared utilities for tests including:
//! - Temporary file and directory management
//! - Deterministic synthetic datasets
//! - Small models with predictable scores

pub mod test_utils;

#[allow(unused_imports)]
pub use test_utils::{
    binary_dataset, linear_dataset, test_temp_path, ConstantModel, FailingModel, TempTestDir,
    TempTestFile,
};
