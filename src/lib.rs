//! # Burn Text Eval
//!
//! Batch text classification inference and evaluation: import a labeled dataset, clean it, run a
//! pretrained sequence classifier over it in batches and score the predictions.
#![forbid(unsafe_code)]

/// Datasets
pub mod datasets;

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Evaluation
pub mod evaluation;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

/// Error macros
#[macro_use]
extern crate anyhow;
