//! AWS-oriented adapters and the batch pipeline for sentiment scoring.
//!
//! This crate owns runtime integration details (S3 adapters, configuration,
//! logging, lexicon provisioning and the Lambda/one-shot entry points) on top of
//! the pure scoring primitives in `sentiment_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod runtime;
