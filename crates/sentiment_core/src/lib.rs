//! Sentiment batch domain primitives.
//!
//! This crate owns the scoring policies, the lexicon engine, result records and
//! output key derivation. It intentionally excludes AWS SDK and runtime concerns,
//! which live in `sentiment_batch`.

pub mod contract;
pub mod lexicon;
pub mod scoring;
pub mod storage_keys;
