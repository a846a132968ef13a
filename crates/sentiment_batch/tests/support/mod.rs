#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use sentiment_batch::adapters::object_store::{ObjectListing, ObjectSource, OutcomeStore};
use sentiment_batch::config::FailureMode;
use sentiment_batch::handlers::pipeline::PipelineConfig;
use serde_json::Value;

pub const INPUT_BUCKET: &str = "raw-comments";
pub const OUTPUT_BUCKET: &str = "results-sentiment";

/// Small lexicon in the VADER file format.
pub const TEST_LEXICON: &str = "love\t3.2\t0.4\t[3, 3, 4, 3]\n\
                                terrible\t-2.1\t0.83\t[-2, -2, -3, -1]\n\
                                good\t1.9\t0.9\t[2, 1, 3, 2]\n\
                                bad\t-2.5\t0.67\t[-3, -2, -3, -2]\n";

/// Input bucket held in memory, listed in insertion order.
pub struct MemoryBucket {
    objects: Vec<(String, Vec<u8>)>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn with_text(mut self, key: &str, text: &str) -> Self {
        self.objects.push((key.to_string(), text.as_bytes().to_vec()));
        self
    }

    pub fn with_bytes(mut self, key: &str, body: &[u8]) -> Self {
        self.objects.push((key.to_string(), body.to_vec()));
        self
    }
}

impl ObjectSource for MemoryBucket {
    fn list_keys(&self) -> Result<ObjectListing, String> {
        Ok(ObjectListing {
            keys: self.objects.iter().map(|(key, _)| key.clone()).collect(),
            truncated: false,
        })
    }

    fn read_object(&self, key: &str) -> Result<Vec<u8>, String> {
        self.objects
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| format!("NoSuchKey: {key}"))
    }
}

/// Output bucket that records every write.
pub struct RecordingStore {
    writes: Mutex<HashMap<String, Vec<u8>>>,
    write_count: Mutex<usize>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            writes: Mutex::new(HashMap::new()),
            write_count: Mutex::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        *self.write_count.lock().expect("poisoned mutex")
    }

    pub fn body(&self, key: &str) -> Option<Vec<u8>> {
        self.writes
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .cloned()
    }

    pub fn json(&self, key: &str) -> Value {
        let body = self.body(key).expect("body should exist for key");
        serde_json::from_slice(&body).expect("body should be JSON")
    }
}

impl OutcomeStore for RecordingStore {
    fn write_object(&self, key: &str, body: &[u8]) -> Result<(), String> {
        *self.write_count.lock().expect("poisoned mutex") += 1;
        self.writes
            .lock()
            .expect("poisoned mutex")
            .insert(key.to_string(), body.to_vec());
        Ok(())
    }
}

pub fn pipeline_config(failure_mode: FailureMode) -> PipelineConfig {
    PipelineConfig {
        input_bucket: INPUT_BUCKET.to_string(),
        output_bucket: OUTPUT_BUCKET.to_string(),
        failure_mode,
        started_at: "2026-02-14T00:00:00Z".to_string(),
    }
}
