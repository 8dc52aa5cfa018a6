//! Pipeline Fingerprints
//!
//! Derives the cache key for a pipeline configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// == Pipeline Config ==
/// Everything about a compilation request that shapes its generator pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Output assembly path; distinguishes projects sharing one host
    pub output_path: String,
    /// Generators and transforms, in execution order
    #[serde(default)]
    pub generators: Vec<String>,
    /// Parse options such as language version or preprocessor symbols
    #[serde(default)]
    pub parse_options: BTreeMap<String, String>,
    /// Non-source inputs visible to generators
    #[serde(default)]
    pub additional_files: Vec<String>,
}

impl PipelineConfig {
    /// Creates a config for `output_path` with no generators or options.
    pub fn new(output_path: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generators.push(generator.into());
        self
    }

    pub fn with_parse_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parse_options.insert(name.into(), value.into());
        self
    }

    pub fn with_additional_file(mut self, path: impl Into<String>) -> Self {
        self.additional_files.push(path.into());
        self
    }

    /// Validates the config before it reaches the driver.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.output_path.trim().is_empty() {
            return Some("Output path cannot be empty".to_string());
        }
        None
    }
}

// == Fingerprint ==
/// Computes the cache key for `config`.
///
/// The key is a lowercase hex SHA-256 over a length-prefixed encoding of each
/// field, so no two distinct configs can share a byte stream. Generator and
/// additional-file order is significant; parse options are hashed in key order.
pub fn fingerprint(config: &PipelineConfig) -> String {
    let mut hasher = Sha256::new();

    write_field(&mut hasher, config.output_path.as_bytes());

    write_len(&mut hasher, config.generators.len());
    for generator in &config.generators {
        write_field(&mut hasher, generator.as_bytes());
    }

    write_len(&mut hasher, config.parse_options.len());
    for (name, value) in &config.parse_options {
        write_field(&mut hasher, name.as_bytes());
        write_field(&mut hasher, value.as_bytes());
    }

    write_len(&mut hasher, config.additional_files.len());
    for path in &config.additional_files {
        write_field(&mut hasher, path.as_bytes());
    }

    hex::encode(hasher.finalize())
}

fn write_len(hasher: &mut Sha256, len: usize) {
    hasher.update((len as u64).to_le_bytes());
}

fn write_field(hasher: &mut Sha256, bytes: &[u8]) {
    write_len(hasher, bytes.len());
    hasher.update(bytes);
}
