use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};

/// Number of recent requests the request queue keeps (one per minute of a day).
pub const DEFAULT_REQUEST_WINDOW: usize = 1440;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stop_words: Vec<String>,

    pub request_window: usize,      // RequestQueue history length
    pub batch_workers: usize,       // BatchProcessor pool size
    pub concurrent_buckets: usize,  // Lock shards for parallel scoring
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stop_words: Vec::new(),
            request_window: DEFAULT_REQUEST_WINDOW,
            batch_workers: num_cpus::get(),
            concurrent_buckets: 64,
        }
    }
}

impl Config {
    pub fn with_stop_words<I, S>(mut self, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = stop_words.into_iter().map(Into::into).collect();
        self
    }

    /// Load a config from JSON; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_window == 0 {
            return Err(Error::invalid_argument("request_window must be positive"));
        }
        if self.batch_workers == 0 {
            return Err(Error::invalid_argument("batch_workers must be positive"));
        }
        if self.concurrent_buckets == 0 {
            return Err(Error::invalid_argument("concurrent_buckets must be positive"));
        }
        Ok(())
    }
}
