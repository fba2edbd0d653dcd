// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Runtime options, resolved once at startup and passed by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Directory holding the cache snapshots and the debug log.
    pub store_dir: PathBuf,
    /// Page listing the published duty documents.
    pub listing_url: String,
    /// Last resort when neither live extraction nor the cache can answer.
    pub use_sample_fallback: bool,
    pub log: LogOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        let store_dir = PathBuf::from(STORE_DIR);
        Self {
            log: LogOptions::in_dir(&store_dir),
            store_dir,
            listing_url: s!(LISTING_URL),
            use_sample_fallback: true,
        }
    }
}

impl PipelineOptions {
    /// Defaults, with `HOSPITAL_DUTY_STORE` / `HOSPITAL_DUTY_LISTING` applied.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(dir) = std::env::var_os(STORE_ENV).filter(|v| !v.is_empty()) {
            opts.set_store_dir(PathBuf::from(dir));
        }
        if let Ok(url) = std::env::var(LISTING_ENV) {
            if !url.trim().is_empty() {
                opts.listing_url = url.trim().to_string();
            }
        }
        opts
    }

    /// Move the store; the debug log follows it.
    pub fn set_store_dir(&mut self, dir: PathBuf) {
        self.log.file = Some(dir.join(LOG_FILE));
        self.store_dir = dir;
    }

    pub fn duty_cache_path(&self) -> PathBuf {
        self.store_dir.join(DUTY_CACHE_FILE)
    }

    pub fn shift_cache_path(&self) -> PathBuf {
        self.store_dir.join(SHIFT_CACHE_FILE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogOptions {
    /// `EnvFilter` directive used when `HOSPITAL_DUTY_LOG` is unset.
    pub directive: String,
    pub file: Option<PathBuf>,
    pub stderr: bool,
}

impl LogOptions {
    pub fn in_dir(dir: &std::path::Path) -> Self {
        Self {
            directive: s!(DEFAULT_LOG_DIRECTIVE),
            file: Some(dir.join(LOG_FILE)),
            stderr: false,
        }
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::in_dir(std::path::Path::new(STORE_DIR))
    }
}
