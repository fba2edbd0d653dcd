// src/log.rs
//
// Logging goes through `tracing`. The crate keeps its short macro names
// (`logf!`, `logd!`, `logw!`, `loge!`) so call sites stay terse, and `init`
// installs a subscriber that appends to `<store>/debug.log`.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::consts::LOG_ENV;
use crate::config::options::LogOptions;

#[doc(hidden)]
pub use tracing as __tracing;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Only the first call has any effect.
pub fn init(opts: &LogOptions) {
    INSTALLED.get_or_init(|| install(opts));
}

fn install(opts: &LogOptions) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&opts.directive));

    let file_layer = opts
        .file
        .as_deref()
        .and_then(open_log_file)
        .map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    let stderr_layer = opts
        .stderr
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    // Someone else (a test harness, the host app) may already own the global
    // dispatcher; that is fine.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok()?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!(target: "hospital_duty", $($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!(target: "hospital_duty", $($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!(target: "hospital_duty", $($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!(target: "hospital_duty", $($arg)*)
    };
}
