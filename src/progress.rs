// src/progress.rs
/// Lightweight progress reporting used by the refresh chain.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of steps (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One provider or step produced a result.
    fn item_done(&mut self, _name: &str) {}

    /// One provider or step gave up; the chain moves on.
    fn item_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
