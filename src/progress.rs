//! Progress callbacks for long dataset walks.
//!
//! The library never draws anything itself. Commands hand in a [`Progress`]
//! implementation (the CLI uses `indicatif` bars) and the validation passes
//! report where they are.

/// Receives progress events from the dataset commands.
///
/// Every method defaults to doing nothing.
pub trait Progress {
    fn collection_start(&self, _collection: &str, _total_deployments: usize) {}

    fn deployment_start(&self, _collection: &str, _deployment: &str, _total_files: usize) {}

    fn file_done(&self, _collection: &str, _deployment: &str) {}

    fn deployment_done(&self, _collection: &str, _deployment: &str) {}

    fn collection_done(&self, _collection: &str) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}
