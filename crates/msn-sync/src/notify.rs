//! Warning notifications for recovered read failures.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// What went wrong while reading one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A directory could not be listed.
    Listing,
    /// A file could not be fetched.
    Fetch,
    /// A file was fetched but its content could not be decoded.
    Decode,
}

impl WarningKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Fetch => "fetch",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure the reader recovered from by falling back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadWarning {
    pub path: String,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for ReadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{} failed for {path}: {}", self.kind, self.message)
    }
}

/// Receives warnings from a read in progress. Called concurrently.
pub trait WarningSink: Send + Sync {
    fn warn(&self, warning: ReadWarning);
}

/// Logs each warning as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, warning: ReadWarning) {
        tracing::warn!(
            path = %warning.path,
            kind = %warning.kind,
            "{}",
            warning.message
        );
    }
}

/// Buffers warnings for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<ReadWarning>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<ReadWarning> {
        std::mem::take(&mut *self.warnings.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, warning: ReadWarning) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning);
    }
}
