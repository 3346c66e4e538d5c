//! Error Types
//!
//! Nothing in the reveal path is fatal: an element whose resource never
//! arrives simply stays hidden. The errors here cover the two places where
//! a caller can get something wrong up front (building a controller outside
//! a runtime, handing in a malformed configuration) plus the optional
//! channel a loader can use to say why a load went nowhere.

use thiserror::Error;

/// Errors raised while setting up a controller.
#[derive(Debug, Error)]
pub enum Error {
    /// The controller needs a Tokio runtime to arm debounce timers and
    /// await load completions.
    #[error("no Tokio runtime is available on this thread")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// The JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a resource load did not complete.
///
/// Reported by a [`ResourceLoader`](crate::ResourceLoader) through
/// [`LoadCompletion::fail`](crate::LoadCompletion::fail). The element stays
/// in the triggered state either way; this only feeds the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The element carries no pending resource identifier.
    #[error("element has no pending resource")]
    MissingResource,

    /// The loader tried and gave up.
    #[error("failed to load `{resource}`: {reason}")]
    Failed { resource: String, reason: String },
}
