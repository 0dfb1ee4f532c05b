//! Typed error variants for the loupe-config crate.
//!
//! Only structural and system-level failures surface as errors: a missing
//! platform folder, an unreadable file, a JSON document that does not parse,
//! or a root element that is not an object. Individual field problems are
//! never errors; the decoder substitutes documented defaults for them.
//!
//! For convenience the public `Settings::load` and `Settings::save` APIs
//! return `anyhow::Result`; `ConfigError` values coerce automatically and can
//! be recovered with `downcast_ref` by callers that want to match on the
//! failure mode (e.g. to word a startup error dialog).

use thiserror::Error;

/// Errors that can occur while resolving, loading, or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required OS known folder (local app data) could not be resolved.
    #[error("failed to resolve system folder: {0}")]
    FolderResolution(String),

    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error on config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained text that is not valid JSON.
    #[error("JSON error in config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config file parsed, but its root element is not an object.
    #[error("config root element is not an object")]
    InvalidDocument,
}
