//! Error types for machine configuration operations.

use thiserror::Error;

/// Primary error type for machine configuration operations.
#[derive(Error, Debug)]
pub enum McfgError {
    // Lookup errors
    #[error("No record with label '{label}'")]
    LabelNotFound { label: String },

    #[error("No record of type '{kind}'")]
    KindNotFound { kind: String },

    #[error("Record '{label}' has no property '{key}'")]
    MissingKey { label: String, key: String },

    #[error("Color table has no entry for tag '{tag}'")]
    TagNotFound { tag: String },

    // Store validation errors
    #[error("Duplicate label '{label}' in record store")]
    DuplicateLabel { label: String },

    #[error("Selector property '{key}' is not a label string")]
    SelectorNotALabel { key: String },

    // Color synthesis errors
    #[error("RGB components and power/feed cannot be combined in one color")]
    MixedColorModes,

    // Persistence errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Could not determine home directory")]
    NoHomeDir,

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl McfgError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::LabelNotFound { .. }
                | Self::KindNotFound { .. }
                | Self::MissingKey { .. }
                | Self::TagNotFound { .. }
                | Self::MixedColorModes
                | Self::ConfigNotFound { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::LabelNotFound { .. } => Some("Run: mcfg labels to list available records"),
            Self::KindNotFound { .. } => Some("Run: mcfg types to list record types"),
            Self::TagNotFound { .. } => Some("Run: mcfg color reset to restore the default table"),
            Self::MixedColorModes => Some("Pass either --red/--green/--blue or --power/--feed"),
            Self::ConfigNotFound { .. } => Some("Run: mcfg init"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using McfgError.
pub type Result<T> = std::result::Result<T, McfgError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| McfgError::Other(format!("{}: {e}", f().into())))
    }
}
