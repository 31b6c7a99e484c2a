use thiserror::Error;

/// Primary error type for rtmatrix operations.
///
/// Two families exist: usage errors, raised when a caller asks for something
/// the configuration cannot provide, and configuration errors, raised while
/// reading the environment. An empty selection is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    // === Usage Errors ===
    /// The parameter was generated without an API level.
    #[error("no api level configured for runtime '{runtime}'")]
    MissingApiLevel { runtime: String },

    /// The parameter was expected to use the none runtime.
    #[error("expected the none runtime, got '{runtime}'")]
    NotNoneRuntime { runtime: String },

    /// The parameter was expected to use a CF runtime.
    #[error("expected a CF runtime, got '{runtime}'")]
    NotCfRuntime { runtime: String },

    /// The parameter was expected to use a DEX runtime.
    #[error("expected a DEX runtime, got '{runtime}'")]
    NotDexRuntime { runtime: String },

    /// API levels were requested but no runtime can carry them.
    #[error("api levels enabled without a DEX runtime filter or CF api levels")]
    ApiLevelsWithoutDexRuntimes,

    /// A custom runtime duplicates one of the catalog runtimes.
    #[error("custom runtime '{runtime}' is already in the runtime catalog")]
    DuplicateCustomRuntime { runtime: String },

    // === Configuration Errors ===
    /// A runtime name could not be resolved.
    #[error("unknown runtime name: '{name}'")]
    UnknownRuntime { name: String },

    /// A numeric API level is not part of the level catalog.
    #[error("unknown api level: {level}")]
    UnknownApiLevel { level: u32 },

    /// Configuration value is malformed.
    #[error("invalid configuration for {key}: {detail}")]
    InvalidConfig { key: String, detail: String },
}

/// Coarse classification of a [`MatrixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller bug: a precondition of the API was violated.
    Usage,
    /// Bad input from the environment or a config value.
    Configuration,
}

impl MatrixError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiLevel { .. }
            | Self::NotNoneRuntime { .. }
            | Self::NotCfRuntime { .. }
            | Self::NotDexRuntime { .. }
            | Self::ApiLevelsWithoutDexRuntimes
            | Self::DuplicateCustomRuntime { .. } => ErrorKind::Usage,
            Self::UnknownRuntime { .. }
            | Self::UnknownApiLevel { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Configuration,
        }
    }

    /// Whether the user can likely fix this by changing the environment.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingApiLevel { .. } => {
                Some("Enable api levels on the builder or guard on has_api_level()")
            }
            Self::ApiLevelsWithoutDexRuntimes => {
                Some("Add a DEX runtime filter or call enable_api_levels_for_cf()")
            }
            Self::UnknownRuntime { .. } => {
                Some("Use runtime names such as none, jdk11 or dex-14.0.0")
            }
            _ => None,
        }
    }

    /// Create a missing-api-level error.
    pub fn missing_api_level(runtime: impl Into<String>) -> Self {
        Self::MissingApiLevel {
            runtime: runtime.into(),
        }
    }

    /// Create an unknown-runtime error.
    pub fn unknown_runtime(name: impl Into<String>) -> Self {
        Self::UnknownRuntime { name: name.into() }
    }

    /// Create an invalid-config error.
    pub fn invalid_config(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            detail: detail.into(),
        }
    }
}

/// Result type alias using `MatrixError`.
pub type Result<T> = std::result::Result<T, MatrixError>;
