use thiserror::Error;

/// Result type alias using ExtApiError
pub type Result<T> = std::result::Result<T, ExtApiError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// surfaced by the core. Each kind maps to a stable error code that the
/// transport layer can use for status mapping and that tests assert on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Load-time
    /// Structural violation in the source document
    MalformedDocument,
    /// Duplicate hash or qualified name detected while indexing
    IndexConflict,

    // Request-time
    UnknownBuiltin,
    UnknownField,
    UnknownConfiguration,
    NotFound,
    EmptyQuery,
    /// A request arrived before any model was installed
    NoModelInstalled,

    // Generic
    Serialization,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedDocument => "ERR_MALFORMED_DOCUMENT",
            ExErrorKind::IndexConflict => "ERR_INDEX_CONFLICT",
            ExErrorKind::UnknownBuiltin => "ERR_UNKNOWN_BUILTIN",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::UnknownConfiguration => "ERR_UNKNOWN_CONFIGURATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::EmptyQuery => "ERR_EMPTY_QUERY",
            ExErrorKind::NoModelInstalled => "ERR_NO_MODEL_INSTALLED",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the error was caused by the caller's request rather than by
    /// the loaded document or the core itself
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::UnknownBuiltin
                | ExErrorKind::UnknownField
                | ExErrorKind::UnknownConfiguration
                | ExErrorKind::NotFound
                | ExErrorKind::EmptyQuery
        )
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging. Produced from [`ExtApiError`] at the engine boundary.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    configuration: Option<String>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            configuration: None,
            message: String::new(),
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (a qualified name, a hash, ...)
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add configuration context
    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the valid alternatives (used for UnknownConfiguration)
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the configuration context, if any
    pub fn configuration(&self) -> Option<&str> {
        self.configuration.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the valid alternatives, if any
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(configuration) = &self.configuration {
            write!(f, " (configuration: {})", configuration)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for extapi operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtApiError {
    // ===== Load-time Errors =====
    /// The source document violates a structural rule
    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// Two entities claim the same key in one index namespace
    #[error("Index conflict: {namespace} '{key}' is declared by both {first} and {second}")]
    IndexConflict {
        namespace: String,
        key: String,
        first: String,
        second: String,
    },

    // ===== Request-time Errors =====
    /// Builtin name is not indexed
    #[error("Unknown builtin: {name}")]
    UnknownBuiltin { name: String },

    /// Field is not present in the builtin under the requested configuration
    #[error("Unknown field {field} in builtin {builtin}")]
    UnknownField { builtin: String, field: String },

    /// Configuration is outside the set enumerated by the document
    #[error("Unknown configuration: {configuration} (available: {available:?})")]
    UnknownConfiguration {
        configuration: String,
        available: Vec<String>,
    },

    /// Lookup produced no entity
    #[error("{what} not found: {key}")]
    NotFound { what: String, key: String },

    /// Query text was blank
    #[error("Query is empty")]
    EmptyQuery,

    /// No snapshot has been installed yet
    #[error("No model installed")]
    NoModelInstalled,

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ExtApiError {
    /// Shorthand for a [`ExtApiError::MalformedDocument`]
    pub fn malformed(reason: impl Into<String>) -> Self {
        ExtApiError::MalformedDocument {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ExtApiError::NotFound`]
    pub fn not_found(what: impl Into<String>, key: impl Into<String>) -> Self {
        ExtApiError::NotFound {
            what: what.into(),
            key: key.into(),
        }
    }

    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            ExtApiError::MalformedDocument { .. } => ExErrorKind::MalformedDocument,
            ExtApiError::IndexConflict { .. } => ExErrorKind::IndexConflict,
            ExtApiError::UnknownBuiltin { .. } => ExErrorKind::UnknownBuiltin,
            ExtApiError::UnknownField { .. } => ExErrorKind::UnknownField,
            ExtApiError::UnknownConfiguration { .. } => ExErrorKind::UnknownConfiguration,
            ExtApiError::NotFound { .. } => ExErrorKind::NotFound,
            ExtApiError::EmptyQuery => ExErrorKind::EmptyQuery,
            ExtApiError::NoModelInstalled => ExErrorKind::NoModelInstalled,
            ExtApiError::Serialization { .. } => ExErrorKind::Serialization,
            ExtApiError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from ExtApiError to ExError
impl From<ExtApiError> for ExError {
    fn from(err: ExtApiError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            ExtApiError::MalformedDocument { .. } => ExError::new(kind)
                .with_op("install_model")
                .with_message(message),

            ExtApiError::IndexConflict { key, .. } => ExError::new(kind)
                .with_op("build_index")
                .with_entity(key)
                .with_message(message),

            ExtApiError::UnknownBuiltin { name } => ExError::new(kind)
                .with_entity(name)
                .with_message("Builtin not found"),

            ExtApiError::UnknownField { builtin, field } => ExError::new(kind)
                .with_entity(format!("{}.{}", builtin, field))
                .with_message("Field not present in builtin"),

            ExtApiError::UnknownConfiguration {
                configuration,
                available,
            } => ExError::new(kind)
                .with_configuration(configuration)
                .with_candidates(available)
                .with_message("Configuration is not declared by the document"),

            ExtApiError::NotFound { key, .. } => {
                ExError::new(kind).with_entity(key).with_message(message)
            }

            ExtApiError::EmptyQuery => ExError::new(kind)
                .with_op("route")
                .with_message("Query text is blank"),

            ExtApiError::NoModelInstalled => {
                ExError::new(kind).with_message("No model has been installed")
            }

            ExtApiError::Serialization { message } | ExtApiError::Internal { message } => {
                ExError::new(kind).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ExtApiError
impl From<serde_json::Error> for ExtApiError {
    fn from(err: serde_json::Error) -> Self {
        ExtApiError::Serialization {
            message: err.to_string(),
        }
    }
}
