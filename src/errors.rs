use std::fmt;

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Database-related errors.
    DatabaseError(sqlx::Error),
    /// Invalid or missing configuration.
    ConfigError(String),
    /// Connection-level failure talking to a remote page.
    TransportError(String),
    /// The remote answered with anything other than 200.
    UnexpectedStatus {
        /// The requested URL.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },
    /// A candidate name that cannot be turned into a profile slug.
    MalformedName(String),
    /// An expected document region is absent or has too few elements.
    StructuralMismatch {
        /// The region that failed.
        region: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// Text where a number was expected.
    NumericCoercion {
        /// Field being coerced.
        field: &'static str,
        /// The offending text.
        text: String,
    },
    /// Internal error.
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// True for failures that mean "this page does not describe a usable profile".
    pub fn is_malformed_profile(&self) -> bool {
        match self {
            AppError::StructuralMismatch { .. } | AppError::NumericCoercion { .. } => true,
            AppError::WithContext { source, .. } => source.is_malformed_profile(),
            _ => false,
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            AppError::UnexpectedStatus { url, status } => {
                write!(f, "Unexpected status {} from {}", status, url)
            }
            AppError::MalformedName(name) => write!(f, "Malformed candidate name: {:?}", name),
            AppError::StructuralMismatch { region, reason } => {
                write!(f, "Structural mismatch in region '{}': {}", region, reason)
            }
            AppError::NumericCoercion { field, text } => {
                write!(f, "Cannot coerce {:?} to a number for field '{}'", text, field)
            }
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::DatabaseError(e) => Some(e),
            AppError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    /// Converts a `sqlx::Error` into an `AppError`.
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for sqlx::Error to add context
impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::DatabaseError(e)),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::DatabaseError(e)),
            context: f(),
        })
    }
}
