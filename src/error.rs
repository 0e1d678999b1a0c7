//! Unified error types for migration-planner.
//!
//! The table-control core is total and never returns errors; these types
//! cover loading data exports, configuration, and wizard submission.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for migration-planner operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlannerError {
    /// Errors while loading an exported data set (applications, dependencies, bundles)
    #[error("Failed to load data: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors in table column or filter configuration
    #[error("Invalid table configuration: {context}")]
    Table {
        context: String,
        #[source]
        source: TableErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Unknown application id: {0}")]
    UnknownApplication(u64),
}

/// Specific table configuration error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TableErrorKind {
    #[error("Column '{0}' has no display name")]
    MissingColumnName(String),

    #[error("Duplicate column key '{0}'")]
    DuplicateColumn(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for migration-planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl PlannerError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a table configuration error with context
    pub fn table(context: impl Into<String>, source: TableErrorKind) -> Self {
        Self::Table {
            context: context.into(),
            source,
        }
    }

    /// Create an error for an application id missing from the inventory
    #[must_use]
    pub fn unknown_application(id: u64) -> Self {
        Self::load("resolving application", LoadErrorKind::UnknownApplication(id))
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for PlannerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::load(
            "YAML deserialization",
            LoadErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first, so a failure reads like
/// `"loading inventory: JSON deserialization"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PlannerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: PlannerError, new_ctx: &str) -> PlannerError {
    match err {
        PlannerError::Load {
            context: existing,
            source,
        } => PlannerError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PlannerError::Table {
            context: existing,
            source,
        } => PlannerError::Table {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PlannerError::Io {
            path,
            message,
            source,
        } => PlannerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PlannerError::Config(msg) => PlannerError::Config(chain_context(new_ctx, &msg)),
        PlannerError::Validation(msg) => PlannerError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| PlannerError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| PlannerError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::unknown_application(42);
        let display = err.to_string();
        assert!(display.contains("load"), "unexpected message: {display}");

        let err = PlannerError::table(
            "column names",
            TableErrorKind::MissingColumnName("name".into()),
        );
        assert!(err.to_string().contains("column names"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PlannerError::io("/path/to/applications.json", io_err);

        assert!(err.to_string().contains("/path/to/applications.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(PlannerError::load("base", LoadErrorKind::InvalidJson("eof".into())))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(PlannerError::Load { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(PlannerError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        match none_value.context_none("missing value") {
            Err(PlannerError::Validation(msg)) => assert_eq!(msg, "missing value"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert_eq!(Some(3).context_none("unused").ok(), Some(3));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: PlannerError = serde_json::from_str::<u32>("not json")
            .map_err(PlannerError::from)
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Load {
                source: LoadErrorKind::InvalidJson(_),
                ..
            }
        ));
    }
}
