//! Typed error contract.
//!
//! Every fallible operation returns [`Result`]. Errors carry a stable dotted
//! code (see [`ErrorCode::as_str`]), a human message, structured details and
//! optional hints, and are rendered by the CLI as the `error` member of the
//! JSON response envelope.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    ValidationInvalidArgument,

    ConfigInvalidJson,
    ConfigInvalidValue,

    PathNotFound,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",
            ErrorCode::PathNotFound => "path.not_found",
            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

/// A suggested next step attached to an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: hint.into(),
        });
        self
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        message: impl Into<String>,
        id: Option<String>,
        hints: Option<Vec<String>>,
    ) -> Self {
        let field = field.into();
        let mut err = Self::new(
            ErrorCode::ValidationInvalidArgument,
            message,
            json!({ "field": field, "id": id }),
        );
        for hint in hints.unwrap_or_default() {
            err = err.with_hint(hint);
        }
        err
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ConfigInvalidJson,
            format!("Invalid config file {}: {}", path, err),
            json!({ "path": path, "line": err.line(), "column": err.column() }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let problem = problem.into();
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for '{}': {}", key, problem),
            json!({ "key": key, "value": value }),
        )
    }

    pub fn path_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::PathNotFound,
            format!("Path not found: {}", path),
            json!({ "path": path }),
        )
        .with_hint("Pass an existing source file or a directory to walk")
    }

    pub fn internal_io(message: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            message,
            json!({ "context": context }),
        )
    }

    pub fn internal_json(message: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            message,
            json!({ "context": context }),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Error {}
