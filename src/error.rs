//! Error types for the descriptor object model.
//!
//! Scenarios are built from hardcoded, well-formed literals, so every variant
//! here is a fail-fast condition: there is no recovery path.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// construct/resolve on a type that was never registered
    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("type `{0}` is already registered")]
    DuplicateType(String),

    /// parents must be registered before their children
    #[error("type `{type_name}` extends `{parent}`, which is not registered")]
    UnknownParent {
        type_name: String,
        parent: String,
    },

    #[error("`{type_name}` constructor takes {expected} argument(s), got {found}")]
    Arity {
        type_name: String,
        expected: usize,
        found: usize,
    },

    /// a stored field or parent argument refers to an undeclared parameter
    #[error("`{type_name}` constructor has no parameter `{parameter}`")]
    UnboundParameter {
        type_name: String,
        parameter: String,
    },

    #[error("`{type_name}` constructor declares parameter `{parameter}` twice")]
    DuplicateParameter {
        type_name: String,
        parameter: String,
    },

    #[error("`{type_name}` did not initialize inherited field `{field}` before its own")]
    BaseNotInitialized {
        type_name: String,
        field: String,
    },

    #[error("`{type_name}` instance has no field `{field}`")]
    MissingField {
        type_name: String,
        field: String,
    },

    #[error("no method `{method}` on `{type_name}` or its parents")]
    UnknownMethod {
        type_name: String,
        method: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
