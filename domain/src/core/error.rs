//! Error taxonomy shared by the tool registry, the dispatch path and
//! the usage aggregation.

use std::fmt;

use thiserror::Error;

/// Two tool definitions were registered under the same name.
///
/// Raised while assembling the registry; it is a programming error and
/// aborts startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Duplicate tool name: '{name}'")]
pub struct DuplicateToolError {
    pub name: String,
}

/// A single problem found while checking tool arguments against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// A required field is absent or `null`
    Missing { field: String },
    /// A field is present with the wrong primitive type
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    /// A field that the tool does not declare
    Unknown { field: String },
}

impl FieldIssue {
    pub fn field(&self) -> &str {
        match self {
            FieldIssue::Missing { field }
            | FieldIssue::TypeMismatch { field, .. }
            | FieldIssue::Unknown { field } => field,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing { field } => write!(f, "missing required field '{}'", field),
            FieldIssue::TypeMismatch {
                field,
                expected,
                found,
            } => write!(f, "field '{}' expected {}, got {}", field, expected, found),
            FieldIssue::Unknown { field } => write!(f, "unknown field '{}'", field),
        }
    }
}

/// Tool arguments did not match the declared schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid arguments for '{tool}': {}", join_issues(.issues))]
pub struct SchemaValidationError {
    pub tool: String,
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The provider rejected or failed a call made by a tool handler.
///
/// `code` and `message` are the provider's own text, untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct ToolExecutionError {
    pub tool: String,
    pub code: String,
    pub message: String,
}

/// A page walk kept receiving continuation tokens past its bound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Pagination did not terminate within {max_pages} pages")]
pub struct PaginationExhaustionError {
    pub max_pages: usize,
}

/// Why a dispatched tool call produced no content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error("Operator declined '{tool}'")]
    ConfirmationDeclined { tool: String },

    #[error(transparent)]
    Execution(#[from] ToolExecutionError),
}

impl DispatchError {
    /// Error code reported back to the reasoning runtime
    pub fn code(&self) -> &str {
        match self {
            DispatchError::UnknownTool(_) => "NotFound",
            DispatchError::Schema(_) => "InvalidArgument",
            DispatchError::ConfirmationDeclined { .. } => "ConfirmationDeclined",
            DispatchError::Execution(e) => &e.code,
        }
    }

    /// Error message reported back to the reasoning runtime
    pub fn message(&self) -> String {
        match self {
            DispatchError::Execution(e) => e.message.clone(),
            other => other.to_string(),
        }
    }
}
