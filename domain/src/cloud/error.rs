//! Errors returned by cloud resource clients

use thiserror::Error;

use crate::core::error::PaginationExhaustionError;

/// Failure of a call against the cloud provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloudError {
    /// The provider answered with a service error; fields are verbatim.
    #[error("[{code}] {message}")]
    Service {
        code: String,
        message: String,
        status: Option<u16>,
        request_id: Option<String>,
    },

    /// The command line client failed without a structured service error
    #[error("OCI CLI exited with {}: {stderr}", describe_exit(.exit_code))]
    Cli {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to launch OCI CLI: {0}")]
    Launch(String),

    #[error("OCI CLI timed out after {0}s")]
    Timeout(u64),

    /// The response did not match the expected record shape
    #[error("Malformed provider response: {0}")]
    Decode(String),

    #[error(transparent)]
    Pagination(#[from] PaginationExhaustionError),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "signal".to_string(),
    }
}

impl CloudError {
    pub fn code(&self) -> &str {
        match self {
            CloudError::Service { code, .. } => code,
            CloudError::Cli { .. } => "CliError",
            CloudError::Launch(_) => "CliUnavailable",
            CloudError::Timeout(_) => "Timeout",
            CloudError::Decode(_) => "DecodeError",
            CloudError::Pagination(_) => "PaginationExhausted",
        }
    }

    pub fn message(&self) -> String {
        match self {
            CloudError::Service { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_is_code_and_message() {
        let err = CloudError::Service {
            code: "NotAuthorizedOrNotFound".to_string(),
            message: "Authorization failed or requested resource not found.".to_string(),
            status: Some(404),
            request_id: Some("abc/def".to_string()),
        };
        assert_eq!(err.code(), "NotAuthorizedOrNotFound");
        assert_eq!(
            err.to_string(),
            "[NotAuthorizedOrNotFound] Authorization failed or requested resource not found."
        );
    }

    #[test]
    fn test_cli_error_display() {
        let err = CloudError::Cli {
            exit_code: Some(2),
            stderr: "Error: Missing option(s) --compartment-id.".to_string(),
        };
        assert_eq!(err.code(), "CliError");
        assert!(err.message().contains("exited with 2"));
        assert!(err.message().contains("--compartment-id"));
    }

    #[test]
    fn test_pagination_error_code() {
        let err = CloudError::from(PaginationExhaustionError { max_pages: 3 });
        assert_eq!(err.code(), "PaginationExhausted");
        assert!(err.message().contains("3 pages"));
    }
}
