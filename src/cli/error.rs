//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::from(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app.root() {
                    ApplicationError::Domain(_) | ApplicationError::InvalidInteraction { .. } => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                    ApplicationError::AtLine { .. } => crate::exitcode::DATAERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_malformed_hierarchy_when_mapping_exit_code_then_dataerr() {
        let err = CliError::from(DomainError::malformed("HQ", "missing tradingName"));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_failed_script_line_when_mapping_exit_code_then_uses_inner_error() {
        let err = CliError::from(
            ApplicationError::Domain(DomainError::NodeNotFound("Nowhere".into())).at_line(7),
        );
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert!(err.to_string().starts_with("line 7: "));
    }

    #[test]
    fn given_usage_error_when_mapping_exit_code_then_usage() {
        let err = CliError::Usage("no snapshot".into());
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }
}
