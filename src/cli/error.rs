//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl CliError {
    /// An empty search result rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CliError::Infra(InfraError::Application(ApplicationError::NotFound { .. }))
        )
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                    crate::exitcode::NOINPUT
                }
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Json { .. } => crate::exitcode::DATAERR,
                InfraError::Application(e) => match e {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Domain(_) | ApplicationError::NotFound { .. } => {
                        crate::exitcode::DATAERR
                    }
                },
            },
        }
    }
}
