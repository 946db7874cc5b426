use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::ConfigError;

/// The error type for this application.
#[derive(Debug, Error)]
pub enum AppError {
    /// A name or description was rejected before anything touched the disk.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The target repository directory is already present.
    #[error("Repository already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// An external command in the creation sequence exited non-zero.
    /// `log` holds the whole operation log up to and including the failure.
    #[error("Command failed: {command}\n{output}")]
    CommandFailed {
        command: String,
        output: String,
        log: String,
    },

    /// A filesystem step after the commands started failed (populate, publish, authz).
    /// `log` holds the operation log up to the failing step.
    #[error("{step} failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: std::io::Error,
        log: String,
    },

    /// An I/O error occurred.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// The loaded configuration is not usable.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// The configuration sources could not be merged or extracted.
    #[error("Configuration Error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// The user cancelled the operation from a UI prompt.
    #[error("Operation cancelled")]
    OperationCancelled,
}

impl AppError {
    /// The operation log captured before the failure, if any.
    pub fn log(&self) -> Option<&str> {
        match self {
            AppError::CommandFailed { log, .. } | AppError::StepFailed { log, .. } => Some(log),
            _ => None,
        }
    }

    /// Errors the caller can fix by changing the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::AlreadyExists(_) | AppError::OperationCancelled)
    }

    /// 进程退出码：1 表示请求被拒绝，2 表示命令或 I/O 失败
    pub fn exit_code(&self) -> u8 {
        if self.is_rejection() { 1 } else { 2 }
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Figment(Box::new(err))
    }
}

// We will also define a uniform Result type for our application.
pub type AppResult<T> = Result<T, AppError>;
