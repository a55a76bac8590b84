use std::net::AddrParseError;

use thiserror::Error;
use tonic::{Code, Status};
use university_core::{ErrorKind, RegistryError};

/// Error surface for server startup, configuration and runtime.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address '{value}': {source}")]
    InvalidAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("I/O error at {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub(crate) fn io_err(context: impl Into<String>, source: std::io::Error) -> ServerError {
    ServerError::Io {
        context: context.into(),
        source,
    }
}

/// Translate a registry error into the gRPC status sent to the caller.
///
/// The status message is the error's display text, unchanged.
pub fn registry_status(err: &RegistryError) -> Status {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::AlreadyExists => Status::already_exists(message),
        ErrorKind::NotFound => Status::not_found(message),
        ErrorKind::Internal => Status::internal(message),
    }
}

/// Errors returned by [`crate::UniversityClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("gRPC transport error: {0}")]
    Transport(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<Status> for ClientError {
    fn from(status: Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::AlreadyExists => ClientError::AlreadyExists(message),
            Code::NotFound => ClientError::NotFound(message),
            Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
                ClientError::Transport(message)
            }
            _ => ClientError::Internal(message),
        }
    }
}

impl From<tonic::transport::Error> for ClientError {
    fn from(err: tonic::transport::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
