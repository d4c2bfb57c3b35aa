use std::fmt::Display;
use tracing_subscriber::util::TryInitError;
use woohoo_protocol::error::Error;

use crate::config::ConfigError;
use crate::services::ServiceError;
use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError(pub String);

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ClientError {}

impl From<Error> for ClientError {
    fn from(e: Error) -> Self {
        ClientError(e.0)
    }
}

impl From<StorageError> for ClientError {
    fn from(e: StorageError) -> Self {
        ClientError(e.to_string())
    }
}

impl From<ServiceError> for ClientError {
    fn from(e: ServiceError) -> Self {
        ClientError(e.to_string())
    }
}

impl From<ConfigError> for ClientError {
    fn from(e: ConfigError) -> Self {
        ClientError(e.to_string())
    }
}

impl From<TryInitError> for ClientError {
    fn from(e: TryInitError) -> Self {
        ClientError(e.to_string())
    }
}

impl From<String> for ClientError {
    fn from(e: String) -> Self {
        ClientError(e)
    }
}

impl From<&str> for ClientError {
    fn from(e: &str) -> Self {
        ClientError(e.to_string())
    }
}
