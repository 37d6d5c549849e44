use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    Load,
    Create,
    Update,
    Delete,
}

impl RemoteOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only failure the client knows about: a call to the users resource did
/// not complete with a usable success response. Transport errors, non-2xx
/// statuses and undecodable bodies all land here.
#[derive(Debug, Error)]
#[error("remote {operation} call failed: {source:#}")]
pub struct RemoteCallError {
    pub operation: RemoteOperation,
    #[source]
    pub source: anyhow::Error,
}

impl RemoteCallError {
    pub fn new(operation: RemoteOperation, source: impl Into<anyhow::Error>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}
