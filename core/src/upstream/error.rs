use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListConnections,
    ListActivities,
    ListComments,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::ListConnections => "listConnections",
            Operation::ListActivities => "listActivities",
            Operation::ListComments => "listComments",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamCause {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream responded with status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, thiserror::Error)]
#[error("{operation} failed: {cause}")]
pub struct UpstreamError {
    pub operation: Operation,
    #[source]
    pub cause: UpstreamCause,
}

impl UpstreamError {
    pub fn new(operation: Operation, cause: UpstreamCause) -> Self {
        UpstreamError { operation, cause }
    }

    pub fn other(operation: Operation, msg: impl Into<String>) -> Self {
        UpstreamError::new(operation, UpstreamCause::Other(msg.into()))
    }
}
