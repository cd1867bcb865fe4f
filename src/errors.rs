use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteGraphError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("adjacency invariant violated: {0}")]
    InvariantViolation(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RouteGraphError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        RouteGraphError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RouteGraphError::NotFound(msg.into())
    }

    pub fn invariant<T: Into<String>>(msg: T) -> Self {
        RouteGraphError::InvariantViolation(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        RouteGraphError::Io(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RouteGraphError::Serialization(msg.into())
    }
}
