use thiserror::Error;

/// Failures a handler can hit during a single invocation.
///
/// Every variant is terminal for the invocation. Handlers convert them into
/// their own failure response instead of letting them reach the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("required configuration is missing: {0}")]
    ConfigurationMissing(String),

    #[error("event is missing field '{0}'")]
    MissingField(String),

    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error("{0}")]
    ServiceCall(String),
}

impl HandlerError {
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField(path.into())
    }

    pub fn service_call(message: impl Into<String>) -> Self {
        Self::ServiceCall(message.into())
    }
}
