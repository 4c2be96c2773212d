use upload_alerts_core::HandlerError;

pub const TOPIC_ARN_VAR: &str = "SNS_TOPIC_ARN";
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
pub const LOG_STREAM_VAR: &str = "AWS_LAMBDA_LOG_STREAM_NAME";
const UNKNOWN_LOG_STREAM: &str = "unknown";

/// Settings the notifier needs before it can serve any event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierSettings {
    pub topic_arn: String,
    pub environment: String,
}

impl NotifierSettings {
    pub fn from_env() -> Result<Self, HandlerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HandlerError> {
        Ok(Self {
            topic_arn: required(&lookup, TOPIC_ARN_VAR)?,
            environment: required(&lookup, ENVIRONMENT_VAR)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionManagerSettings {
    pub log_stream_name: String,
}

impl SubscriptionManagerSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_stream_name: optional(&lookup, LOG_STREAM_VAR)
                .unwrap_or_else(|| UNKNOWN_LOG_STREAM.to_string()),
        }
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, HandlerError> {
    optional(lookup, name).ok_or_else(|| {
        HandlerError::ConfigurationMissing(format!("{name} must be configured"))
    })
}
