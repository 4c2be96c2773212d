//! CloudFormation custom resource contracts for the email subscription
//! resource.
//!
//! Parsing is split in two: the [`LifecycleEnvelope`] holds what is needed to
//! answer the orchestrator at all, while [`SubscriptionRequest`] holds what is
//! needed to act. A broken request can still be answered with `FAILED`; a
//! broken envelope cannot be answered.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::HandlerError;

pub const EMAIL_PROTOCOL: &str = "email";
pub const PENDING_CONFIRMATION: &str = "PendingConfirmation";
pub const DELETED_SUBSCRIPTIONS_MESSAGE: &str = "Deleted subscriptions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Create" => Some(Self::Create),
            "Update" => Some(Self::Update),
            "Delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEnvelope {
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
}

impl LifecycleEnvelope {
    pub fn from_event(event: &Value) -> Result<Self, HandlerError> {
        serde_json::from_value(event.clone()).map_err(|error| {
            HandlerError::MalformedEvent(format!("invalid custom resource envelope: {error}"))
        })
    }
}

/// `EmailAddresses` arrives either as a JSON list or as one comma-separated
/// string, depending on how the template passes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EmailAddresses {
    List(Vec<String>),
    Joined(String),
}

impl EmailAddresses {
    pub fn normalize(&self) -> Vec<String> {
        let entries: Vec<&str> = match self {
            Self::List(values) => values.iter().map(String::as_str).collect(),
            Self::Joined(text) => text.split(',').collect(),
        };

        entries
            .into_iter()
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub request_type: RequestType,
    pub topic_arn: String,
    pub email_addresses: Vec<String>,
}

pub fn parse_subscription_request(event: &Value) -> Result<SubscriptionRequest, HandlerError> {
    let raw_request_type = event
        .get("RequestType")
        .ok_or_else(|| HandlerError::missing_field("RequestType"))?;
    let request_type = raw_request_type
        .as_str()
        .and_then(RequestType::parse)
        .ok_or_else(|| {
            HandlerError::MalformedEvent(format!(
                "RequestType must be one of Create, Update, Delete, got {raw_request_type}"
            ))
        })?;

    let properties = event
        .get("ResourceProperties")
        .ok_or_else(|| HandlerError::missing_field("ResourceProperties"))?
        .as_object()
        .ok_or_else(|| {
            HandlerError::MalformedEvent("ResourceProperties must be an object".to_string())
        })?;

    let topic_arn = properties
        .get("TopicArn")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            HandlerError::ConfigurationMissing("ResourceProperties.TopicArn".to_string())
        })?;

    let email_addresses = match properties.get("EmailAddresses") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value::<EmailAddresses>(value.clone())
            .map_err(|_| {
                HandlerError::MalformedEvent(
                    "EmailAddresses must be a list of strings or a comma-separated string"
                        .to_string(),
                )
            })?
            .normalize(),
    };

    Ok(SubscriptionRequest {
        request_type,
        topic_arn: topic_arn.to_string(),
        email_addresses,
    })
}

/// A subscription as reported by the topic listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSubscription {
    pub subscription_arn: String,
    pub protocol: String,
    pub endpoint: String,
}

impl TopicSubscription {
    pub fn is_email(&self) -> bool {
        self.protocol == EMAIL_PROTOCOL
    }

    pub fn is_pending(&self) -> bool {
        self.subscription_arn == PENDING_CONFIRMATION
    }
}

/// What a lifecycle invocation decided, before anything is sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleOutcome {
    Subscribed { subscription_arns: Vec<String> },
    Unsubscribed { removed: usize, pending_skipped: usize },
    Failed { error: String },
}

impl LifecycleOutcome {
    pub fn failed(error: &HandlerError) -> Self {
        let message = error.to_string();
        let error = if message.trim().is_empty() {
            "subscription request failed without an error description".to_string()
        } else {
            message
        };
        Self::Failed { error }
    }

    pub fn status(&self) -> CallbackStatus {
        match self {
            Self::Failed { .. } => CallbackStatus::Failed,
            _ => CallbackStatus::Success,
        }
    }

    pub fn data(&self) -> Value {
        match self {
            Self::Subscribed { subscription_arns } => json!({ "SubscriptionArns": subscription_arns }),
            Self::Unsubscribed { .. } => json!({ "Message": DELETED_SUBSCRIPTIONS_MESSAGE }),
            Self::Failed { error } => json!({ "Error": error }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallbackStatus {
    Success,
    Failed,
}

/// Response document uploaded to the pre-signed `ResponseURL`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CallbackDocument {
    pub status: CallbackStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: Map<String, Value>,
}

impl CallbackDocument {
    /// JSON bytes for the upload. Every field is a string, bool or JSON map,
    /// so encoding cannot fail.
    pub fn to_body(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("callback document should serialize")
    }
}

pub fn build_callback(
    envelope: &LifecycleEnvelope,
    outcome: &LifecycleOutcome,
    log_stream_name: &str,
) -> CallbackDocument {
    let log_pointer = format!("See the details in CloudWatch Log Stream: {log_stream_name}");
    let reason = match outcome {
        LifecycleOutcome::Failed { error } => format!("{error}. {log_pointer}"),
        _ => log_pointer,
    };

    let data = match outcome.data() {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    CallbackDocument {
        status: outcome.status(),
        reason,
        physical_resource_id: envelope
            .physical_resource_id
            .clone()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| log_stream_name.to_string()),
        stack_id: envelope.stack_id.clone(),
        request_id: envelope.request_id.clone(),
        logical_resource_id: envelope.logical_resource_id.clone(),
        no_echo: false,
        data,
    }
}
