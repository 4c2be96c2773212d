use serde::{Deserialize, Serialize};

use crate::storage_event::ObjectCreatedEvent;

pub const OBJECT_CREATED_EVENT_TYPE: &str = "Object Created";

/// Body published to the alert topic for one uploaded object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationMessage {
    pub environment: String,
    pub event_type: String,
    pub bucket_name: String,
    pub object_key: String,
    pub object_size_bytes: u64,
    pub event_time: String,
    pub notification_time: String,
}

impl NotificationMessage {
    pub fn object_created(
        environment: impl Into<String>,
        event: &ObjectCreatedEvent,
        notification_time: impl Into<String>,
    ) -> Self {
        Self {
            environment: environment.into(),
            event_type: OBJECT_CREATED_EVENT_TYPE.to_string(),
            bucket_name: event.bucket_name.clone(),
            object_key: event.object_key.clone(),
            object_size_bytes: event.object_size_bytes,
            event_time: event.event_time.clone(),
            notification_time: notification_time.into(),
        }
    }

    pub fn subject(&self) -> String {
        notification_subject(&self.environment, &self.bucket_name)
    }

    /// Two-space indented JSON, the format email subscribers receive.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("notification message should serialize")
    }
}

pub fn notification_subject(environment: &str, bucket_name: &str) -> String {
    format!(
        "[{}] New object uploaded to {bucket_name}",
        environment.to_uppercase()
    )
}
