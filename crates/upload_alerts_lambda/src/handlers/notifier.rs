use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};
use upload_alerts_core::notification::NotificationMessage;
use upload_alerts_core::storage_event::parse_object_created_event;
use upload_alerts_core::HandlerError;

use crate::adapters::topic::TopicPublisher;
use crate::config::NotifierSettings;

const COMPONENT: &str = "notifier";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedNotification {
    pub message_id: String,
    pub message: NotificationMessage,
}

/// Turns one S3 object-created event into one SNS notification.
///
/// Never fails: every error becomes a 500 response carrying its description.
pub fn handle_storage_event(
    event: &Value,
    settings: &NotifierSettings,
    notification_time: &str,
    publisher: &impl TopicPublisher,
) -> HandlerResponse {
    info!(component = COMPONENT, event = "event_received", payload = %event);

    match publish_notification(event, settings, notification_time, publisher) {
        Ok(published) => {
            info!(
                component = COMPONENT,
                event = "notification_published",
                message_id = %published.message_id,
                bucket = %published.message.bucket_name,
                object_key = %published.message.object_key,
            );
            json_response(
                200,
                json!({
                    "message": "Notification sent successfully",
                    "messageId": published.message_id,
                }),
            )
        }
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "notification_failed",
                error = %failure,
            );
            json_response(
                500,
                json!({
                    "message": format!("Error sending notification: {failure}"),
                }),
            )
        }
    }
}

pub fn publish_notification(
    event: &Value,
    settings: &NotifierSettings,
    notification_time: &str,
    publisher: &impl TopicPublisher,
) -> Result<PublishedNotification, HandlerError> {
    let created = parse_object_created_event(event)?;
    let message =
        NotificationMessage::object_created(&settings.environment, &created, notification_time);

    let message_id = publisher
        .publish(
            &settings.topic_arn,
            &message.subject(),
            &message.to_pretty_json(),
        )
        .map_err(HandlerError::ServiceCall)?;

    Ok(PublishedNotification {
        message_id,
        message,
    })
}

fn json_response(status_code: u16, body: Value) -> HandlerResponse {
    HandlerResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: body.to_string(),
    }
}
