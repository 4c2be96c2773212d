use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::error::HandlerError;

/// Bucket and object metadata taken from the first record of an S3
/// object-created notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCreatedEvent {
    pub bucket_name: String,
    pub object_key: String,
    pub object_size_bytes: u64,
    pub event_time: String,
}

pub fn parse_object_created_event(event: &Value) -> Result<ObjectCreatedEvent, HandlerError> {
    let record = event
        .get("Records")
        .and_then(Value::as_array)
        .and_then(|records| records.first())
        .ok_or_else(|| HandlerError::missing_field("Records[0]"))?;

    let bucket_name = required_str(record, &["s3", "bucket", "name"])?;
    let raw_key = required_str(record, &["s3", "object", "key"])?;
    let event_time = required_str(record, &["eventTime"])?;

    let size = lookup(record, &["s3", "object", "size"])
        .ok_or_else(|| HandlerError::missing_field("Records[0].s3.object.size"))?;
    let object_size_bytes = size.as_u64().ok_or_else(|| {
        HandlerError::MalformedEvent(format!(
            "Records[0].s3.object.size must be a non-negative integer, got {size}"
        ))
    })?;

    Ok(ObjectCreatedEvent {
        bucket_name: bucket_name.to_string(),
        object_key: decode_object_key(raw_key),
        object_size_bytes,
        event_time: event_time.to_string(),
    })
}

/// Reverses the form-style encoding S3 applies to keys in event payloads:
/// `+` stands for a space and everything else is percent-encoded UTF-8.
pub fn decode_object_key(raw_key: &str) -> String {
    let spaced = raw_key.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, segment| current.get(*segment))
}

fn required_str<'a>(record: &'a Value, path: &[&str]) -> Result<&'a str, HandlerError> {
    lookup(record, path)
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::missing_field(format!("Records[0].{}", path.join("."))))
}
