#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::{json, Value};
use upload_alerts_core::lifecycle::TopicSubscription;
use upload_alerts_lambda::adapters::callback::CallbackSender;
use upload_alerts_lambda::adapters::subscriptions::{SubscriptionClient, SubscriptionPage};
use upload_alerts_lambda::adapters::topic::TopicPublisher;

pub const TOPIC_ARN: &str = "arn:aws:sns:eu-west-1:123456789012:upload-alerts";
pub const RESPONSE_URL: &str =
    "https://cloudformation-custom-resource-response-euwest1.s3.amazonaws.com/signed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnsCall {
    Publish { subject: String, message: String },
    Subscribe(String),
    Unsubscribe(String),
    List(Option<String>),
}

/// In-memory SNS double that records every call in order.
pub struct FakeSns {
    calls: Mutex<Vec<SnsCall>>,
    pages: Vec<SubscriptionPage>,
    fail_subscribe_for: Option<String>,
    fail_unsubscribe_for: Option<String>,
    fail_list: bool,
    fail_publish: bool,
}

impl FakeSns {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            pages: Vec::new(),
            fail_subscribe_for: None,
            fail_unsubscribe_for: None,
            fail_list: false,
            fail_publish: false,
        }
    }

    pub fn with_pages(pages: Vec<SubscriptionPage>) -> Self {
        Self {
            pages,
            ..Self::new()
        }
    }

    pub fn failing_subscribe_for(endpoint: &str) -> Self {
        Self {
            fail_subscribe_for: Some(endpoint.to_string()),
            ..Self::new()
        }
    }

    pub fn failing_unsubscribe_for(pages: Vec<SubscriptionPage>, subscription_arn: &str) -> Self {
        Self {
            pages,
            fail_unsubscribe_for: Some(subscription_arn.to_string()),
            ..Self::new()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Self::new()
        }
    }

    pub fn failing_publish() -> Self {
        Self {
            fail_publish: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<SnsCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    fn record(&self, call: SnsCall) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }
}

impl TopicPublisher for FakeSns {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<String, String> {
        assert_eq!(topic_arn, TOPIC_ARN);
        self.record(SnsCall::Publish {
            subject: subject.to_string(),
            message: message.to_string(),
        });
        if self.fail_publish {
            return Err("failed to publish to sns: AuthorizationError".to_string());
        }
        Ok("5f0b3c0e-0000-4000-8000-000000000001".to_string())
    }
}

impl SubscriptionClient for FakeSns {
    fn subscribe(&self, topic_arn: &str, protocol: &str, endpoint: &str) -> Result<String, String> {
        assert_eq!(topic_arn, TOPIC_ARN);
        assert_eq!(protocol, "email");
        self.record(SnsCall::Subscribe(endpoint.to_string()));
        if self.fail_subscribe_for.as_deref() == Some(endpoint) {
            return Err(format!("failed to subscribe {endpoint}: InvalidParameter"));
        }
        Ok(format!("{TOPIC_ARN}:{endpoint}"))
    }

    fn unsubscribe(&self, subscription_arn: &str) -> Result<(), String> {
        self.record(SnsCall::Unsubscribe(subscription_arn.to_string()));
        if self.fail_unsubscribe_for.as_deref() == Some(subscription_arn) {
            return Err(format!("failed to unsubscribe {subscription_arn}: NotFound"));
        }
        Ok(())
    }

    fn list_subscriptions_page(
        &self,
        topic_arn: &str,
        next_token: Option<&str>,
    ) -> Result<SubscriptionPage, String> {
        assert_eq!(topic_arn, TOPIC_ARN);
        self.record(SnsCall::List(next_token.map(str::to_string)));
        if self.fail_list {
            return Err("failed to list subscriptions: Throttling".to_string());
        }
        let index = match next_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|value| value.parse::<usize>().ok())
                .expect("token should be page-N"),
        };
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone)]
pub struct SentCallback {
    pub url: String,
    pub document: Value,
}

pub struct RecordingCallbackSender {
    sent: Mutex<Vec<SentCallback>>,
    fail: bool,
}

impl RecordingCallbackSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentCallback> {
        self.sent.lock().expect("poisoned mutex").clone()
    }
}

impl CallbackSender for RecordingCallbackSender {
    fn send_callback(&self, response_url: &str, body: &[u8]) -> Result<(), String> {
        let document: Value = serde_json::from_slice(body).expect("callback body should be json");
        self.sent
            .lock()
            .expect("poisoned mutex")
            .push(SentCallback {
                url: response_url.to_string(),
                document,
            });
        if self.fail {
            return Err("failed to deliver custom resource response: 403".to_string());
        }
        Ok(())
    }
}

pub fn subscription(arn: &str, protocol: &str, endpoint: &str) -> TopicSubscription {
    TopicSubscription {
        subscription_arn: arn.to_string(),
        protocol: protocol.to_string(),
        endpoint: endpoint.to_string(),
    }
}

pub fn lifecycle_event(request_type: &str, properties: Value) -> Value {
    let mut event = json!({
        "RequestType": request_type,
        "ServiceToken": "arn:aws:lambda:eu-west-1:123456789012:function:subscription-manager",
        "ResponseURL": RESPONSE_URL,
        "StackId": "arn:aws:cloudformation:eu-west-1:123456789012:stack/upload-alerts/1a2b",
        "RequestId": "0f9e8d7c-request",
        "LogicalResourceId": "AlertEmailSubscriptions",
        "ResourceType": "Custom::EmailSubscriptions",
        "ResourceProperties": properties,
    });
    if request_type != "Create" {
        event["PhysicalResourceId"] = json!("2026/02/14/[$LATEST]first-stream");
    }
    event
}
