use aws_sdk_sns::error::DisplayErrorContext;
use upload_alerts_core::lifecycle::TopicSubscription;

use crate::adapters::subscriptions::{SubscriptionClient, SubscriptionPage};
use crate::adapters::topic::TopicPublisher;

/// SNS-backed implementation of the publish and subscription adapters.
///
/// Calls block the current worker thread, so this must run inside a
/// multi-threaded tokio runtime.
#[derive(Clone)]
pub struct SnsTopicClient {
    client: aws_sdk_sns::Client,
}

impl SnsTopicClient {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

impl TopicPublisher for SnsTopicClient {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<String, String> {
        let client = self.client.clone();
        let topic_arn = topic_arn.to_string();
        let subject = subject.to_string();
        let message = message.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map_err(|error| {
                        format!("failed to publish to sns: {}", DisplayErrorContext(&error))
                    })
                    .and_then(|output| {
                        output.message_id().map(str::to_string).ok_or_else(|| {
                            "sns publish response did not include a MessageId".to_string()
                        })
                    })
            })
        })
    }
}

impl SubscriptionClient for SnsTopicClient {
    fn subscribe(&self, topic_arn: &str, protocol: &str, endpoint: &str) -> Result<String, String> {
        let client = self.client.clone();
        let topic_arn = topic_arn.to_string();
        let protocol = protocol.to_string();
        let endpoint = endpoint.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .subscribe()
                    .topic_arn(topic_arn)
                    .protocol(protocol)
                    .endpoint(endpoint.clone())
                    .send()
                    .await
                    .map_err(|error| {
                        format!(
                            "failed to subscribe {endpoint}: {}",
                            DisplayErrorContext(&error)
                        )
                    })
                    .and_then(|output| {
                        output.subscription_arn().map(str::to_string).ok_or_else(|| {
                            format!(
                                "sns subscribe response for {endpoint} did not include a SubscriptionArn"
                            )
                        })
                    })
            })
        })
    }

    fn unsubscribe(&self, subscription_arn: &str) -> Result<(), String> {
        let client = self.client.clone();
        let subscription_arn = subscription_arn.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .unsubscribe()
                    .subscription_arn(subscription_arn.clone())
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to unsubscribe {subscription_arn}: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }

    fn list_subscriptions_page(
        &self,
        topic_arn: &str,
        next_token: Option<&str>,
    ) -> Result<SubscriptionPage, String> {
        let client = self.client.clone();
        let topic_arn = topic_arn.to_string();
        let next_token = next_token.map(str::to_string);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .list_subscriptions_by_topic()
                    .topic_arn(topic_arn)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map(|output| SubscriptionPage {
                        subscriptions: output
                            .subscriptions()
                            .iter()
                            .map(|subscription| TopicSubscription {
                                subscription_arn: subscription
                                    .subscription_arn()
                                    .unwrap_or_default()
                                    .to_string(),
                                protocol: subscription.protocol().unwrap_or_default().to_string(),
                                endpoint: subscription.endpoint().unwrap_or_default().to_string(),
                            })
                            .collect(),
                        next_token: output.next_token().map(str::to_string),
                    })
                    .map_err(|error| {
                        format!(
                            "failed to list topic subscriptions: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}
