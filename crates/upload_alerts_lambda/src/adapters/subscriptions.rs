use upload_alerts_core::lifecycle::TopicSubscription;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPage {
    pub subscriptions: Vec<TopicSubscription>,
    pub next_token: Option<String>,
}

pub trait SubscriptionClient {
    /// Returns the subscription ARN, or the service's pending marker for
    /// endpoints that still need to confirm.
    fn subscribe(&self, topic_arn: &str, protocol: &str, endpoint: &str) -> Result<String, String>;

    fn unsubscribe(&self, subscription_arn: &str) -> Result<(), String>;

    fn list_subscriptions_page(
        &self,
        topic_arn: &str,
        next_token: Option<&str>,
    ) -> Result<SubscriptionPage, String>;
}
