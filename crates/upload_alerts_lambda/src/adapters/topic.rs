pub trait TopicPublisher {
    /// Publishes one message and returns the service's message id.
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<String, String>;
}
