use chrono::{SecondsFormat, Utc};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use upload_alerts_lambda::adapters::sns::SnsTopicClient;
use upload_alerts_lambda::config::NotifierSettings;
use upload_alerts_lambda::handlers::notifier::{handle_storage_event, HandlerResponse};
use upload_alerts_lambda::logging::init_logging;

async fn handle_request(
    event: LambdaEvent<Value>,
    settings: &NotifierSettings,
    publisher: &SnsTopicClient,
) -> Result<HandlerResponse, Error> {
    let notification_time = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    Ok(handle_storage_event(
        &event.payload,
        settings,
        &notification_time,
        publisher,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();
    let settings = NotifierSettings::from_env()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let publisher = SnsTopicClient::new(aws_sdk_sns::Client::new(&aws_config));

    lambda_runtime::run(service_fn(|event| {
        handle_request(event, &settings, &publisher)
    }))
    .await
}
