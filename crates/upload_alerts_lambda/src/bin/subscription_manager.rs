use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use upload_alerts_lambda::adapters::http_callback::HttpCallbackSender;
use upload_alerts_lambda::adapters::sns::SnsTopicClient;
use upload_alerts_lambda::config::SubscriptionManagerSettings;
use upload_alerts_lambda::handlers::subscriptions::{handle_lifecycle_event, LifecycleReport};
use upload_alerts_lambda::logging::init_logging;

struct RuntimeDependencies {
    settings: SubscriptionManagerSettings,
    sns: SnsTopicClient,
    callback: HttpCallbackSender,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<LifecycleReport, Error> {
    let report = handle_lifecycle_event(&event.payload, &deps.settings, &deps.sns, &deps.callback)?;
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        settings: SubscriptionManagerSettings::from_env(),
        sns: SnsTopicClient::new(aws_sdk_sns::Client::new(&aws_config)),
        callback: HttpCallbackSender::new(reqwest::Client::new()),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
