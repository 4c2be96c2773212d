use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use upload_alerts_core::lifecycle::{
    build_callback, parse_subscription_request, CallbackStatus, LifecycleEnvelope,
    LifecycleOutcome, RequestType, SubscriptionRequest, EMAIL_PROTOCOL,
};
use upload_alerts_core::HandlerError;

use crate::adapters::callback::CallbackSender;
use crate::adapters::subscriptions::SubscriptionClient;
use crate::config::SubscriptionManagerSettings;

const COMPONENT: &str = "subscription_manager";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifecycleReport {
    pub status: CallbackStatus,
    pub delivered: bool,
}

/// Answers one custom resource lifecycle event.
///
/// Attempts exactly one callback whenever the envelope can be read. A failed
/// upload is logged and reported through [`LifecycleReport::delivered`]
/// instead of failing the invocation, so the runtime never replays the event
/// and sends a second callback. Only an unreadable envelope is an error.
pub fn handle_lifecycle_event(
    event: &Value,
    settings: &SubscriptionManagerSettings,
    client: &impl SubscriptionClient,
    sender: &impl CallbackSender,
) -> Result<LifecycleReport, HandlerError> {
    info!(component = COMPONENT, event = "event_received", payload = %event);

    let envelope = LifecycleEnvelope::from_event(event).inspect_err(|failure| {
        error!(
            component = COMPONENT,
            event = "envelope_rejected",
            error = %failure,
        );
    })?;

    let outcome = decide_lifecycle_outcome(event, client);
    let document = build_callback(&envelope, &outcome, &settings.log_stream_name);

    let delivered = match sender.send_callback(&envelope.response_url, &document.to_body()) {
        Ok(()) => {
            info!(
                component = COMPONENT,
                event = "callback_sent",
                request_id = %envelope.request_id,
                status = ?document.status,
            );
            true
        }
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "callback_failed",
                request_id = %envelope.request_id,
                status = ?document.status,
                error = %failure,
            );
            false
        }
    };

    Ok(LifecycleReport {
        status: document.status,
        delivered,
    })
}

/// Parses and executes the request, folding every failure into
/// [`LifecycleOutcome::Failed`].
pub fn decide_lifecycle_outcome(
    event: &Value,
    client: &impl SubscriptionClient,
) -> LifecycleOutcome {
    let result = parse_subscription_request(event)
        .and_then(|request| reconcile_subscriptions(&request, client));

    match result {
        Ok(outcome) => outcome,
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "request_failed",
                error = %failure,
            );
            LifecycleOutcome::failed(&failure)
        }
    }
}

pub fn reconcile_subscriptions(
    request: &SubscriptionRequest,
    client: &impl SubscriptionClient,
) -> Result<LifecycleOutcome, HandlerError> {
    match request.request_type {
        RequestType::Create | RequestType::Update => {
            subscribe_all(&request.topic_arn, &request.email_addresses, client)
        }
        RequestType::Delete => unsubscribe_confirmed(&request.topic_arn, client),
    }
}

/// Subscribes in input order and stops at the first failure. Earlier
/// subscriptions are left in place.
fn subscribe_all(
    topic_arn: &str,
    email_addresses: &[String],
    client: &impl SubscriptionClient,
) -> Result<LifecycleOutcome, HandlerError> {
    let mut subscription_arns = Vec::with_capacity(email_addresses.len());
    for email in email_addresses.iter().filter(|email| !email.is_empty()) {
        info!(
            component = COMPONENT,
            event = "subscribing",
            endpoint = %email,
            topic_arn = %topic_arn,
        );
        let subscription_arn = client
            .subscribe(topic_arn, EMAIL_PROTOCOL, email)
            .map_err(HandlerError::ServiceCall)?;
        subscription_arns.push(subscription_arn);
    }

    Ok(LifecycleOutcome::Subscribed { subscription_arns })
}

fn unsubscribe_confirmed(
    topic_arn: &str,
    client: &impl SubscriptionClient,
) -> Result<LifecycleOutcome, HandlerError> {
    let mut removed = 0usize;
    let mut pending_skipped = 0usize;
    let mut next_token: Option<String> = None;

    loop {
        let page = client
            .list_subscriptions_page(topic_arn, next_token.as_deref())
            .map_err(HandlerError::ServiceCall)?;

        for subscription in page.subscriptions.iter().filter(|entry| entry.is_email()) {
            if subscription.is_pending() {
                // Pending confirmations cannot be removed through the API.
                warn!(
                    component = COMPONENT,
                    event = "pending_subscription_skipped",
                    endpoint = %subscription.endpoint,
                    topic_arn = %topic_arn,
                );
                pending_skipped += 1;
                continue;
            }

            info!(
                component = COMPONENT,
                event = "unsubscribing",
                endpoint = %subscription.endpoint,
                topic_arn = %topic_arn,
            );
            client
                .unsubscribe(&subscription.subscription_arn)
                .map_err(HandlerError::ServiceCall)?;
            removed += 1;
        }

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    Ok(LifecycleOutcome::Unsubscribed {
        removed,
        pending_skipped,
    })
}
