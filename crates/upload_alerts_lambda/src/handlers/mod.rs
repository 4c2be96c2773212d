pub mod notifier;
pub mod subscriptions;
