pub mod callback;
pub mod http_callback;
pub mod sns;
pub mod subscriptions;
pub mod topic;
