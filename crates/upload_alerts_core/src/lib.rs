//! Shared upload-alert domain primitives.
//!
//! This crate owns event parsing, message formatting and the custom resource
//! request/response contracts. It intentionally excludes AWS SDK and Lambda
//! runtime concerns, which live in `upload_alerts_lambda`.

pub mod error;
pub mod lifecycle;
pub mod notification;
pub mod storage_event;

pub use error::HandlerError;
