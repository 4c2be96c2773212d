//! AWS-oriented adapters and handlers for the upload alert Lambdas.
//!
//! This crate owns runtime integration details (Lambda handlers, SNS and
//! callback adapters, environment configuration). Event parsing and the
//! response contracts live in `upload_alerts_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
