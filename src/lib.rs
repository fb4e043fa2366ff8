//! Category Notifications - Per-category subscriptions for a discussion forum
//!
//! Users subscribe to forum categories. New topics and replies are fanned out
//! to each category's subscribers as in-app notifications, emails, or both,
//! depending on a site-wide setting read at dispatch time.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
