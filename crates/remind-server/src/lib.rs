//! # remind-server
//!
//! Axum HTTP server for the reminder lifecycle service.
//!
//! - REST endpoints: create batch, time-range query, throttle, delete, cancel
//! - Health check endpoint
//! - Webhook-based cancellation event delivery via `reqwest`
//! - Graceful shutdown via `tokio::signal`

#![deny(unsafe_code)]

pub mod config;
pub mod dto;
pub mod error;
pub mod health;
pub mod server;
pub mod webhook;

pub use config::ServerConfig;
pub use server::{AppState, RemindServer};
pub use webhook::WebhookPublisher;
