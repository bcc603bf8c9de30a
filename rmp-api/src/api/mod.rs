//! HTTP API handlers for rmp-api

pub mod dispatch;
pub mod health;

pub use dispatch::dispatch;
pub use health::health;
