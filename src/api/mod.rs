//! HTTP API exposing read-only reporting queries over user events.

pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
