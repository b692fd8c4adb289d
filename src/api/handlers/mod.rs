//! HTTP handlers for API endpoints.

pub mod admin;
pub mod user_events;

#[cfg(test)]
mod tests;
