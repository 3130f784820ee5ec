//! Request-scoped domain types and the pure checks run before a summary is requested.

pub mod config;
pub mod credential;
pub mod models;
pub mod validation;
pub mod words;
