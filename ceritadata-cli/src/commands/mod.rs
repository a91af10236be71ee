//! CLI command implementations.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod data;
pub mod stories;
