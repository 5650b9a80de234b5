//! Networking layer for the browser shell.
//!
//! This crate handles:
//! - A blocking JSON HTTP client with a fixed request timeout
//! - The client for the repository content service

pub mod client;
pub mod content;

pub use client::{user_agent, ClientConfig, ClientError, HttpClient, HttpClientBuilder};
pub use content::ContentServiceClient;

#[cfg(test)]
pub(crate) mod test_support;
