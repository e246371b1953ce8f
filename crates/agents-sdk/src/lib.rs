//! # Agent Platform SDK
//!
//! A Rust SDK for a hosted agentic-AI platform that serves chat completions
//! through a shared LLM gateway or per-model deployments, and runs agents as
//! asynchronous jobs resolved by polling.
//!
//! ## Features
//!
//! - Endpoint resolution between the shared gateway and specific deployments,
//!   tolerant of every base-URL shape callers supply
//! - Submit/poll/resolve driver for the asynchronous agent job protocol,
//!   with an optional poll deadline
//! - Type-safe request and response handling
//! - Builder pattern for configuration; no ambient environment reads
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agents_sdk::Client;
//! use agents_core::JobRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), agents_sdk::Error> {
//!     let client = Client::builder()
//!         .base_url("https://app.example.com")
//!         .api_token("your-api-token")
//!         .build()?;
//!
//!     let outcome = client
//!         .run_agent("custom-model-id", &JobRequest::from_prompt("Hello!"))
//!         .await?;
//!
//!     println!("{}", outcome.into_text());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod client;
mod config;
pub mod endpoint;
mod error;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use endpoint::EndpointConfig;
pub use error::{Error, Result};

// Re-export core types for convenience
pub use agents_core::{
    ChatCompletion, ChatRequest, JobHandle, JobOutcome, JobRequest, JobStatus, Message,
    MessageRole,
};
