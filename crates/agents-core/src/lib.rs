//! # Agents Core
//!
//! Core types and wire shapes for the agent platform client.
//!
//! This crate provides the foundational types shared by the SDK and CLI:
//! - Chat request and response types (OpenAI-style wire shapes)
//! - Job model for asynchronous agent execution (handles, status, outcomes)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod job;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use job::{JobHandle, JobOutcome, JobRequest, JobStatus, JobStatusBody};
pub use request::{ChatRequest, ChatRequestBuilder, Message, MessageRole, RequestError};
pub use response::{ChatChoice, ChatCompletion, ResponseMessage, Usage};
