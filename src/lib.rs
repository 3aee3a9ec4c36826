#![deny(missing_docs)]

//! Core library for the docsum document summarization server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Text extraction from PDF and plain-text uploads.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization counters.
pub mod metrics;
/// Upload processing pipeline.
pub mod processing;
/// Summarization model clients.
pub mod summarization;
