//! Utility functions shared across the application.
//!
//! - [`encoding`] - Endpoint base64 encoding and hexadecimal link tokens
//! - [`client_ip`] - Client address extraction from HTTP requests
//! - [`timespan`] - Human-readable durations

pub mod client_ip;
pub mod encoding;
pub mod timespan;
