//! AWS-oriented adapters and handlers for the serverless key-value kit.
//!
//! This crate owns runtime integration details (the DynamoDB document
//! store adapter, the concurrent batch dispatcher, Lambda handlers, and
//! logging initialization). Contract types, batch planning, and response
//! envelopes live in `kvkit_core`.

pub mod adapters;
pub mod handlers;
pub mod logging;

#[cfg(test)]
mod test_support;
