//! Runtime-agnostic primitives for the serverless key-value kit.
//!
//! This crate owns the write-operation contract, batch planning, and the
//! API Gateway response envelope. It has no AWS dependencies; the
//! `kvkit_lambda` crate supplies the store adapters and Lambda wiring.

pub mod batching;
pub mod contract;
pub mod response;
