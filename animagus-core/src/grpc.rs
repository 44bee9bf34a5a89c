//! # Generic gRPC Transport
//!
//! Low-level building blocks for talking to `generic.GenericService`.
//!
//! The service exposes exactly two methods whatever the query: a unary `Call` and a
//! server streaming `Stream`, both taking a `GenericParams` envelope. The components
//! here only move envelopes and typed values across `tonic`; they never look at the
//! query name or interpret the payloads.
pub mod client;
pub mod codec;
