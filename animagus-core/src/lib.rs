//! # Animagus Core
//!
//! `animagus-core` is the client library for Animagus generic query services. Such a
//! service exposes any number of named, parameterized queries (balances, transfers,
//! event subscriptions...) through one reusable call shape instead of one RPC method
//! per query.
//!
//! ## Key Components
//!
//! * **[`Value`]:** The tagged value carried by every argument and result: raw bytes,
//!   an unsigned 64-bit integer, or an ordered list of child values.
//! * **[`GenericClient`]:** The dispatcher. It wraps a name and arguments in a request
//!   and runs it either as a unary call or as a server stream ([`ValueStream`]).
//! * **[`codec`]:** The conversions every caller must reproduce to interoperate:
//!   hex strings <-> bytes and 128-bit amounts <-> 16 raw bytes.
//! * **[`queries`]:** Typed helpers for the queries of the reference deployment.
//!
//! ## Internal clients
//!
//! * **[`GrpcClient`](grpc::client::GrpcClient):** The thin `tonic` client performing
//!   the `Call` and `Stream` methods with a custom codec.
//! * **[`proto`]:** The wire messages, declared with `prost` derives.
//!
//! ## ValueCodec
//!
//! An implementation of `tonic::codec::Codec` that writes the request envelope and
//! validates every response into a [`Value`] on the fly.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod client;
pub mod codec;
pub mod grpc;
pub mod proto;
pub mod queries;
pub mod value;

pub use client::{GenericClient, Request, ValueStream};
pub use value::Value;

// Re-exports
pub use prost;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
