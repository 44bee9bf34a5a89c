//! # Generic Client
//!
//! This module implements the call dispatcher for the generic query service.
//!
//! Every query goes through one of two call shapes, chosen by the caller from what it
//! knows about the query name:
//!
//! 1. **[`GenericClient::call`]**: unary. Exactly one [`Value`] or one failure.
//! 2. **[`GenericClient::stream`]**: server streaming. A [`ValueStream`] cursor yielding
//!    values until the server closes it or the caller cancels.
//!
//! The dispatcher checks the request shape, hands it to the transport and returns the
//! raw values untouched. Deciding that a `BYTES` result is an amount, a hash or a JSON
//! document is left to the caller (see [`crate::queries`]). Transport failures are
//! surfaced as [`TransportError`] and never retried here.
//!
//! ## Example
//!
//! ```rust,no_run
//! use animagus_core::client::{GenericClient, Request};
//! use animagus_core::value::Value;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = GenericClient::connect("http://127.0.0.1:4000").await?;
//!
//! let request = Request::new("balance").param(Value::from_hex("0x1234")?);
//! let value = client.call(request).await?;
//! println!("{value}");
//! # Ok(())
//! # }
//! ```
mod stream;
mod types;

pub use stream::ValueStream;
pub use types::*;

use crate::BoxError;
use crate::grpc::client::{GrpcClient, GrpcRequestError};
use crate::value::Value;
use http_body::Body as HttpBody;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

/// Default address of the query service.
pub const DEFAULT_URL: &str = "http://127.0.0.1:4000";

/// Errors that can occur when connecting to the query service.
#[derive(Debug, thiserror::Error)]
pub enum ClientConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

/// A failure of the underlying channel or of the remote call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("gRPC client request error: '{0}'")]
    Request(#[from] GrpcRequestError),
    #[error("gRPC call failed with code {:?}: '{}'", .0.code(), .0.message())]
    Status(#[from] tonic::Status),
}

/// Errors that can occur during a generic call.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("Invalid request: '{0}'")]
    InvalidRequest(#[from] RequestError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Connection settings for [`GenericClient::connect_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The server URI (e.g., `http://127.0.0.1:4000`).
    pub url: String,
    /// Limit on establishing the connection.
    pub connect_timeout: Option<Duration>,
    /// Deadline applied to every request.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: None,
            timeout: None,
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

/// The dispatcher for named queries.
#[derive(Debug, Clone)]
pub struct GenericClient<S = Channel> {
    grpc_client: GrpcClient<S>,
}

impl GenericClient<Channel> {
    /// Connects to the query service at `addr`.
    ///
    /// # Returns
    ///
    /// * `Ok(GenericClient)` - The connected client.
    /// * `Err(ClientConnectError)` - If the URL is invalid or connection fails.
    pub async fn connect(addr: &str) -> Result<Self, ClientConnectError> {
        Self::connect_with(ClientConfig::new(addr)).await
    }

    /// Connects using explicit [`ClientConfig`] settings.
    pub async fn connect_with(config: ClientConfig) -> Result<Self, ClientConnectError> {
        let mut endpoint = Endpoint::new(config.url.clone())
            .map_err(|e| ClientConnectError::InvalidUrl(config.url.clone(), e))?;

        if let Some(timeout) = config.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }
        if let Some(timeout) = config.timeout {
            endpoint = endpoint.timeout(timeout);
        }

        tracing::debug!(url = %config.url, "connecting");

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ClientConnectError::ConnectionFailed(config.url.clone(), e))?;

        Ok(Self::from_service(channel))
    }
}

impl<S> GenericClient<S>
where
    S: tonic::client::GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a client from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Self {
        Self {
            grpc_client: GrpcClient::new(service),
        }
    }

    /// Runs a unary query and returns its single result.
    pub async fn call(&mut self, request: Request) -> Result<Value, CallError> {
        request.validate()?;
        tracing::debug!(
            query = %request.name,
            params = request.params.len(),
            "dispatching unary call"
        );

        let (params, headers) = request.into_parts();
        let value = self
            .grpc_client
            .unary(params, headers)
            .await
            .map_err(TransportError::from)?
            .map_err(TransportError::from)?;

        Ok(value)
    }

    /// Opens a streaming query.
    ///
    /// A status returned by the server before the first element is reported here;
    /// failures after that come out of the returned [`ValueStream`].
    pub async fn stream(&mut self, request: Request) -> Result<ValueStream, CallError> {
        request.validate()?;
        tracing::debug!(
            query = %request.name,
            params = request.params.len(),
            "opening stream"
        );

        let name = request.name.clone();
        let (params, headers) = request.into_parts();
        let streaming = self
            .grpc_client
            .server_streaming(params, headers)
            .await
            .map_err(TransportError::from)?
            .map_err(TransportError::from)?;

        Ok(ValueStream::new(name, streaming))
    }
}
