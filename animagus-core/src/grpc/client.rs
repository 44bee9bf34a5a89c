//! # Generic gRPC Client
//!
//! This module wraps a standard `tonic` client to provide the two call shapes of
//! `generic.GenericService`. It is agnostic to the query being run.
//!
//! ## How it works
//!
//! The [`GrpcClient`] utilizes the [`super::codec::ValueCodec`] to handle serialization.
//! It does not know what a query means; it simply ensures the connection is ready,
//! attaches metadata and passes the `GenericParams` envelope to the codec.
//!
//! ## Features
//!
//! * **Fixed Pathing**: Both methods live on the same service, so the HTTP/2 paths are constants.
//! * **Metadata Handling**: Converts standard Rust string tuples into Tonic's `MetadataMap` for headers.
//! * **Access Patterns**: Provides Unary and Server Streaming calls, the only two the service offers.
use super::codec::ValueCodec;
use crate::BoxError;
use crate::proto::generic::{CALL_PATH, GenericParams, STREAM_PATH};
use crate::value::Value;
use http::uri::PathAndQuery;
use http_body::Body as HttpBody;
use std::str::FromStr;
use tonic::{
    Streaming,
    client::GrpcService,
    metadata::{
        MetadataKey, MetadataValue,
        errors::{InvalidMetadataKey, InvalidMetadataValue},
    },
    transport::Channel,
};

#[derive(thiserror::Error, Debug)]
pub enum GrpcRequestError {
    #[error("Internal error, the client was not ready: '{0}'")]
    ClientNotReady(#[source] BoxError),
    #[error("Invalid metadata (header) key '{key}': '{source}'")]
    InvalidMetadataKey {
        key: String,
        source: InvalidMetadataKey,
    },
    #[error("Invalid metadata (header) value for key '{key}': '{source}'")]
    InvalidMetadataValue {
        key: String,
        source: InvalidMetadataValue,
    },
}

/// A client for the two methods of `generic.GenericService`.
#[derive(Debug, Clone)]
pub struct GrpcClient<S = Channel> {
    client: tonic::client::Grpc<S>,
}

impl<S> GrpcClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        let client = tonic::client::Grpc::new(service);
        Self { client }
    }

    /// Performs the Unary `Call` method (Single Request -> Single Value).
    ///
    /// # Returns
    /// * `Ok(Ok(Value))` - Successful RPC execution.
    /// * `Ok(Err(Status))` - RPC executed, but server returned an error.
    /// * `Err(GrpcRequestError)` - Failed to send request or connect.
    pub async fn unary(
        &mut self,
        params: GenericParams,
        headers: Vec<(String, String)>,
    ) -> Result<Result<Value, tonic::Status>, GrpcRequestError> {
        self.client
            .ready()
            .await
            .map_err(|e| GrpcRequestError::ClientNotReady(e.into()))?;

        let request = build_request(params, headers)?;

        match self
            .client
            .unary(request, PathAndQuery::from_static(CALL_PATH), ValueCodec)
            .await
        {
            Ok(response) => Ok(Ok(response.into_inner())),
            Err(status) => Ok(Err(status)),
        }
    }

    /// Performs the Server Streaming `Stream` method (Single Request -> Stream of Values).
    ///
    /// # Returns
    ///
    /// * `Ok(Ok(Streaming))` - The server accepted the subscription.
    /// * `Ok(Err(Status))` - RPC executed, but server returned an error.
    /// * `Err(GrpcRequestError)` - Failed to send request or connect.
    pub async fn server_streaming(
        &mut self,
        params: GenericParams,
        headers: Vec<(String, String)>,
    ) -> Result<Result<Streaming<Value>, tonic::Status>, GrpcRequestError> {
        self.client
            .ready()
            .await
            .map_err(|e| GrpcRequestError::ClientNotReady(e.into()))?;

        let request = build_request(params, headers)?;

        match self
            .client
            .server_streaming(request, PathAndQuery::from_static(STREAM_PATH), ValueCodec)
            .await
        {
            Ok(response) => Ok(Ok(response.into_inner())),
            Err(status) => Ok(Err(status)),
        }
    }
}

fn build_request<T>(
    payload: T,
    headers: Vec<(String, String)>,
) -> Result<tonic::Request<T>, GrpcRequestError> {
    let mut request = tonic::Request::new(payload);
    for (k, v) in headers {
        let key =
            MetadataKey::from_str(&k).map_err(|source| GrpcRequestError::InvalidMetadataKey {
                key: k.clone(),
                source,
            })?;
        let val = MetadataValue::from_str(&v)
            .map_err(|source| GrpcRequestError::InvalidMetadataValue { key: k, source })?;
        request.metadata_mut().insert(key, val);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_attaches_headers() {
        let request = build_request(
            GenericParams::default(),
            vec![("x-caller".to_string(), "tester".to_string())],
        )
        .unwrap();

        assert_eq!(
            request.metadata().get("x-caller").unwrap().to_str().unwrap(),
            "tester"
        );
    }

    #[test]
    fn build_request_rejects_invalid_keys() {
        let err = build_request(
            GenericParams::default(),
            vec![("bad key".to_string(), "v".to_string())],
        )
        .unwrap_err();

        assert!(matches!(err, GrpcRequestError::InvalidMetadataKey { key, .. } if key == "bad key"));
    }

    #[test]
    fn build_request_rejects_invalid_values() {
        let err = build_request(
            GenericParams::default(),
            vec![("x-caller".to_string(), "line\nbreak".to_string())],
        )
        .unwrap_err();

        assert!(matches!(err, GrpcRequestError::InvalidMetadataValue { .. }));
    }
}
