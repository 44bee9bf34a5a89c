//! # Generic Service
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide a server-side skeleton
//! of `generic.GenericService` for integration testing the `animagus` client.
//! It is not intended for production use.
//!
//! Implement [`GenericService`] and hand a [`GenericServiceServer`] either to
//! `tonic::transport::Server` or directly to the client as its service.
use animagus_core::proto::generic::{CALL_PATH, SERVICE_NAME, STREAM_PATH};
use std::sync::Arc;
use tokio_stream::Stream;
use tonic::codegen::{Body, BoxFuture, Context, Poll, Service, StdError, http};

pub use animagus_core::proto::{ast::Value, generic::GenericParams};

/// Server-side handlers of the two generic methods.
#[tonic::async_trait]
pub trait GenericService: Send + Sync + 'static {
    /// Server streaming response type for the `Stream` method.
    type StreamStream: Stream<Item = Result<Value, tonic::Status>> + Send + 'static;

    async fn call(
        &self,
        request: tonic::Request<GenericParams>,
    ) -> Result<tonic::Response<Value>, tonic::Status>;

    async fn stream(
        &self,
        request: tonic::Request<GenericParams>,
    ) -> Result<tonic::Response<Self::StreamStream>, tonic::Status>;
}

#[derive(Debug)]
pub struct GenericServiceServer<T> {
    inner: Arc<T>,
}

impl<T> GenericServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T> Clone for GenericServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct CallSvc<T>(Arc<T>);

impl<T: GenericService> tonic::server::UnaryService<GenericParams> for CallSvc<T> {
    type Response = Value;
    type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<GenericParams>) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { <T as GenericService>::call(&inner, request).await })
    }
}

struct StreamSvc<T>(Arc<T>);

impl<T: GenericService> tonic::server::ServerStreamingService<GenericParams> for StreamSvc<T> {
    type Response = Value;
    type ResponseStream = T::StreamStream;
    type Future = BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<GenericParams>) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { <T as GenericService>::stream(&inner, request).await })
    }
}

impl<T, B> Service<http::Request<B>> for GenericServiceServer<T>
where
    T: GenericService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::Body>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = Arc::clone(&self.inner);
        match req.uri().path() {
            CALL_PATH => Box::pin(async move {
                let mut grpc = tonic::server::Grpc::new(tonic_prost::ProstCodec::default());
                Ok(grpc.unary(CallSvc(inner), req).await)
            }),
            STREAM_PATH => Box::pin(async move {
                let mut grpc = tonic::server::Grpc::new(tonic_prost::ProstCodec::default());
                Ok(grpc.server_streaming(StreamSvc(inner), req).await)
            }),
            path => {
                let status = tonic::Status::unimplemented(format!("Unknown method: {path}"));
                Box::pin(async move { Ok(status.into_http()) })
            }
        }
    }
}

impl<T> tonic::server::NamedService for GenericServiceServer<T> {
    const NAME: &'static str = SERVICE_NAME;
}
