//! # Streaming Cursor
//!
//! [`ValueStream`] is the caller's handle on an open `Stream` call. Elements are yielded
//! in the order the server produced them and each one is observed exactly once.
//!
//! The underlying HTTP/2 stream is owned in an `Option` and dropped as soon as the call
//! reaches a terminal state: the server closing it, the first error, an explicit
//! [`ValueStream::cancel`], or the cursor itself being dropped. After that `next`
//! only returns `None`.
use super::TransportError;
use crate::value::Value;
use futures_util::Stream;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tonic::Streaming;

/// An open, non-restartable sequence of values produced by a streaming query.
#[derive(Debug)]
pub struct ValueStream {
    name: String,
    inner: Option<Streaming<Value>>,
    received: usize,
}

impl ValueStream {
    pub(crate) fn new(name: String, inner: Streaming<Value>) -> Self {
        Self {
            name,
            inner: Some(inner),
            received: 0,
        }
    }

    /// The query this stream belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many elements have been delivered so far.
    pub fn received(&self) -> usize {
        self.received
    }

    /// `true` once the stream completed, failed or was cancelled.
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Waits for the next element.
    ///
    /// Returns `None` once the server closes the stream. A transport failure is
    /// returned once and closes the stream.
    pub async fn next(&mut self) -> Option<Result<Value, TransportError>> {
        futures_util::future::poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }

    /// Stops the subscription and releases the underlying stream.
    pub fn cancel(mut self) {
        self.release("cancelled");
    }

    /// Drains the stream, handing every element to `f` until it breaks.
    ///
    /// Breaking cancels the stream and is not an error. Returns the number of
    /// elements delivered.
    pub async fn for_each_until<F>(mut self, mut f: F) -> Result<usize, TransportError>
    where
        F: FnMut(Value) -> ControlFlow<()>,
    {
        while let Some(item) = self.next().await {
            if f(item?).is_break() {
                let received = self.received;
                self.cancel();
                return Ok(received);
            }
        }
        Ok(self.received)
    }

    fn release(&mut self, reason: &'static str) {
        if self.inner.take().is_some() {
            tracing::debug!(
                query = %self.name,
                received = self.received,
                reason,
                "stream released"
            );
        }
    }
}

impl Stream for ValueStream {
    type Item = Result<Value, TransportError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };

        match ready!(Pin::new(inner).poll_next(cx)) {
            Some(Ok(value)) => {
                this.received += 1;
                tracing::trace!(query = %this.name, index = this.received - 1, "stream element");
                Poll::Ready(Some(Ok(value)))
            }
            Some(Err(status)) => {
                this.release("failed");
                Poll::Ready(Some(Err(TransportError::Status(status))))
            }
            None => {
                this.release("completed");
                Poll::Ready(None)
            }
        }
    }
}

impl Drop for ValueStream {
    fn drop(&mut self) {
        self.release("dropped");
    }
}
