//! # Typed Queries
//!
//! Typed wrappers over the generic call for the queries the reference deployment
//! serves. The wire envelope is the same for all of them; what differs is the
//! parameter order and how the returned [`Value`] has to be read, and that knowledge
//! only exists here, keyed by query name.
//!
//! | Query                | Mode   | Params                                        | Result                        |
//! |----------------------|--------|-----------------------------------------------|-------------------------------|
//! | `balance`            | unary  | `BYTES lock_args`                             | `UINT64` capacity             |
//! | `balance` (UDT)      | unary  | `BYTES type_args, BYTES lock_args`            | `BYTES` Amount128             |
//! | `transfer`           | unary  | `BYTES type_args, BYTES from, BYTES to, UINT64 amount` | `BYTES` JSON document |
//! | `nervosdao_deposits` | stream | none                                          | `LIST [BYTES tx_hash, UINT64 index]` |
use crate::BoxError;
use crate::client::{CallError, GenericClient, Request, TransportError, ValueStream};
use crate::codec::FormatError;
use crate::codec::amount::Amount128;
use crate::codec::hex::bin_to_hex;
use crate::value::{Value, ValueError};
use http_body::Body as HttpBody;
use std::fmt;

pub const BALANCE: &str = "balance";
pub const TRANSFER: &str = "transfer";
pub const NERVOSDAO_DEPOSITS: &str = "nervosdao_deposits";

/// Errors that can occur while running a typed query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Call(#[from] CallError),
    #[error("Unexpected result shape: '{0}'")]
    Value(#[from] ValueError),
    #[error("Malformed result: '{0}'")]
    Format(#[from] FormatError),
    #[error("Result is not a valid JSON document: '{0}'")]
    Json(#[from] serde_json::Error),
}

impl From<TransportError> for QueryError {
    fn from(err: TransportError) -> Self {
        QueryError::Call(CallError::Transport(err))
    }
}

/// One NervosDAO deposit announced on the `nervosdao_deposits` stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositInfo {
    pub tx_hash: Vec<u8>,
    pub index: u64,
}

impl TryFrom<Value> for DepositInfo {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let tx_hash = value.child(0)?.as_bytes()?.to_vec();
        let index = value.child(1)?.as_u64()?;
        Ok(Self { tx_hash, index })
    }
}

impl fmt::Display for DepositInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New NervosDAO deposit at tx hash: {}, index: {}",
            bin_to_hex(&self.tx_hash),
            self.index
        )
    }
}

/// A [`ValueStream`] whose elements are read as [`DepositInfo`].
#[derive(Debug)]
pub struct DepositStream {
    inner: ValueStream,
}

impl DepositStream {
    /// Waits for the next deposit. A malformed element is reported but does not close the stream.
    pub async fn next(&mut self) -> Option<Result<DepositInfo, QueryError>> {
        let item = self.inner.next().await?;
        Some(
            item.map_err(QueryError::from)
                .and_then(|value| DepositInfo::try_from(value).map_err(QueryError::from)),
        )
    }

    pub fn received(&self) -> usize {
        self.inner.received()
    }

    pub fn cancel(self) {
        self.inner.cancel();
    }
}

impl<S> GenericClient<S>
where
    S: tonic::client::GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Total capacity of the cells guarded by the default lock with `lock_args`.
    pub async fn balance(&mut self, lock_args: &[u8]) -> Result<u64, QueryError> {
        let value = self.call(Request::new(BALANCE).param(lock_args)).await?;
        Ok(value.as_u64()?)
    }

    /// UDT amount held by `lock_args` for the token identified by `type_args`.
    ///
    /// The result is an Amount128: 16 bytes, two little-endian words, low word first.
    pub async fn udt_balance(
        &mut self,
        type_args: &[u8],
        lock_args: &[u8],
    ) -> Result<u128, QueryError> {
        let request = Request::new(BALANCE).param(type_args).param(lock_args);
        let value = self.call(request).await?;
        Ok(Amount128::from_value(&value)?.0)
    }

    /// Builds an unsigned UDT transfer. The server answers with the transaction as JSON bytes.
    pub async fn transfer(
        &mut self,
        type_args: &[u8],
        from_lock_args: &[u8],
        to_lock_args: &[u8],
        amount: u64,
    ) -> Result<serde_json::Value, QueryError> {
        let request = Request::new(TRANSFER)
            .param(type_args)
            .param(from_lock_args)
            .param(to_lock_args)
            .param(amount);
        let value = self.call(request).await?;
        Ok(serde_json::from_slice(value.as_bytes()?)?)
    }

    /// Subscribes to new NervosDAO deposits.
    pub async fn nervosdao_deposits(&mut self) -> Result<DepositStream, QueryError> {
        let inner = self.stream(Request::new(NERVOSDAO_DEPOSITS)).await?;
        Ok(DepositStream { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_info_reads_children_in_order() {
        let value = Value::list([Value::bytes(vec![0x11; 32]), Value::uint64(3)]);
        let info = DepositInfo::try_from(value).unwrap();

        assert_eq!(info.tx_hash, vec![0x11; 32]);
        assert_eq!(info.index, 3);
        assert!(info.to_string().ends_with(", index: 3"));
        assert!(info.to_string().contains("0x1111"));
    }

    #[test]
    fn deposit_info_rejects_reversed_children() {
        let value = Value::list([Value::uint64(3), Value::bytes(vec![0x11; 32])]);
        assert!(DepositInfo::try_from(value).is_err());
    }

    #[test]
    fn deposit_info_rejects_short_lists() {
        let value = Value::list([Value::bytes(vec![0x11; 32])]);
        assert_eq!(
            DepositInfo::try_from(value),
            Err(ValueError::MissingChild { index: 1, len: 1 })
        );
    }
}
