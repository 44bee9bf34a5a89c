use animagus_core::{
    Value,
    client::{CallError, ClientConnectError, TransportError},
    queries::{DepositInfo, QueryError},
    tonic::Status,
};
use colored::*;
use std::fmt::Display;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// A capacity in shannons.
pub struct Capacity(pub u64);

/// A UDT amount.
pub struct UdtAmount(pub u128);

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<Value> for FormattedString {
    fn from(value: Value) -> Self {
        FormattedString::from(serde_json::Value::from(&value))
    }
}

impl From<DepositInfo> for FormattedString {
    fn from(deposit: DepositInfo) -> Self {
        FormattedString(deposit.to_string())
    }
}

impl From<Capacity> for FormattedString {
    fn from(Capacity(shannons): Capacity) -> Self {
        FormattedString(format!("{} {}", "Capacity:".green().bold(), shannons))
    }
}

impl From<UdtAmount> for FormattedString {
    fn from(UdtAmount(amount): UdtAmount) -> Self {
        FormattedString(format!("{} {}", "UDT amount:".green().bold(), amount))
    }
}

impl From<Status> for FormattedString {
    fn from(status: Status) -> Self {
        FormattedString(format!(
            "{} code={:?} message={:?}",
            "gRPC Failed:".red().bold(),
            status.code(),
            status.message()
        ))
    }
}

impl From<TransportError> for FormattedString {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(status) => FormattedString::from(status),
            err => FormattedString(format!("{}\n\n'{}'", "Transport Error:".red().bold(), err)),
        }
    }
}

impl From<CallError> for FormattedString {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Transport(err) => FormattedString::from(err),
            err => FormattedString(format!("{}\n\n'{}'", "Call Failed:".red().bold(), err)),
        }
    }
}

impl From<QueryError> for FormattedString {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Call(err) => FormattedString::from(err),
            err => FormattedString(format!("{}\n\n'{}'", "Query Failed:".red().bold(), err)),
        }
    }
}

impl From<ClientConnectError> for FormattedString {
    fn from(err: ClientConnectError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_render_as_json_with_hex_bytes() {
        colored::control::set_override(false);

        let value = Value::list([Value::bytes(vec![0xab, 0xcd]), Value::uint64(7)]);
        let FormattedString(out) = FormattedString::from(value);

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, serde_json::json!(["0xabcd", 7]));
    }

    #[test]
    fn call_statuses_render_like_plain_statuses() {
        colored::control::set_override(false);

        let err = CallError::Transport(TransportError::Status(Status::not_found("nope")));
        let FormattedString(out) = FormattedString::from(err);

        assert_eq!(out, "gRPC Failed: code=NotFound message=\"nope\"");
    }
}
