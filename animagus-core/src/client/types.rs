use crate::proto::generic::GenericParams;
use crate::value::Value;

/// Errors detected on a [`Request`] before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("The query name cannot be empty")]
    EmptyName,
}

/// A named query with its ordered arguments.
///
/// The name selects server-side behavior; the envelope itself is the same for every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The query name (e.g. `balance`, `nervosdao_deposits`).
    pub name: String,
    /// Positional arguments, sent in this order.
    pub params: Vec<Value>,
    /// Custom gRPC metadata (headers) to attach to the request.
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Appends one positional argument.
    pub fn param(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Appends several positional arguments, keeping their order.
    pub fn params(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(values);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Checks the request can be dispatched.
    ///
    /// Parameters need no check here: a [`Value`] cannot be built malformed.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.name.trim().is_empty() {
            return Err(RequestError::EmptyName);
        }
        Ok(())
    }

    /// Splits the request into its wire envelope and its metadata.
    pub(crate) fn into_parts(self) -> (GenericParams, Vec<(String, String)>) {
        let params = GenericParams {
            name: self.name,
            params: self.params.into_iter().map(Into::into).collect(),
        };
        (params, self.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::ast;

    #[test]
    fn empty_names_are_rejected() {
        assert_eq!(Request::new("").validate(), Err(RequestError::EmptyName));
        assert_eq!(Request::new("  ").validate(), Err(RequestError::EmptyName));
        assert_eq!(Request::new("balance").validate(), Ok(()));
    }

    #[test]
    fn builder_keeps_parameter_order() {
        let request = Request::new("transfer")
            .param(vec![1u8])
            .params([Value::bytes(vec![2]), Value::bytes(vec![3])])
            .param(10u64);

        let (params, headers) = request.into_parts();
        assert_eq!(params.name, "transfer");
        assert!(headers.is_empty());
        assert_eq!(
            params.params,
            vec![
                ast::Value::from(Value::bytes(vec![1])),
                ast::Value::from(Value::bytes(vec![2])),
                ast::Value::from(Value::bytes(vec![3])),
                ast::Value::from(Value::uint64(10)),
            ]
        );
    }
}
