//! # Typed Values
//!
//! [`Value`] is the single data type exchanged with the generic query service: every
//! request parameter and every result is one. It is a closed sum type mirroring the
//! flat `ast.Value` wire record (a discriminant plus one payload field).
//!
//! ## Wire mapping
//!
//! | Variant          | `t`      | populated field      |
//! |------------------|----------|----------------------|
//! | `Uint64(u)`      | `UINT64` | `u`                  |
//! | `Bytes(raw)`     | `BYTES`  | `raw`                |
//! | `List(children)` | `LIST`   | `children` (ordered) |
//! | `Bool(b)`        | `BOOL`   | `b`                  |
//! | `Nil`            | `NIL`    | nothing              |
//!
//! Converting into the wire type is infallible. Converting from it validates that the
//! discriminant is a data kind and that the populated field agrees with it.
use crate::codec::{FormatError, ParseNumberError, RangeError, hex, parse_unsigned};
use crate::proto::ast;
use crate::proto::ast::value::{Primitive, Type};
use std::fmt;

/// Errors produced when interpreting a [`Value`] or decoding one from the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("Expected a {expected} value, found {found}")]
    UnexpectedKind {
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("Value kind {0} is not a data kind")]
    UnsupportedKind(i32),
    #[error("A {kind} value carries a payload that does not match its kind")]
    MismatchedPayload { kind: ValueKind },
    #[error("No child at index {index}, the list has {len} children")]
    MissingChild { index: usize, len: usize },
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// The discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Uint64,
    Bytes,
    List,
    Bool,
    Nil,
}

impl ValueKind {
    fn wire_type(self) -> Type {
        match self {
            ValueKind::Uint64 => Type::Uint64,
            ValueKind::Bytes => Type::Bytes,
            ValueKind::List => Type::List,
            ValueKind::Bool => Type::Bool,
            ValueKind::Nil => Type::Nil,
        }
    }
}

impl From<Type> for ValueKind {
    fn from(t: Type) -> Self {
        match t {
            Type::Uint64 => ValueKind::Uint64,
            Type::Bytes => ValueKind::Bytes,
            Type::List => ValueKind::List,
            Type::Bool => ValueKind::Bool,
            Type::Nil => ValueKind::Nil,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_type().as_str_name())
    }
}

/// A typed argument or result of a generic call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Uint64(u64),
    Bytes(Vec<u8>),
    /// Ordered children. Position is meaningful: `[tx_hash, index]` is not `[index, tx_hash]`.
    List(Vec<Value>),
    Bool(bool),
    Nil,
}

impl Value {
    /// A `BYTES` value. Zero-length payloads are allowed.
    pub fn bytes(raw: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(raw.into())
    }

    /// A `UINT64` value.
    pub fn uint64(n: u64) -> Self {
        Value::Uint64(n)
    }

    /// A `UINT64` value from a wider signed integer, rejecting anything outside `0..=u64::MAX`.
    pub fn try_uint64(n: i128) -> Result<Self, RangeError> {
        if n < 0 {
            return Err(RangeError::Negative(n.to_string()));
        }
        u64::try_from(n)
            .map(Value::Uint64)
            .map_err(|_| RangeError::Overflow {
                input: n.to_string(),
                bits: 64,
            })
    }

    /// A `UINT64` value parsed from a decimal string.
    pub fn parse_uint64(input: &str) -> Result<Self, ParseNumberError> {
        parse_unsigned::<u64>(input, 64).map(Value::Uint64)
    }

    /// A `BYTES` value decoded from a hex string (optional `0x` prefix).
    pub fn from_hex(input: &str) -> Result<Self, FormatError> {
        hex::hex_to_bin(input).map(Value::Bytes)
    }

    /// A `LIST` value. The iteration order of `children` is preserved.
    pub fn list(children: impl IntoIterator<Item = Value>) -> Self {
        Value::List(children.into_iter().collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Uint64(_) => ValueKind::Uint64,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Bool(_) => ValueKind::Bool,
            Value::Nil => ValueKind::Nil,
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], ValueError> {
        match self {
            Value::Bytes(raw) => Ok(raw),
            other => Err(other.unexpected(ValueKind::Bytes)),
        }
    }

    pub fn as_u64(&self) -> Result<u64, ValueError> {
        match self {
            Value::Uint64(u) => Ok(*u),
            other => Err(other.unexpected(ValueKind::Uint64)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.unexpected(ValueKind::Bool)),
        }
    }

    pub fn children(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::List(children) => Ok(children),
            other => Err(other.unexpected(ValueKind::List)),
        }
    }

    /// Returns the child at `index` of a `LIST` value.
    pub fn child(&self, index: usize) -> Result<&Value, ValueError> {
        let children = self.children()?;
        children.get(index).ok_or(ValueError::MissingChild {
            index,
            len: children.len(),
        })
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, ValueError> {
        match self {
            Value::Bytes(raw) => Ok(raw),
            other => Err(other.unexpected(ValueKind::Bytes)),
        }
    }

    pub fn into_children(self) -> Result<Vec<Value>, ValueError> {
        match self {
            Value::List(children) => Ok(children),
            other => Err(other.unexpected(ValueKind::List)),
        }
    }

    fn unexpected(&self, expected: ValueKind) -> ValueError {
        ValueError::UnexpectedKind {
            expected,
            found: self.kind(),
        }
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint64(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(raw: Vec<u8>) -> Self {
        Value::Bytes(raw)
    }
}

impl From<&[u8]> for Value {
    fn from(raw: &[u8]) -> Self {
        Value::Bytes(raw.to_vec())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::list(iter)
    }
}

impl From<Value> for ast::Value {
    fn from(value: Value) -> Self {
        let t = value.kind().wire_type() as i32;
        match value {
            Value::Uint64(u) => scalar(t, Primitive::U(u)),
            Value::Bytes(raw) => scalar(t, Primitive::Raw(raw)),
            Value::Bool(b) => scalar(t, Primitive::B(b)),
            Value::Nil => ast::Value {
                t,
                primitive: None,
                children: Vec::new(),
            },
            Value::List(children) => ast::Value {
                t,
                primitive: None,
                children: children.into_iter().map(ast::Value::from).collect(),
            },
        }
    }
}

fn scalar(t: i32, primitive: Primitive) -> ast::Value {
    ast::Value {
        t,
        primitive: Some(primitive),
        children: Vec::new(),
    }
}

impl TryFrom<ast::Value> for Value {
    type Error = ValueError;

    fn try_from(wire: ast::Value) -> Result<Self, Self::Error> {
        let t = Type::try_from(wire.t).map_err(|_| ValueError::UnsupportedKind(wire.t))?;
        let kind = ValueKind::from(t);
        let mismatch = ValueError::MismatchedPayload { kind };

        if t != Type::List && !wire.children.is_empty() {
            return Err(mismatch);
        }

        // An unset primitive decodes to the kind's default, as protobuf getters do.
        match (t, wire.primitive) {
            (Type::Uint64, Some(Primitive::U(u))) => Ok(Value::Uint64(u)),
            (Type::Uint64, None) => Ok(Value::Uint64(0)),
            (Type::Bytes, Some(Primitive::Raw(raw))) => Ok(Value::Bytes(raw)),
            (Type::Bytes, None) => Ok(Value::Bytes(Vec::new())),
            (Type::Bool, Some(Primitive::B(b))) => Ok(Value::Bool(b)),
            (Type::Bool, None) => Ok(Value::Bool(false)),
            (Type::Nil, None) => Ok(Value::Nil),
            (Type::List, None) => wire
                .children
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            _ => Err(mismatch),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Uint64(u) => serde_json::Value::from(*u),
            Value::Bytes(raw) => serde_json::Value::String(hex::bin_to_hex(raw)),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Nil => serde_json::Value::Null,
            Value::List(children) => {
                serde_json::Value::Array(children.iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Uint64(u) => write!(f, "{u}"),
            Value::Bytes(raw) => f.write_str(&hex::bin_to_hex(raw)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Nil => f.write_str("nil"),
            Value::List(children) => {
                f.write_str("[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")
            }
        }
    }
}
