//! # Wire Messages
//!
//! Protobuf messages spoken by the generic query service, declared by hand with
//! `prost` derives so that no `protoc` run is needed at build time.
//!
//! The field numbers and discriminants must stay identical to the server's
//! `ast.proto` and `generic.proto`, otherwise requests stop being decodable on
//! the other side.

/// Messages of the `ast` protobuf package.
pub mod ast {
    /// A typed value: a discriminant plus at most one populated payload field.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Value {
        #[prost(enumeration = "value::Type", tag = "1")]
        pub t: i32,
        #[prost(oneof = "value::Primitive", tags = "2, 3, 4")]
        pub primitive: ::core::option::Option<value::Primitive>,
        #[prost(message, repeated, tag = "8")]
        pub children: ::prost::alloc::vec::Vec<Value>,
    }

    /// Nested message and enum types in `Value`.
    pub mod value {
        /// The subset of `ast.Value.Type` that can appear as call data.
        ///
        /// The server's enum also carries expression nodes (`ARG`, `APPLY`, `QUERY_CELLS`...).
        /// Those never travel as request parameters or results; they stay representable
        /// as a raw `i32` in [`super::Value::t`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum Type {
            Uint64 = 0,
            Nil = 1,
            Bool = 2,
            Bytes = 3,
            List = 25,
        }

        impl Type {
            /// String value of the enum field names used in the ProtoBuf definition.
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Type::Uint64 => "UINT64",
                    Type::Nil => "NIL",
                    Type::Bool => "BOOL",
                    Type::Bytes => "BYTES",
                    Type::List => "LIST",
                }
            }
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Primitive {
            #[prost(bool, tag = "2")]
            B(bool),
            #[prost(uint64, tag = "3")]
            U(u64),
            #[prost(bytes, tag = "4")]
            Raw(::prost::alloc::vec::Vec<u8>),
        }
    }
}

/// Messages and service paths of the `generic` protobuf package.
pub mod generic {
    /// A named query plus its ordered arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GenericParams {
        #[prost(string, tag = "1")]
        pub name: ::prost::alloc::string::String,
        #[prost(message, repeated, tag = "2")]
        pub params: ::prost::alloc::vec::Vec<super::ast::Value>,
    }

    /// Fully qualified name of the service.
    pub const SERVICE_NAME: &str = "generic.GenericService";
    /// HTTP/2 path of the unary method.
    pub const CALL_PATH: &str = "/generic.GenericService/Call";
    /// HTTP/2 path of the server streaming method.
    pub const STREAM_PATH: &str = "/generic.GenericService/Stream";
}
