//! # Value Codec
//!
//! This module implements `tonic::codec::Codec` so that `tonic` can send a
//! `GenericParams` envelope and hand back domain [`Value`]s directly.
//!
//! ## How it works
//!
//! 1. **Encoder (Envelope -> Proto)**:
//!    - Takes a `GenericParams` already converted from domain values.
//!    - Serializes it into the gRPC byte buffer.
//!
//! 2. **Decoder (Proto -> Value)**:
//!    - Reads an `ast.Value` from the wire.
//!    - Validates and converts it into a [`Value`], rejecting expression kinds and
//!      payloads that disagree with their discriminant.
use crate::proto::{ast, generic::GenericParams};
use crate::value::Value;
use prost::Message;
use tonic::{
    Status,
    codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder},
};

/// A Codec bridging `GenericParams` requests and [`Value`] responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueCodec;

impl Codec for ValueCodec {
    type Encode = GenericParams;
    type Decode = Value;

    type Encoder = ParamsEncoder;
    type Decoder = ValueDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        ParamsEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        ValueDecoder
    }
}

/// Responsible for encoding a request envelope into Protobuf bytes.
#[derive(Debug)]
pub struct ParamsEncoder;

impl Encoder for ParamsEncoder {
    type Item = GenericParams;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        item.encode(dst)
            .map_err(|e| Status::internal(format!("Failed to encode request: {e}")))
    }
}

/// Responsible for decoding Protobuf bytes into a [`Value`].
#[derive(Debug)]
pub struct ValueDecoder;

impl Decoder for ValueDecoder {
    type Item = Value;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        let wire = ast::Value::decode(src)
            .map_err(|e| Status::internal(format!("Failed to decode Protobuf bytes: {e}")))?;

        let value = Value::try_from(wire)
            .map_err(|e| Status::internal(format!("Malformed value in response: {e}")))?;

        Ok(Some(value))
    }
}
