//! # CLI
//!
//! This module defines the command-line interface of `animagus` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring headers
//! are `key:value` and parameters carry a valid kind).
//!
//! ## Parameter syntax
//!
//! | Input          | Value                          |
//! |----------------|--------------------------------|
//! | `bytes:0xabcd` | `BYTES` decoded from hex       |
//! | `u64:42`       | `UINT64` parsed as decimal     |
//! | `0xabcd`       | `BYTES` (bare hex)             |
//! | `42`           | `UINT64` (bare decimal)        |
use animagus_core::client::{ClientConfig, DEFAULT_URL};
use animagus_core::codec::hex::{HEX_PREFIX, hex_to_bin};
use animagus_core::value::Value;
use clap::{ArgAction, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "animagus",
    version,
    about = "Client for Animagus generic query services"
)]
pub struct Cli {
    /// The server URL to connect to
    #[arg(long, global = true, default_value = DEFAULT_URL)]
    pub url: String,

    /// Deadline for every request, in seconds
    #[arg(long, global = true, value_parser = parse_seconds)]
    pub timeout: Option<Duration>,

    /// Limit on establishing the connection, in seconds
    #[arg(long, global = true, value_parser = parse_seconds)]
    pub connect_timeout: Option<Duration>,

    /// Log more (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.url.clone());
        if let Some(timeout) = self.connect_timeout {
            config = config.connect_timeout(timeout);
        }
        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }
        config
    }
}

/// Raw bytes given on the command line as hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

#[derive(Subcommand)]
pub enum Commands {
    /// Run a named query as a unary call and print its result
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// animagus call balance --param 0x7c7f0ee1d582c385342367792946e695d5cd2a29
    /// ```
    Call {
        /// The query name
        name: String,

        /// Positional parameter, repeatable (bytes:0x.., u64:N, 0x.. or N)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<Value>,

        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },

    /// Run a named query as a stream and print every element
    Stream {
        /// The query name
        name: String,

        /// Positional parameter, repeatable (bytes:0x.., u64:N, 0x.. or N)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<Value>,

        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Cancel the stream after this many elements
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Total capacity (in shannons) held by a default-lock script
    Balance {
        /// Lock script args as hex
        #[arg(value_parser = parse_hex)]
        lock_args: HexBytes,
    },

    /// UDT amount held by a default-lock script
    UdtBalance {
        /// UDT type script args as hex
        #[arg(value_parser = parse_hex)]
        type_args: HexBytes,
        /// Lock script args as hex
        #[arg(value_parser = parse_hex)]
        lock_args: HexBytes,
    },

    /// Build an unsigned UDT transfer transaction
    Transfer {
        /// UDT type script args as hex
        #[arg(value_parser = parse_hex)]
        type_args: HexBytes,
        /// Sender lock script args as hex
        #[arg(value_parser = parse_hex)]
        from: HexBytes,
        /// Receiver lock script args as hex
        #[arg(value_parser = parse_hex)]
        to: HexBytes,
        /// Amount to transfer
        amount: u64,
    },

    /// Follow new NervosDAO deposits
    Deposits {
        /// Cancel the subscription after this many deposits
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn parse_param(value: &str) -> Result<Value, String> {
    if let Some(hex) = value.strip_prefix("bytes:") {
        return Value::from_hex(hex).map_err(|e| format!("Invalid bytes param: {e}"));
    }
    if let Some(number) = value.strip_prefix("u64:") {
        return Value::parse_uint64(number).map_err(|e| format!("Invalid u64 param: {e}"));
    }
    if value.starts_with(HEX_PREFIX) {
        return Value::from_hex(value).map_err(|e| format!("Invalid bytes param: {e}"));
    }
    Value::parse_uint64(value).map_err(|e| {
        format!("Invalid param '{value}': {e}. Expected 'bytes:0x..', 'u64:N', '0x..' or 'N'")
    })
}

fn parse_hex(value: &str) -> Result<HexBytes, String> {
    hex_to_bin(value)
        .map(HexBytes)
        .map_err(|e| format!("Invalid hex: {e}"))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| "Format must be 'key:value'".to_string())
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: u64 = value
        .parse()
        .map_err(|e| format!("Invalid number of seconds '{value}': {e}"))?;
    Ok(Duration::from_secs(secs))
}
