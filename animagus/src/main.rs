//! # Animagus CLI Entry Point
//!
//! The main executable for the Animagus client. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and sets up logging.
//! 2. **Connection**: Establishes a channel to the query service via `animagus_core`.
//! 3. **Execution**: Runs either a raw generic call/stream or one of the typed queries.
//! 4. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod formatter;

use animagus_core::client::{ClientConfig, GenericClient, Request, ValueStream};
use animagus_core::queries::DepositStream;
use clap::Parser;
use cli::{Cli, Commands};
use formatter::{Capacity, FormattedString, GenericError, UdtAmount};
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let mut client = connect_or_exit(args.client_config()).await;

    match args.command {
        Commands::Call {
            name,
            params,
            headers,
        } => {
            let mut request = Request::new(name).params(params);
            request.headers = headers;
            match client.call(request).await {
                Ok(value) => println!("{}", FormattedString::from(value)),
                Err(err) => exit_with(err),
            }
        }
        Commands::Stream {
            name,
            params,
            headers,
            limit,
        } => {
            let mut request = Request::new(name).params(params);
            request.headers = headers;
            match client.stream(request).await {
                Ok(stream) => print_stream(stream, limit).await,
                Err(err) => exit_with(err),
            }
        }
        Commands::Balance { lock_args } => match client.balance(&lock_args.0).await {
            Ok(capacity) => println!("{}", FormattedString::from(Capacity(capacity))),
            Err(err) => exit_with(err),
        },
        Commands::UdtBalance {
            type_args,
            lock_args,
        } => match client.udt_balance(&type_args.0, &lock_args.0).await {
            Ok(amount) => println!("{}", FormattedString::from(UdtAmount(amount))),
            Err(err) => exit_with(err),
        },
        Commands::Transfer {
            type_args,
            from,
            to,
            amount,
        } => match client
            .transfer(&type_args.0, &from.0, &to.0, amount)
            .await
        {
            Ok(tx) => println!("{}", FormattedString::from(tx)),
            Err(err) => exit_with(err),
        },
        Commands::Deposits { limit } => match client.nervosdao_deposits().await {
            Ok(deposits) => print_deposits(deposits, limit).await,
            Err(err) => exit_with(err),
        },
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with(err: impl Into<FormattedString>) -> ! {
    eprintln!("{}", err.into());
    process::exit(1);
}

async fn connect_or_exit(config: ClientConfig) -> GenericClient {
    match GenericClient::connect_with(config).await {
        Ok(client) => client,
        Err(err) => exit_with(err),
    }
}

async fn print_stream(mut stream: ValueStream, limit: Option<usize>) {
    while limit.is_none_or(|limit| stream.received() < limit) {
        match stream.next().await {
            Some(Ok(value)) => println!("{}", FormattedString::from(value)),
            Some(Err(err)) => exit_with(err),
            None => return,
        }
    }
    tracing::debug!(received = stream.received(), "stream limit reached");
    stream.cancel();
}

async fn print_deposits(mut deposits: DepositStream, limit: Option<usize>) {
    while limit.is_none_or(|limit| deposits.received() < limit) {
        match deposits.next().await {
            Some(Ok(deposit)) => println!("{}", FormattedString::from(deposit)),
            Some(Err(err)) => exit_with(GenericError("Deposit stream failed", err)),
            None => return,
        }
    }
    deposits.cancel();
}
