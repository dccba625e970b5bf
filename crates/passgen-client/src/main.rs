//! Password generator client binary.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a server on this machine
//! passgen-client
//!
//! # Remote server, verbose logging on stderr
//! passgen-client --host passgen.example.net --log-level debug
//! ```

use clap::Parser;
use passgen_client::{ClientConfig, ClientSession};
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Password generator client
#[derive(Parser, Debug)]
#[command(name = "passgen-client")]
#[command(about = "Requests generated passwords from a passgen server")]
#[command(version)]
struct Args {
    /// Server host name or address
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server UDP port
    #[arg(short, long, default_value_t = passgen_proto::DEFAULT_PORT)]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // stdout carries the prompts
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ClientConfig { host: args.host, port: args.port };
    let mut session = ClientSession::connect(&config).await?;

    session.run(BufReader::new(tokio::io::stdin()), &mut std::io::stdout()).await?;

    Ok(())
}
