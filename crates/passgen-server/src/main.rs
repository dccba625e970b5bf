//! Password generator server binary.
//!
//! # Usage
//!
//! ```bash
//! # Listen on all interfaces, clock-seeded generator
//! passgen-server
//!
//! # Loopback only, seeded from OS entropy
//! passgen-server --bind 127.0.0.1:57015 --seed os
//! ```

use clap::{Parser, ValueEnum};
use passgen_core::SeedSource;
use passgen_server::{Server, ServerRuntimeConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where the generator seed comes from
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeedArg {
    /// Current time in seconds (predictable)
    Clock,
    /// Operating system entropy
    Os,
}

impl From<SeedArg> for SeedSource {
    fn from(arg: SeedArg) -> Self {
        match arg {
            SeedArg::Clock => Self::Clock,
            SeedArg::Os => Self::Os,
        }
    }
}

/// Password generator server
#[derive(Parser, Debug)]
#[command(name = "passgen-server")]
#[command(about = "Generates passwords on request over UDP")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:57015")]
    bind: String,

    /// Generator seed source
    #[arg(long, value_enum, default_value = "clock")]
    seed: SeedArg,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Password generator server starting");

    let seed = SeedSource::from(args.seed);
    if seed == SeedSource::Clock {
        tracing::warn!("Generator is seeded from the clock - passwords are predictable");
    }

    let config = ServerRuntimeConfig { bind_address: args.bind, seed };

    let server = Server::bind(config).await?;

    server.run().await?;

    Ok(())
}
