//! Command-line interface for the RfCast bridge controller.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rfcast_commands::{CommandService, HttpTransport};
use rfcast_core::{BridgeConfig, CommandCode, RawCommand, codes};

/// RfCast - drive RF fan/light receivers through an RF bridge.
#[derive(Parser, Debug)]
#[command(name = "rfcast")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Transmit one command through the bridge.
    Send {
        /// Command name (see `rfcast codes`) or numeric code.
        command: String,
        /// Path to a JSON bridge configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Bridge host, overriding the configuration file.
        #[arg(long)]
        host: Option<String>,
        /// Receiver remote id, overriding the configuration file.
        #[arg(long)]
        address: Option<String>,
        /// Transport timeout in seconds.
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
    /// Print the raw descriptor and bridge URL without transmitting.
    Descriptor {
        /// Command name (see `rfcast codes`) or numeric code.
        command: String,
        /// Receiver remote id.
        #[arg(long, default_value = "0")]
        address: String,
        /// Digits the address is padded to.
        #[arg(long, default_value_t = 40)]
        address_width: usize,
        /// Bridge host used for the printed URL.
        #[arg(long, default_value = "bridge.local")]
        host: String,
    },
    /// List the known command codes.
    Codes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Send {
            command,
            config,
            host,
            address,
            timeout,
        } => {
            let config = resolve_config(config, host, address)?;
            init_tracing(args.verbose || config.verbose);
            let code = parse_command(&command)?;
            send(code, config, timeout).await
        }
        Command::Descriptor {
            command,
            address,
            address_width,
            host,
        } => {
            init_tracing(args.verbose);
            let code = parse_command(&command)?;
            let raw = RawCommand::build(code, &address, address_width)?;
            println!("{}", raw.descriptor());
            println!("{}", raw.bridge_url(&host));
            Ok(())
        }
        Command::Codes => {
            for (name, code) in codes::NAMED_CODES {
                println!("{name:<12} {code}");
            }
            for (step, code) in codes::light::BRIGHTNESS_LEVELS.iter().enumerate() {
                println!("{:<12} {code}", format!("light-{}", step + 1));
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve a command name or raw numeric code.
fn parse_command(input: &str) -> Result<CommandCode> {
    if let Some(code) = codes::by_name(input) {
        return Ok(code);
    }
    if let Ok(raw) = input.parse::<i64>() {
        return CommandCode::from_raw(raw)
            .with_context(|| format!("code {raw} is outside the transmittable range"));
    }
    bail!("unknown command `{input}`; run `rfcast codes` for the known names")
}

fn resolve_config(
    path: Option<PathBuf>,
    host: Option<String>,
    address: Option<String>,
) -> Result<BridgeConfig> {
    let mut config = match path {
        Some(path) => BridgeConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => match (&host, &address) {
            (Some(host), Some(address)) => BridgeConfig::new(host.clone(), address.clone()),
            _ => bail!("either --config or both --host and --address are required"),
        },
    };
    if let Some(host) = host {
        config.bridge_host = host;
    }
    if let Some(address) = address {
        config.device_address = address;
    }
    config.validate()?;
    Ok(config)
}

async fn send(code: CommandCode, config: BridgeConfig, timeout: u64) -> Result<()> {
    let transport = Arc::new(HttpTransport::new(Duration::from_secs(timeout))?);
    let service = CommandService::new(config, transport);

    service.submit(code).await?;
    service.wait_idle().await;

    let stats = service.stats().await;
    if stats.failed > 0 {
        bail!("transmission failed; check the bridge host and network");
    }
    info!(%code, "command dispatched");
    Ok(())
}
