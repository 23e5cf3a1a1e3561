//! Command line interface for the `clx-telemetry` binary.
//!
//! Also compiled by the build script to render the manual page, so it may
//! only depend on `clap` and the standard library.

use std::{net::SocketAddr, num::NonZeroUsize, path::PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};

/// Largest fragment payload that still fits a single IPv4 UDP datagram
/// (65 507 bytes) after the type byte and the 44-byte fragment header.
pub const MAX_FRAGMENT_SIZE: usize = 65_507 - 1 - 44;

fn parse_fragment_size(value: &str) -> Result<NonZeroUsize, String> {
    let size = value.parse::<NonZeroUsize>().map_err(|err| err.to_string())?;
    if size.get() > MAX_FRAGMENT_SIZE {
        return Err(format!("must be at most {MAX_FRAGMENT_SIZE} bytes"));
    }
    Ok(size)
}

/// Command line arguments for the `clx-telemetry` binary.
#[derive(Debug, Parser)]
#[command(
    name = "clx-telemetry",
    version,
    about = "Receive CLX mixer telemetry and waveforms over UDP"
)]
pub struct Cli {
    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The selected subcommand, defaulting to `listen` with no overrides.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Listen(ListenArgs::default()))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Listen for telemetry until interrupted (the default).
    Listen(ListenArgs),
    /// Split a file into waveform fragments and send them.
    SendWaveform(SendWaveformArgs),
}

/// Overrides applied on top of the configuration file.
#[derive(Debug, Default, Args)]
pub struct ListenArgs {
    /// JSON configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to receive datagrams on.
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<SocketAddr>,

    /// Destination of the discovery announce.
    #[arg(long, value_name = "ADDR")]
    pub announce: Option<SocketAddr>,

    /// Do not send the discovery announce on start.
    #[arg(long)]
    pub no_announce: bool,

    /// App-state label that suppresses waveform fragments.
    #[arg(long, value_name = "STATE")]
    pub production_state: Option<String>,

    /// Discard incomplete waveforms older than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub pending_ttl: Option<u64>,

    /// Directory completed waveforms are written to.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Serve Prometheus metrics on this address.
    #[arg(long, value_name = "ADDR")]
    pub metrics_listen: Option<SocketAddr>,
}

#[derive(Debug, Args)]
pub struct SendWaveformArgs {
    /// Intake address to send the fragments to.
    #[arg(long, default_value = "127.0.0.1:3650", value_name = "ADDR")]
    pub target: SocketAddr,

    /// 32-character ASCII content hash naming the blob.
    #[arg(long)]
    pub hash: String,

    /// Payload bytes per fragment.
    #[arg(
        long,
        default_value = "1024",
        value_name = "BYTES",
        value_parser = parse_fragment_size
    )]
    pub fragment_size: NonZeroUsize,

    /// File holding the waveform blob.
    pub file: PathBuf,
}
