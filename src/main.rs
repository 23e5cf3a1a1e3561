//! `clx-telemetry` binary: listen for CLX telemetry or send a test waveform.

mod cli;

use std::{
    fs,
    io,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use clx_telemetry::{
    CompletedBlob,
    ControlRecord,
    DeckRecord,
    EventRecord,
    FileCacheSink,
    IntakeConfig,
    IntakeHooks,
    MetaRecord,
    UdpIntake,
    WaveformSink,
    fragment::{ContentHash, FragmentationError, WaveformFragmenter, WaveformHeaderError},
    transport::{TransportError, send_datagrams},
};
use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{Level, debug, error, info};

use crate::cli::{Cli, Command, ListenArgs, SendWaveformArgs};

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid content hash: {0}")]
    Hash(#[from] WaveformHeaderError),
    #[error(transparent)]
    Fragment(#[from] FragmentationError),
    #[cfg(feature = "metrics")]
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Hooks used by the binary: log every record and cache completed waveforms.
struct ConsoleHooks {
    sink: Option<FileCacheSink>,
}

impl IntakeHooks for ConsoleHooks {
    fn on_control(&mut self, control: &ControlRecord) {
        debug!(
            crossfader = control.crossfader,
            active = control.active,
            app_state = %control.app_state,
            "control"
        );
    }

    fn on_deck(&mut self, deck: &DeckRecord) {
        debug!(deck = deck.deck_index, bpm = deck.bpm, beat = deck.beat, "deck");
    }

    fn on_meta(&mut self, meta: &MetaRecord) {
        info!(deck = meta.deck, title = %meta.title, artist = %meta.artist, "now loaded");
    }

    fn on_event(&mut self, event: &EventRecord) {
        info!(event = %event.name, value = event.value, "event");
    }

    fn on_waveform(&mut self, blob: CompletedBlob) {
        let Some(sink) = &mut self.sink else {
            return;
        };
        match sink.store(blob.hash(), blob.payload()) {
            Ok(path) => info!(hash = %blob.hash(), path = %path.display(), "waveform cached"),
            Err(err) => error!(hash = %blob.hash(), error = %err, "waveform not cached"),
        }
    }
}

fn load_config(args: &ListenArgs) -> Result<IntakeConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| AppError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| AppError::Config {
                path: path.clone(),
                source,
            })?
        }
        None => IntakeConfig::default(),
    };

    if let Some(addr) = args.listen {
        config = config.with_listen_addr(addr);
    }
    if let Some(addr) = args.announce {
        config = config.with_announce_addr(addr);
    }
    if args.no_announce {
        config = config.with_announce_on_start(false);
    }
    if let Some(state) = &args.production_state {
        config = config.with_production_state(state.clone());
    }
    if let Some(secs) = args.pending_ttl {
        config = config.with_pending_ttl(Some(Duration::from_secs(secs)));
    }
    if let Some(dir) = &args.cache_dir {
        config = config.with_cache_dir(Some(dir.clone()));
    }
    Ok(config)
}

fn install_metrics(addr: Option<SocketAddr>) -> Result<(), AppError> {
    let Some(addr) = addr else {
        return Ok(());
    };
    #[cfg(feature = "metrics")]
    {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;
        info!(%addr, "serving metrics");
    }
    #[cfg(not(feature = "metrics"))]
    tracing::warn!(%addr, "built without the metrics feature; ignoring --metrics-listen");
    Ok(())
}

async fn listen(args: ListenArgs) -> Result<(), AppError> {
    let config = load_config(&args)?;
    install_metrics(args.metrics_listen)?;

    let hooks = ConsoleHooks {
        sink: config.cache_dir.clone().map(FileCacheSink::new),
    };
    let intake = UdpIntake::bind(&config, hooks).await?;
    info!(addr = %config.listen_addr, "listening for telemetry");

    let dispatcher = intake.run().await;
    info!(
        sources = ?dispatcher.sources().sources(),
        pending = dispatcher.fragments().pending_len(),
        "shutting down"
    );
    Ok(())
}

async fn send_waveform(args: SendWaveformArgs) -> Result<(), AppError> {
    let hash = ContentHash::parse(&args.hash)?;
    let blob = fs::read(&args.file).map_err(|source| AppError::Read {
        path: args.file.clone(),
        source,
    })?;
    let datagrams = WaveformFragmenter::new(args.fragment_size).fragment(&hash, &blob)?;

    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .await
        .map_err(|source| TransportError::Bind {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            source,
        })?;
    let sent = send_datagrams(&socket, args.target, &datagrams).await?;
    info!(
        %hash,
        target = %args.target,
        fragments = datagrams.len(),
        bytes = sent,
        "waveform sent"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let result = match cli.into_command() {
        Command::Listen(args) => listen(args).await,
        Command::SendWaveform(args) => send_waveform(args).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "clx-telemetry failed");
            ExitCode::FAILURE
        }
    }
}
