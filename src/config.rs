//! Intake configuration.
//!
//! [`IntakeConfig`] collects the socket addresses, buffer sizes, and gating
//! label used by the transport and the dispatcher. Defaults match the CLX
//! plugin's wire conventions; every field can be overridden through the
//! `with_*` builders or deserialised from a host's configuration file.

use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::PathBuf,
    time::Duration,
};

use serde::Deserialize;

/// Port the intake listens on unless configured otherwise.
pub const DEFAULT_LISTEN_PORT: u16 = 3650;
/// Port senders listen on for the discovery announce.
pub const DEFAULT_ANNOUNCE_PORT: u16 = 7000;
/// Single byte broadcast to solicit senders.
pub const ANNOUNCE_BYTE: u8 = 0x09;
/// App-state label that suppresses waveform fragments.
pub const DEFAULT_PRODUCTION_STATE: &str = "Production";
/// Largest payload a UDP datagram can carry.
pub const MAX_DATAGRAM_LEN: usize = 65_535;

/// Settings for the UDP intake and its dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Address the receive socket binds to.
    pub listen_addr: SocketAddr,
    /// Destination of the discovery announce.
    pub announce_addr: SocketAddr,
    /// Send the announce as soon as the socket is bound.
    pub announce_on_start: bool,
    /// Size of the per-datagram receive buffer in bytes.
    pub recv_buffer_size: usize,
    /// Control app-state under which waveform fragments are dropped.
    pub production_state: String,
    /// Age after which an incomplete waveform is discarded. `None` keeps
    /// incomplete waveforms until they complete.
    #[serde(with = "optional_secs")]
    pub pending_ttl: Option<Duration>,
    /// Directory completed waveforms are written to, if any.
    pub cache_dir: Option<PathBuf>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::V4(SocketAddrV4::new(
                Ipv4Addr::UNSPECIFIED,
                DEFAULT_LISTEN_PORT,
            )),
            announce_addr: SocketAddr::V4(SocketAddrV4::new(
                Ipv4Addr::BROADCAST,
                DEFAULT_ANNOUNCE_PORT,
            )),
            announce_on_start: true,
            recv_buffer_size: MAX_DATAGRAM_LEN,
            production_state: DEFAULT_PRODUCTION_STATE.to_owned(),
            pending_ttl: None,
            cache_dir: None,
        }
    }
}

impl IntakeConfig {
    #[must_use]
    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    #[must_use]
    pub fn with_announce_addr(mut self, addr: SocketAddr) -> Self {
        self.announce_addr = addr;
        self
    }

    #[must_use]
    pub fn with_announce_on_start(mut self, announce: bool) -> Self {
        self.announce_on_start = announce;
        self
    }

    /// Set the receive buffer size, clamped to `1..=MAX_DATAGRAM_LEN`.
    #[must_use]
    pub fn with_recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size.clamp(1, MAX_DATAGRAM_LEN);
        self
    }

    #[must_use]
    pub fn with_production_state(mut self, state: impl Into<String>) -> Self {
        self.production_state = state.into();
        self
    }

    #[must_use]
    pub fn with_pending_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.pending_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_cache_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cache_dir = dir;
        self
    }
}

/// Serde adapter reading an optional duration as whole seconds.
mod optional_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, time::Duration};

    use rstest::rstest;

    use super::{IntakeConfig, MAX_DATAGRAM_LEN};

    #[test]
    fn defaults_follow_plugin_conventions() {
        let config = IntakeConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:3650".parse::<SocketAddr>().expect("addr"));
        assert_eq!(
            config.announce_addr,
            "255.255.255.255:7000".parse::<SocketAddr>().expect("addr")
        );
        assert!(config.announce_on_start);
        assert_eq!(config.production_state, "Production");
        assert_eq!(config.pending_ttl, None);
        assert_eq!(config.cache_dir, None);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(512, 512)]
    #[case(1 << 20, MAX_DATAGRAM_LEN)]
    fn recv_buffer_size_is_clamped(#[case] requested: usize, #[case] expected: usize) {
        let config = IntakeConfig::default().with_recv_buffer_size(requested);
        assert_eq!(config.recv_buffer_size, expected);
    }

    #[test]
    fn builders_override_fields() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("addr");
        let config = IntakeConfig::default()
            .with_listen_addr(addr)
            .with_announce_on_start(false)
            .with_production_state("Rehearsal")
            .with_pending_ttl(Some(Duration::from_secs(30)));

        assert_eq!(config.listen_addr, addr);
        assert!(!config.announce_on_start);
        assert_eq!(config.production_state, "Rehearsal");
        assert_eq!(config.pending_ttl, Some(Duration::from_secs(30)));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: IntakeConfig = serde_json::from_str(
            r#"{ "listen_addr": "127.0.0.1:4000", "pending_ttl": 45, "cache_dir": "cache" }"#,
        )
        .expect("valid config");

        assert_eq!(config.listen_addr.port(), 4000);
        assert_eq!(config.pending_ttl, Some(Duration::from_secs(45)));
        assert_eq!(config.cache_dir.as_deref(), Some(std::path::Path::new("cache")));
        assert_eq!(config.production_state, "Production");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_json::from_str::<IntakeConfig>(r#"{ "listen_port": 1 }"#);
        assert!(result.is_err());
    }
}
