//! Test utilities for `clx-telemetry`.
//!
//! Provides raw datagram builders, a recording [`IntakeHooks`] implementation,
//! and a serialised `logtest` fixture.
//!
//! ```rust
//! use clx_telemetry::{Dispatcher, IngestOutcome, RecordKind};
//! use clx_testing::{RecordingHooks, control_datagram, sender};
//!
//! let mut dispatcher = Dispatcher::new(RecordingHooks::default());
//! let outcome = dispatcher.ingest(&control_datagram("Live"), sender(1));
//! assert_eq!(outcome, IngestOutcome::Record(RecordKind::Control));
//! assert_eq!(dispatcher.hooks().controls[0].app_state, "Live");
//! ```
//!
//! [`IntakeHooks`]: clx_telemetry::IntakeHooks

pub mod datagrams;
pub mod hooks;
pub mod logging;

pub use datagrams::{control_datagram, fragment_datagram, record_datagram, sender, typed_datagram};
pub use hooks::RecordingHooks;
pub use logging::{LoggerHandle, logger};
