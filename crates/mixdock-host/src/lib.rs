//! mixdock-host: host engine facade consumed by the plugin UI
//!
//! The real source graph, mixer and hotkey dispatcher live in the host
//! application; this crate provides the property/signal/hotkey surface the
//! panels compile and test against. Sources store scalar audio properties
//! and emit named change signals; no audio is processed here.

mod dispatch;
mod error;
mod hotkey;
mod signal;
mod source;

pub use dispatch::{UiQueue, UiSender};
pub use error::{HostError, Result};
pub use hotkey::HotkeyRegistry;
pub use signal::{SignalConnection, SignalData, SignalHub};
pub use source::{audio_monitoring_available, Source, SourceId, SOURCE_FLAG_FORCE_MONO};
