//! Audio source handles: the scalar properties mirrored by the UI

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mixdock_core::{MixerMask, MonitoringType, SpeakerLayout};

use crate::signal::{SignalData, SignalHub};

/// Downmix-to-mono flag bit in the source flags word.
pub const SOURCE_FLAG_FORCE_MONO: u32 = 1 << 1;

/// Change signals every source declares.
const SOURCE_SIGNALS: &[&str] = &[
    "volume",
    "update_flags",
    "audio_balance",
    "audio_sync",
    "audio_monitoring",
    "audio_mixers",
];

/// Whether the host can monitor source audio on this platform. Kept as an
/// explicit capability gate; this stub host always can.
pub fn audio_monitoring_available() -> bool {
    true
}

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct SourceState {
    name: String,
    speakers: SpeakerLayout,
    volume: f32,
    flags: u32,
    balance: f32,
    sync_offset_ns: i64,
    monitoring: MonitoringType,
    mixers: MixerMask,
}

/// Cheaply clonable handle to one source owned by the host engine. Setters
/// store the value and then emit the matching named signal; change
/// callbacks run on the calling thread.
#[derive(Clone)]
pub struct Source {
    id: SourceId,
    state: Arc<Mutex<SourceState>>,
    signals: SignalHub,
}

impl Source {
    pub fn new(name: impl Into<String>, speakers: SpeakerLayout) -> Self {
        Self {
            id: SourceId(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed)),
            state: Arc::new(Mutex::new(SourceState {
                name: name.into(),
                speakers,
                volume: 1.0,
                flags: 0,
                balance: 0.5,
                sync_offset_ns: 0,
                monitoring: MonitoringType::None,
                mixers: MixerMask::default(),
            })),
            signals: SignalHub::new(SOURCE_SIGNALS),
        }
    }

    fn state(&self) -> MutexGuard<'_, SourceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn name(&self) -> String {
        self.state().name.clone()
    }

    pub fn speaker_layout(&self) -> SpeakerLayout {
        self.state().speakers
    }

    /// Signal handler for this source's change notifications.
    pub fn signals(&self) -> &SignalHub {
        &self.signals
    }

    pub fn volume(&self) -> f32 {
        self.state().volume
    }

    pub fn set_volume(&self, volume: f32) {
        self.state().volume = volume;
        self.signals
            .emit("volume", &SignalData::new().with_float("volume", volume as f64));
    }

    pub fn flags(&self) -> u32 {
        self.state().flags
    }

    pub fn set_flags(&self, flags: u32) {
        self.state().flags = flags;
        self.signals
            .emit("update_flags", &SignalData::new().with_int("flags", flags as i64));
    }

    pub fn balance_value(&self) -> f32 {
        self.state().balance
    }

    pub fn set_balance_value(&self, balance: f32) {
        self.state().balance = balance;
        self.signals.emit(
            "audio_balance",
            &SignalData::new().with_float("balance", balance as f64),
        );
    }

    pub fn sync_offset(&self) -> i64 {
        self.state().sync_offset_ns
    }

    pub fn set_sync_offset(&self, offset_ns: i64) {
        self.state().sync_offset_ns = offset_ns;
        self.signals
            .emit("audio_sync", &SignalData::new().with_int("offset", offset_ns));
    }

    pub fn monitoring_type(&self) -> MonitoringType {
        self.state().monitoring
    }

    pub fn set_monitoring_type(&self, monitoring: MonitoringType) {
        self.state().monitoring = monitoring;
        self.signals.emit(
            "audio_monitoring",
            &SignalData::new().with_int("type", monitoring.as_raw()),
        );
    }

    pub fn audio_mixers(&self) -> MixerMask {
        self.state().mixers
    }

    pub fn set_audio_mixers(&self, mixers: MixerMask) {
        self.state().mixers = mixers;
        self.signals.emit(
            "audio_mixers",
            &SignalData::new().with_int("mixers", mixers.0 as i64),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI64;

    #[test]
    fn setters_emit_named_signals() {
        let source = Source::new("mic", SpeakerLayout::Stereo);

        let volume = Arc::new(Mutex::new(None::<f64>));
        let volume_cb = volume.clone();
        let _vol_conn = source
            .signals()
            .connect("volume", move |data| {
                *volume_cb.lock().unwrap() = data.float("volume");
            })
            .unwrap();

        let offset = Arc::new(AtomicI64::new(0));
        let offset_cb = offset.clone();
        let _sync_conn = source
            .signals()
            .connect("audio_sync", move |data| {
                offset_cb.store(data.int("offset").unwrap(), Ordering::SeqCst);
            })
            .unwrap();

        source.set_volume(0.5);
        assert_eq!(*volume.lock().unwrap(), Some(0.5));
        assert_eq!(source.volume(), 0.5);

        source.set_sync_offset(250_000_000);
        assert_eq!(offset.load(Ordering::SeqCst), 250_000_000);
    }

    #[test]
    fn flags_and_mixers_round_trip() {
        let source = Source::new("game", SpeakerLayout::Stereo);
        assert_eq!(source.audio_mixers(), MixerMask(1));

        source.set_flags(SOURCE_FLAG_FORCE_MONO);
        assert_ne!(source.flags() & SOURCE_FLAG_FORCE_MONO, 0);

        source.set_audio_mixers(MixerMask(0b101));
        assert!(source.audio_mixers().track(0));
        assert!(source.audio_mixers().track(2));
        assert!(!source.audio_mixers().track(1));
    }

    #[test]
    fn source_ids_are_unique() {
        let a = Source::new("a", SpeakerLayout::Mono);
        let b = Source::new("b", SpeakerLayout::Mono);
        assert_ne!(a.id(), b.id());
    }
}
