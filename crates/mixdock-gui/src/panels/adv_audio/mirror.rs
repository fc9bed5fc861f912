//! Per-source view-model behind the advanced audio panel
//!
//! Caches the externally-visible value of each audio property. User edits
//! clamp, snap and suppress redundant writes before calling the host
//! setters; host-originated changes come back through [`apply`] and only
//! touch the cache, so programmatic updates never re-trigger the setters.
//!
//! [`apply`]: AdvAudioMirror::apply

use mixdock_core::{
    db_to_mul, mul_to_db, snap_balance, sync_offset_from_ms, sync_offset_to_ms, MixerMask,
    MonitoringType, BALANCE_CENTER, MAX_DB, MAX_VOLUME_PERCENT, MIN_DB, SYNC_OFFSET_MAX_MS,
    SYNC_OFFSET_MIN_MS,
};
use mixdock_host::{Source, SourceId, SOURCE_FLAG_FORCE_MONO};

/// Host-originated property change, marshalled to the UI thread before it
/// reaches a mirror.
#[derive(Debug, Clone, Copy)]
pub enum SourceChange {
    Volume(f32),
    Flags(u32),
    Balance(f32),
    SyncOffset(i64),
    Monitoring(MonitoringType),
    Mixers(u32),
}

pub struct AdvAudioMirror {
    source: Source,
    pub volume_db: f32,
    pub volume_percent: i32,
    pub force_mono: bool,
    pub balance: i32,
    pub sync_offset_ms: i64,
    pub monitoring: MonitoringType,
    pub mixers: MixerMask,
}

impl AdvAudioMirror {
    pub fn new(source: Source) -> Self {
        let volume = source.volume();
        Self {
            volume_db: mul_to_db(volume),
            volume_percent: (volume * 100.0) as i32,
            force_mono: source.flags() & SOURCE_FLAG_FORCE_MONO != 0,
            balance: (source.balance_value() * 100.0) as i32,
            sync_offset_ms: sync_offset_to_ms(source.sync_offset()),
            monitoring: source.monitoring_type(),
            mixers: source.audio_mixers(),
            source,
        }
    }

    pub fn source_id(&self) -> SourceId {
        self.source.id()
    }

    pub fn source_name(&self) -> String {
        self.source.name()
    }

    pub fn is_stereo(&self) -> bool {
        self.source.speaker_layout().is_stereo()
    }

    // ── User edits (clamp, snap, write to the host) ─────────────────────

    pub fn edit_volume_db(&mut self, db: f32) {
        // The extra 0.1 below MIN_DB is the "-inf" latch position
        let db = db.clamp(MIN_DB - 0.1, MAX_DB);
        self.volume_db = db;
        let mul = if db < MIN_DB { 0.0 } else { db_to_mul(db) };
        self.source.set_volume(mul);
    }

    pub fn edit_volume_percent(&mut self, percent: i32) {
        let percent = percent.clamp(0, MAX_VOLUME_PERCENT);
        self.volume_percent = percent;
        self.source.set_volume(percent as f32 / 100.0);
    }

    pub fn edit_force_mono(&mut self, mono: bool) {
        self.force_mono = mono;
        let flags = self.source.flags();
        if (flags & SOURCE_FLAG_FORCE_MONO != 0) == mono {
            return;
        }
        let flags = if mono {
            flags | SOURCE_FLAG_FORCE_MONO
        } else {
            flags & !SOURCE_FLAG_FORCE_MONO
        };
        self.source.set_flags(flags);
    }

    pub fn edit_balance(&mut self, value: i32) {
        let value = snap_balance(value.clamp(0, 100));
        self.balance = value;
        self.source.set_balance_value(value as f32 / 100.0);
    }

    pub fn reset_balance(&mut self) {
        self.edit_balance(BALANCE_CENTER);
    }

    pub fn edit_sync_offset_ms(&mut self, ms: i64) {
        let ms = ms.clamp(SYNC_OFFSET_MIN_MS, SYNC_OFFSET_MAX_MS);
        self.sync_offset_ms = ms;
        // Skip writes that round to the offset the host already has
        if sync_offset_to_ms(self.source.sync_offset()) == ms {
            return;
        }
        self.source.set_sync_offset(sync_offset_from_ms(ms));
    }

    pub fn edit_monitoring(&mut self, monitoring: MonitoringType) {
        if self.monitoring == monitoring {
            return;
        }
        self.monitoring = monitoring;
        self.source.set_monitoring_type(monitoring);
        tracing::info!(
            "User changed audio monitoring for source '{}' to: {}",
            self.source.name(),
            monitoring
        );
    }

    pub fn edit_mixer_track(&mut self, idx: usize, on: bool) {
        self.mixers.set_track(idx, on);
        let mut mixers = self.source.audio_mixers();
        mixers.set_track(idx, on);
        self.source.set_audio_mixers(mixers);
    }

    // ── Host-originated updates ─────────────────────────────────────────

    /// Update the cached display values from a queued host notification.
    /// Never calls back into the host setters.
    pub fn apply(&mut self, change: SourceChange) {
        match change {
            SourceChange::Volume(mul) => {
                self.volume_db = mul_to_db(mul);
                self.volume_percent = (mul * 100.0).round() as i32;
            }
            SourceChange::Flags(flags) => {
                self.force_mono = flags & SOURCE_FLAG_FORCE_MONO != 0;
            }
            SourceChange::Balance(balance) => {
                self.balance = (balance * 100.0) as i32;
            }
            SourceChange::SyncOffset(offset_ns) => {
                self.sync_offset_ms = sync_offset_to_ms(offset_ns);
            }
            SourceChange::Monitoring(monitoring) => {
                self.monitoring = monitoring;
            }
            SourceChange::Mixers(mixers) => {
                self.mixers = MixerMask(mixers);
            }
        }
    }
}
