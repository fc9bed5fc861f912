//! mixdock-core: Domain types for the mixdock plugin UI

pub mod levels;
mod soundboard;

pub use levels::{
    db_to_mul, mul_to_db, snap_balance, sync_offset_from_ms, sync_offset_to_ms, MixerMask,
    MonitoringType, SpeakerLayout, VolumeDisplay, BALANCE_CENTER, BALANCE_SNAP_RADIUS, MAX_DB,
    MAX_VOLUME_PERCENT, MIN_DB, NSEC_PER_MSEC, NUM_MIXER_TRACKS, SYNC_OFFSET_MAX_MS,
    SYNC_OFFSET_MIN_MS,
};
pub use soundboard::{HotkeyId, SoundClip, SoundClipRegistry};
