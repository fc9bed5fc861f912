//! Level and routing math shared by the advanced audio controls

use std::fmt;

use serde::{Deserialize, Serialize};

/// Volume range of the dB control. Below `MIN_DB` the control reads "-inf"
/// and the written multiplier is exactly zero.
pub const MIN_DB: f32 = -96.0;
pub const MAX_DB: f32 = 26.0;

/// Percent control range; 100% is a multiplier of 1.0.
pub const MAX_VOLUME_PERCENT: i32 = 2000;

pub const NSEC_PER_MSEC: i64 = 1_000_000;

/// Sync offset limits in milliseconds.
pub const SYNC_OFFSET_MIN_MS: i64 = -950;
pub const SYNC_OFFSET_MAX_MS: i64 = 20_000;

/// Balance slider center and the dead zone that snaps to it.
pub const BALANCE_CENTER: i32 = 50;
pub const BALANCE_SNAP_RADIUS: i32 = 10;

/// Number of output mixer tracks a source can feed.
pub const NUM_MIXER_TRACKS: usize = 6;

/// Linear volume multiplier to decibels.
pub fn mul_to_db(mul: f32) -> f32 {
    if mul <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * mul.log10()
    }
}

/// Decibels to linear volume multiplier. Non-finite input (the "-inf"
/// special value) maps to silence.
pub fn db_to_mul(db: f32) -> f32 {
    if db.is_finite() {
        10f32.powf(db / 20.0)
    } else {
        0.0
    }
}

/// Snap balance values near the center to exactly center.
pub fn snap_balance(value: i32) -> i32 {
    if (BALANCE_CENTER - value).abs() < BALANCE_SNAP_RADIUS {
        BALANCE_CENTER
    } else {
        value
    }
}

/// Truncate a host-side sync offset (nanoseconds) to whole milliseconds.
pub fn sync_offset_to_ms(offset_ns: i64) -> i64 {
    offset_ns / NSEC_PER_MSEC
}

/// Widget milliseconds to the host's nanosecond representation.
pub fn sync_offset_from_ms(ms: i64) -> i64 {
    ms * NSEC_PER_MSEC
}

/// Bitmask selecting which output mixer tracks a source feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixerMask(pub u32);

impl MixerMask {
    pub fn track(self, idx: usize) -> bool {
        self.0 & (1 << idx) != 0
    }

    pub fn set_track(&mut self, idx: usize, on: bool) {
        if on {
            self.0 |= 1 << idx;
        } else {
            self.0 &= !(1 << idx);
        }
    }

    pub fn with_track(mut self, idx: usize, on: bool) -> Self {
        self.set_track(idx, on);
        self
    }
}

impl Default for MixerMask {
    fn default() -> Self {
        // New sources feed track 1 only
        MixerMask(1)
    }
}

/// Audio monitoring mode of a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitoringType {
    #[default]
    None,
    MonitorOnly,
    MonitorAndOutput,
}

impl MonitoringType {
    pub const ALL: [MonitoringType; 3] = [
        MonitoringType::None,
        MonitoringType::MonitorOnly,
        MonitoringType::MonitorAndOutput,
    ];

    /// Raw value carried in signal payloads.
    pub fn as_raw(self) -> i64 {
        match self {
            MonitoringType::None => 0,
            MonitoringType::MonitorOnly => 1,
            MonitoringType::MonitorAndOutput => 2,
        }
    }

    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(MonitoringType::None),
            1 => Some(MonitoringType::MonitorOnly),
            2 => Some(MonitoringType::MonitorAndOutput),
            _ => None,
        }
    }

    /// Label shown in the monitoring combo box.
    pub fn label(self) -> &'static str {
        match self {
            MonitoringType::None => "Monitor Off",
            MonitoringType::MonitorOnly => "Monitor Only (mute output)",
            MonitoringType::MonitorAndOutput => "Monitor and Output",
        }
    }
}

impl fmt::Display for MonitoringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MonitoringType::None => "none",
            MonitoringType::MonitorOnly => "monitor only",
            MonitoringType::MonitorAndOutput => "monitor and output",
        };
        f.write_str(s)
    }
}

/// Volume display mode of the advanced audio panel. Presentation only; the
/// stored multiplier is unaffected by switching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeDisplay {
    #[default]
    Db,
    Percent,
}

/// Speaker layout of a source. The balance slider only applies to stereo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeakerLayout {
    Mono,
    #[default]
    Stereo,
    FiveOne,
    SevenOne,
}

impl SpeakerLayout {
    pub fn is_stereo(self) -> bool {
        matches!(self, SpeakerLayout::Stereo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_db_round_trip() {
        for db in [-96.0f32, -30.0, -6.0, 0.0, 12.0, 26.0] {
            assert!((mul_to_db(db_to_mul(db)) - db).abs() < 1e-3);
        }
        assert!((db_to_mul(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn silence_maps_to_negative_infinity() {
        assert_eq!(db_to_mul(f32::NEG_INFINITY), 0.0);
        assert_eq!(mul_to_db(0.0), f32::NEG_INFINITY);
        assert_eq!(mul_to_db(-0.5), f32::NEG_INFINITY);
    }

    #[test]
    fn volume_percent_round_trip() {
        // Percent edits write mul = pct / 100; notifications read back
        // round(mul * 100).
        for pct in [0, 1, 37, 100, 250, 2000] {
            let mul = pct as f32 / 100.0;
            assert_eq!((mul * 100.0).round() as i32, pct);
        }
    }

    #[test]
    fn balance_snaps_inside_dead_zone() {
        for v in 41..=59 {
            assert_eq!(snap_balance(v), BALANCE_CENTER);
        }
        assert_eq!(snap_balance(40), 40);
        assert_eq!(snap_balance(60), 60);
        assert_eq!(snap_balance(0), 0);
        assert_eq!(snap_balance(100), 100);
    }

    #[test]
    fn sync_offset_truncates_to_milliseconds() {
        assert_eq!(sync_offset_to_ms(1_999_999), 1);
        assert_eq!(sync_offset_to_ms(-1_999_999), -1);
        assert_eq!(sync_offset_from_ms(250), 250_000_000);
        assert_eq!(sync_offset_to_ms(sync_offset_from_ms(SYNC_OFFSET_MIN_MS)), SYNC_OFFSET_MIN_MS);
        assert_eq!(sync_offset_to_ms(sync_offset_from_ms(SYNC_OFFSET_MAX_MS)), SYNC_OFFSET_MAX_MS);
    }

    #[test]
    fn mixer_mask_bits_are_independent_and_idempotent() {
        let mut mask = MixerMask(0);
        mask.set_track(2, true);
        mask.set_track(2, true);
        assert_eq!(mask.0, 1 << 2);

        mask.set_track(5, true);
        assert!(mask.track(2) && mask.track(5));

        mask.set_track(2, false);
        mask.set_track(2, false);
        assert!(!mask.track(2));
        assert!(mask.track(5));
    }

    #[test]
    fn monitoring_type_raw_round_trip() {
        for t in MonitoringType::ALL {
            assert_eq!(MonitoringType::from_raw(t.as_raw()), Some(t));
        }
        assert_eq!(MonitoringType::from_raw(99), None);
    }
}
