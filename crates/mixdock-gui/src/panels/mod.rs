//! UI panels

mod adv_audio;
mod soundboard;

pub use adv_audio::{AdvAudioMirror, AdvAudioPanel, SourceChange};
pub use soundboard::{SoundboardAction, SoundboardPanel};
