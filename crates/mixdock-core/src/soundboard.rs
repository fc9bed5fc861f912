//! Sound clip registry backing the soundboard

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identifier of a hotkey registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotkeyId(pub u64);

impl std::fmt::Display for HotkeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One soundboard entry: display name, file path, loop flag, optional
/// playback hotkey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundClip {
    pub name: String,
    pub path: PathBuf,
    pub loop_enabled: bool,
    pub hotkey: Option<HotkeyId>,
}

impl SoundClip {
    /// Build a clip from a file path, using the file stem as its name.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_stem()?.to_string_lossy().to_string();
        Some(Self {
            name,
            path,
            loop_enabled: false,
            hotkey: None,
        })
    }
}

/// Flat list of sound clips. Lookups are linear and names are unique by
/// convention only; the first match wins.
#[derive(Debug, Default)]
pub struct SoundClipRegistry {
    clips: Vec<SoundClip>,
}

impl SoundClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, clip: SoundClip) {
        self.clips.push(clip);
    }

    pub fn remove(&mut self, index: usize) -> Option<SoundClip> {
        if index < self.clips.len() {
            Some(self.clips.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&SoundClip> {
        self.clips.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SoundClip> {
        self.clips.get_mut(index)
    }

    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.clips.iter().position(|c| c.name == name)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SoundClip> {
        self.clips.iter().find(|c| c.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut SoundClip> {
        self.clips.iter_mut().find(|c| c.name == name)
    }

    pub fn find_by_hotkey(&self, id: HotkeyId) -> Option<&SoundClip> {
        self.clips.iter().find(|c| c.hotkey == Some(id))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundClip> {
        self.clips.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str) -> SoundClip {
        SoundClip {
            name: name.to_string(),
            path: PathBuf::from(format!("/sounds/{name}.wav")),
            loop_enabled: false,
            hotkey: None,
        }
    }

    #[test]
    fn size_tracks_live_clips() {
        let mut registry = SoundClipRegistry::new();
        assert!(registry.is_empty());

        registry.add(clip("airhorn"));
        registry.add(clip("applause"));
        assert_eq!(registry.len(), 2);

        registry.remove(0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).map(|c| c.name.as_str()), Some("applause"));
    }

    #[test]
    fn name_lookup_returns_first_match() {
        let mut registry = SoundClipRegistry::new();
        registry.add(clip("dup"));
        let mut second = clip("dup");
        second.path = PathBuf::from("/other/dup.wav");
        registry.add(second);

        // Duplicate names are allowed; lookup finds the earliest entry
        assert_eq!(registry.position_by_name("dup"), Some(0));
        assert_eq!(
            registry.find_by_name("dup").map(|c| c.path.clone()),
            Some(PathBuf::from("/sounds/dup.wav"))
        );
        assert!(registry.find_by_name("missing").is_none());
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut registry = SoundClipRegistry::new();
        registry.add(clip("only"));
        assert!(registry.remove(5).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn hotkey_lookup() {
        let mut registry = SoundClipRegistry::new();
        let mut c = clip("horn");
        c.hotkey = Some(HotkeyId(7));
        registry.add(c);
        registry.add(clip("no-key"));

        assert_eq!(
            registry.find_by_hotkey(HotkeyId(7)).map(|c| c.name.as_str()),
            Some("horn")
        );
        assert!(registry.find_by_hotkey(HotkeyId(8)).is_none());
    }

    #[test]
    fn clip_name_from_file_stem() {
        let c = SoundClip::from_path(PathBuf::from("/sounds/Air Horn.wav")).unwrap();
        assert_eq!(c.name, "Air Horn");
        assert!(!c.loop_enabled);
        assert!(c.hotkey.is_none());
    }
}
