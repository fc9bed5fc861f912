//! Soundboard panel - sound clip list with loop/play/remove controls

use std::path::PathBuf;

use egui::{RichText, ScrollArea, Ui};
use mixdock_core::SoundClipRegistry;

/// Action returned from the soundboard panel
pub enum SoundboardAction {
    None,
    Add(PathBuf),
    Remove(usize),
    Play(usize),
    SetLoop(usize, bool),
}

#[derive(Default)]
pub struct SoundboardPanel;

impl SoundboardPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn ui(&mut self, ui: &mut Ui, clips: &SoundClipRegistry) -> SoundboardAction {
        let mut action = SoundboardAction::None;

        if ui.button("Add Sound…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Audio", &["wav", "mp3", "ogg", "flac"])
                .pick_file()
            {
                action = SoundboardAction::Add(path);
            }
        }

        if clips.is_empty() {
            ui.label(RichText::new("No sounds added yet").weak());
            return action;
        }
        ui.separator();

        ScrollArea::vertical().show(ui, |ui| {
            for (idx, clip) in clips.iter().enumerate() {
                ui.horizontal(|ui| {
                    if ui.button("▶").clicked() {
                        action = SoundboardAction::Play(idx);
                    }

                    ui.label(&clip.name);

                    let mut loop_enabled = clip.loop_enabled;
                    if ui.checkbox(&mut loop_enabled, "Loop").changed() {
                        action = SoundboardAction::SetLoop(idx, loop_enabled);
                    }

                    ui.label(RichText::new(clip.path.display().to_string()).weak());

                    if ui.button("✕").clicked() {
                        action = SoundboardAction::Remove(idx);
                    }
                });
            }
        });

        action
    }
}
