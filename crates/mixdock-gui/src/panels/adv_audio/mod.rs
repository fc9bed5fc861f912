//! Advanced audio panel - per-source volume, mono, balance, sync offset,
//! monitoring and output track routing

mod mirror;

pub use mirror::{AdvAudioMirror, SourceChange};

use egui::{ComboBox, DragValue, Grid, Slider, Ui};
use mixdock_core::{
    MonitoringType, VolumeDisplay, MAX_DB, MAX_VOLUME_PERCENT, MIN_DB, NUM_MIXER_TRACKS,
    SYNC_OFFSET_MAX_MS, SYNC_OFFSET_MIN_MS,
};

pub struct AdvAudioPanel {
    pub volume_display: VolumeDisplay,
}

impl AdvAudioPanel {
    pub fn new(volume_display: VolumeDisplay) -> Self {
        Self { volume_display }
    }

    /// Draw one grid row per source. Returns true when the volume display
    /// mode changed, so the caller can persist it.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        mirrors: &mut [AdvAudioMirror],
        monitoring_available: bool,
    ) -> bool {
        let mut display_changed = false;

        // Presentation-only toggle; the stored multiplier is untouched
        let mut use_percent = self.volume_display == VolumeDisplay::Percent;
        if ui.checkbox(&mut use_percent, "Show volume as %").changed() {
            self.volume_display = if use_percent {
                VolumeDisplay::Percent
            } else {
                VolumeDisplay::Db
            };
            display_changed = true;
        }
        ui.separator();

        Grid::new("adv_audio_grid")
            .striped(true)
            .min_col_width(70.0)
            .show(ui, |ui| {
                ui.label("Source");
                ui.label("Volume");
                ui.label("Mono");
                ui.label("Balance");
                ui.label("Sync Offset");
                if monitoring_available {
                    ui.label("Audio Monitoring");
                }
                ui.label("Tracks");
                ui.end_row();

                for mirror in mirrors {
                    self.source_row(ui, mirror, monitoring_available);
                    ui.end_row();
                }
            });

        display_changed
    }

    fn source_row(&self, ui: &mut Ui, mirror: &mut AdvAudioMirror, monitoring_available: bool) {
        ui.label(mirror.source_name());

        match self.volume_display {
            VolumeDisplay::Db => {
                let mut db = mirror.volume_db;
                let response = ui.add(
                    DragValue::new(&mut db)
                        .speed(0.1)
                        .range((MIN_DB - 0.1)..=MAX_DB)
                        .custom_formatter(|v, _| {
                            if (v as f32) < MIN_DB {
                                "-inf dB".to_string()
                            } else {
                                format!("{v:.1} dB")
                            }
                        }),
                );
                if response.changed() {
                    mirror.edit_volume_db(db);
                }
            }
            VolumeDisplay::Percent => {
                let mut percent = mirror.volume_percent;
                let response = ui.add(
                    DragValue::new(&mut percent)
                        .range(0..=MAX_VOLUME_PERCENT)
                        .suffix("%"),
                );
                if response.changed() {
                    mirror.edit_volume_percent(percent);
                }
            }
        }

        let mut mono = mirror.force_mono;
        if ui.checkbox(&mut mono, "").changed() {
            mirror.edit_force_mono(mono);
        }

        // Balance only applies to stereo sources
        if mirror.is_stereo() {
            ui.horizontal(|ui| {
                ui.label("L");
                let mut balance = mirror.balance;
                let response = ui.add(Slider::new(&mut balance, 0..=100).show_value(false));
                if response.double_clicked() {
                    mirror.reset_balance();
                } else if response.changed() {
                    mirror.edit_balance(balance);
                }
                ui.label("R");
            });
        } else {
            ui.label("");
        }

        let mut sync_ms = mirror.sync_offset_ms;
        let response = ui.add(
            DragValue::new(&mut sync_ms)
                .range(SYNC_OFFSET_MIN_MS..=SYNC_OFFSET_MAX_MS)
                .suffix(" ms"),
        );
        if response.changed() {
            mirror.edit_sync_offset_ms(sync_ms);
        }

        if monitoring_available {
            let mut monitoring = mirror.monitoring;
            ComboBox::from_id_salt(("monitoring", mirror.source_id()))
                .selected_text(monitoring.label())
                .show_ui(ui, |ui| {
                    for choice in MonitoringType::ALL {
                        if ui
                            .selectable_value(&mut monitoring, choice, choice.label())
                            .changed()
                        {
                            mirror.edit_monitoring(choice);
                        }
                    }
                });
        }

        ui.horizontal(|ui| {
            for idx in 0..NUM_MIXER_TRACKS {
                let mut on = mirror.mixers.track(idx);
                if ui.checkbox(&mut on, (idx + 1).to_string()).changed() {
                    mirror.edit_mixer_track(idx, on);
                }
            }
        });
    }
}
