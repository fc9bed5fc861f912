//! Main application state

mod config;
mod types;

use eframe::CreationContext;
use egui::Context;
use mixdock_core::{MonitoringType, SoundClip, SoundClipRegistry, SpeakerLayout};
use mixdock_host::{
    audio_monitoring_available, HotkeyRegistry, SignalConnection, Source, UiQueue, UiSender,
};

use config::{load_config, save_config, AppConfig};
use types::UiEvent;

use crate::panels::{
    AdvAudioMirror, AdvAudioPanel, SoundboardAction, SoundboardPanel, SourceChange,
};

pub struct MixdockApp {
    mirrors: Vec<AdvAudioMirror>,
    // Held for their Drop impls; dropping unsubscribes from the host
    _connections: Vec<SignalConnection>,
    ui_events: UiQueue<UiEvent>,

    // Panels
    adv_audio_panel: AdvAudioPanel,
    soundboard_panel: SoundboardPanel,

    clips: SoundClipRegistry,
    hotkeys: HotkeyRegistry,
    config: AppConfig,
}

impl MixdockApp {
    pub fn new(cc: &CreationContext<'_>) -> Self {
        let ui_events: UiQueue<UiEvent> = UiQueue::new();
        let ctx = cc.egui_ctx.clone();
        ui_events.set_waker(move || ctx.request_repaint());

        // Stand-ins for the host's source list
        let sources = vec![
            Source::new("Desktop Audio", SpeakerLayout::Stereo),
            Source::new("Mic/Aux", SpeakerLayout::Mono),
            Source::new("Media Source", SpeakerLayout::Stereo),
        ];

        let mut mirrors = Vec::new();
        let mut connections = Vec::new();
        for source in &sources {
            match connect_source(source, ui_events.sender()) {
                Ok(mut conns) => connections.append(&mut conns),
                Err(e) => {
                    tracing::error!("Failed to subscribe to source '{}': {e}", source.name())
                }
            }
            mirrors.push(AdvAudioMirror::new(source.clone()));
        }

        let config = load_config();
        let adv_audio_panel = AdvAudioPanel::new(config.adv_audio.volume_display);

        Self {
            mirrors,
            _connections: connections,
            ui_events,
            adv_audio_panel,
            soundboard_panel: SoundboardPanel::new(),
            clips: SoundClipRegistry::new(),
            hotkeys: HotkeyRegistry::new(),
            config,
        }
    }

    fn handle_soundboard_action(&mut self, action: SoundboardAction) {
        match action {
            SoundboardAction::None => {}
            SoundboardAction::Add(path) => {
                let Some(mut clip) = SoundClip::from_path(path) else {
                    return;
                };
                let clip_name = clip.name.clone();
                let hotkey = self.hotkeys.register(
                    format!("soundboard.play.{}", clip.name),
                    // Actual playback is the host's job; the dispatcher
                    // routes the trigger back to it
                    move || tracing::info!("Playing sound '{clip_name}'"),
                );
                clip.hotkey = Some(hotkey);
                self.clips.add(clip);
            }
            SoundboardAction::Remove(idx) => {
                if let Some(clip) = self.clips.remove(idx) {
                    if let Some(hotkey) = clip.hotkey {
                        self.hotkeys.unregister(hotkey);
                    }
                }
            }
            SoundboardAction::Play(idx) => {
                let Some(clip) = self.clips.get(idx) else {
                    return;
                };
                if let Some(hotkey) = clip.hotkey {
                    if let Err(e) = self.hotkeys.trigger(hotkey) {
                        tracing::warn!("Sound '{}': {e}", clip.name);
                    }
                }
            }
            SoundboardAction::SetLoop(idx, loop_enabled) => {
                if let Some(clip) = self.clips.get_mut(idx) {
                    clip.loop_enabled = loop_enabled;
                }
            }
        }
    }
}

impl eframe::App for MixdockApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Apply queued host notifications before drawing
        for event in self.ui_events.drain() {
            if let Some(mirror) = self
                .mirrors
                .iter_mut()
                .find(|m| m.source_id() == event.source)
            {
                mirror.apply(event.change);
            }
        }

        egui::TopBottomPanel::bottom("soundboard")
            .resizable(true)
            .default_height(160.0)
            .show(ctx, |ui| {
                ui.heading("Soundboard");
                let action = self.soundboard_panel.ui(ui, &self.clips);
                self.handle_soundboard_action(action);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Advanced Audio Properties");
            let display_changed =
                self.adv_audio_panel
                    .ui(ui, &mut self.mirrors, audio_monitoring_available());
            if display_changed {
                self.config.adv_audio.volume_display = self.adv_audio_panel.volume_display;
                save_config(&self.config);
            }
        });
    }
}

/// Subscribe to every change signal of `source`, forwarding through the UI
/// queue. Callbacks run on the emitting thread, so they only post.
fn connect_source(
    source: &Source,
    tx: UiSender<UiEvent>,
) -> mixdock_host::Result<Vec<SignalConnection>> {
    let signals = source.signals();
    let id = source.id();
    let mut conns = Vec::new();

    let sender = tx.clone();
    conns.push(signals.connect("volume", move |data| {
        if let Some(volume) = data.float("volume") {
            sender.post(UiEvent {
                source: id,
                change: SourceChange::Volume(volume as f32),
            });
        }
    })?);

    let sender = tx.clone();
    conns.push(signals.connect("update_flags", move |data| {
        if let Some(flags) = data.int("flags") {
            sender.post(UiEvent {
                source: id,
                change: SourceChange::Flags(flags as u32),
            });
        }
    })?);

    let sender = tx.clone();
    conns.push(signals.connect("audio_balance", move |data| {
        if let Some(balance) = data.float("balance") {
            sender.post(UiEvent {
                source: id,
                change: SourceChange::Balance(balance as f32),
            });
        }
    })?);

    let sender = tx.clone();
    conns.push(signals.connect("audio_sync", move |data| {
        if let Some(offset) = data.int("offset") {
            sender.post(UiEvent {
                source: id,
                change: SourceChange::SyncOffset(offset),
            });
        }
    })?);

    if audio_monitoring_available() {
        let sender = tx.clone();
        conns.push(signals.connect("audio_monitoring", move |data| {
            if let Some(monitoring) = data.int("type").and_then(MonitoringType::from_raw) {
                sender.post(UiEvent {
                    source: id,
                    change: SourceChange::Monitoring(monitoring),
                });
            }
        })?);
    }

    let sender = tx;
    conns.push(signals.connect("audio_mixers", move |data| {
        if let Some(mixers) = data.int("mixers") {
            sender.post(UiEvent {
                source: id,
                change: SourceChange::Mixers(mixers as u32),
            });
        }
    })?);

    Ok(conns)
}
