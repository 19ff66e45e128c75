//! Audio system
//!
//! Background music comes from the page's `<audio>` elements; short effects
//! are synthesized with Web Audio oscillators.

use wasm_bindgen::JsCast;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::AudioCue;

const BGM_ID: &str = "bgm";
const VICTORY_BGM_ID: &str = "victory-bgm";
const GAMEOVER_BGM_ID: &str = "gameover-bgm";

/// Look up an `<audio>` element by id
fn track(id: &str) -> Option<HtmlAudioElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlAudioElement>()
        .ok()
}

/// Rewind and play a music track, logging if the browser refuses
fn play_track(el: &HtmlAudioElement, volume: f32) {
    el.set_current_time(0.0);
    el.set_volume(f64::from(volume));
    if let Err(e) = el.play() {
        log::warn!("Audio play failed: {:?}", e);
    }
}

fn stop_track(el: &HtmlAudioElement) {
    if let Err(e) = el.pause() {
        log::warn!("Audio pause failed: {:?}", e);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    bgm: Option<HtmlAudioElement>,
    victory_bgm: Option<HtmlAudioElement>,
    gameover_bgm: Option<HtmlAudioElement>,
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }
        let bgm = track(BGM_ID);
        if bgm.is_none() {
            log::warn!("No #{} element - music disabled", BGM_ID);
        }
        Self {
            ctx,
            bgm,
            victory_bgm: track(VICTORY_BGM_ID),
            gameover_bgm: track(GAMEOVER_BGM_ID),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    /// Flip mute on every music track and return the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        for el in self.tracks() {
            el.set_muted(self.muted);
        }
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    fn tracks(&self) -> impl Iterator<Item = &HtmlAudioElement> {
        [&self.bgm, &self.victory_bgm, &self.gameover_bgm]
            .into_iter()
            .flatten()
    }

    fn music_level(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    fn sfx_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// React to a cue from the simulation
    pub fn handle(&self, cue: AudioCue) {
        match cue {
            AudioCue::StartMusic => {
                if let Some(el) = &self.victory_bgm {
                    stop_track(el);
                }
                if let Some(el) = &self.gameover_bgm {
                    stop_track(el);
                }
                if let Some(el) = &self.bgm {
                    play_track(el, self.music_level());
                }
            }
            AudioCue::PauseMusic => {
                if let Some(el) = &self.bgm {
                    stop_track(el);
                }
            }
            AudioCue::GameOverCue => {
                if let Some(el) = &self.gameover_bgm {
                    play_track(el, self.music_level());
                }
            }
            AudioCue::VictoryCue => {
                if let Some(el) = &self.victory_bgm {
                    play_track(el, self.music_level());
                }
            }
            AudioCue::Jump
            | AudioCue::Pickup
            | AudioCue::Stomp
            | AudioCue::Hurt
            | AudioCue::Lever => self.play_effect(cue),
        }
    }

    fn play_effect(&self, cue: AudioCue) {
        let vol = self.sfx_level();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            AudioCue::Jump => self.play_jump(ctx, vol),
            AudioCue::Pickup => self.play_pickup(ctx, vol),
            AudioCue::Stomp => self.play_stomp(ctx, vol),
            AudioCue::Hurt => self.play_hurt(ctx, vol),
            AudioCue::Lever => self.play_lever(ctx, vol),
            _ => {}
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Jump - quick upward chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.16).ok();
    }

    /// Pickup - bright rising arpeggio
    fn play_pickup(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [659.0, 880.0, 1175.0].iter().enumerate() {
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let start = t + i as f64 * 0.06;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.2).ok();
            }
        }
    }

    /// Stomp - soft squelch dropping in pitch
    fn play_stomp(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.18)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.22).ok();
    }

    /// Hurt - harsh low buzz
    fn play_hurt(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.32).ok();
    }

    /// Lever - mechanical click
    fn play_lever(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [1200.0, 800.0].iter().enumerate() {
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                let start = t + i as f64 * 0.05;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.2, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.04)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.05).ok();
            }
        }
    }
}
