//! Floating text and dust
//!
//! Particles never feed back into gameplay; dropping them is always safe.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const PINK: [f32; 4] = [1.0, 0.25, 0.5, 1.0];
pub const GOLD: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
pub const GREY: [f32; 4] = [0.45, 0.45, 0.45, 1.0];

/// Default lifetime for floating text (one second)
pub const TEXT_LIFE: u32 = 60;

pub fn spawn_text(state: &mut GameState, pos: Vec2, text: &str, color: [f32; 4], size: f32, life: u32) {
    state.spawn_particle(Particle {
        pos,
        text: text.to_string(),
        color,
        size,
        life,
        dust: false,
    });
}

pub fn spawn_dust(state: &mut GameState, pos: Vec2, life: u32) {
    state.spawn_particle(Particle {
        pos,
        text: "💨".to_string(),
        color: WHITE,
        size: 10.0,
        life,
        dust: true,
    });
}

/// Drift, age and prune every particle
pub fn update(state: &mut GameState) {
    let dust_rise = state.tuning.dust_rise;
    let text_rise = state.tuning.text_rise;
    let GameState { particles, rng, .. } = state;

    for particle in particles.iter_mut() {
        if particle.dust {
            particle.pos.y -= dust_rise;
            particle.pos.x += rng.random_range(-1.0..1.0);
        } else {
            particle.pos.y -= text_rise;
        }
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
