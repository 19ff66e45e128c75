//! Gameplay tuning
//!
//! Every per-frame constant the simulation reads lives here so a level can be
//! rebalanced from JSON without touching code. Missing fields fall back to the
//! shipped defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    pub gravity: f32,
    pub friction: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    pub jump_force: f32,
    pub climb_speed: f32,
    /// Sideways nudge per frame while on a ladder
    pub climb_strafe: f32,

    // === Collision ===
    /// How far below a platform top the previous bottom edge may be and still land
    pub landing_tolerance: f32,
    /// Horizontal inset applied to each side of a ladder's climb hitbox
    pub ladder_inset: f32,
    /// Distance above the floor that still counts as standing while on a ladder
    pub ladder_ground_slack: f32,
    /// Height of the strip above a moving platform that carries the player
    pub carry_strip: f32,
    /// Fraction of a moving platform's remaining travel applied to a rider
    pub carry_factor: f32,

    // === Hazards ===
    /// Immunity after a mob hit (ms)
    pub hit_invulnerability_ms: f64,
    /// Immunity after a fall respawn (ms)
    pub respawn_invulnerability_ms: f64,
    /// How far below the view the player may fall before losing a life
    pub fall_margin: f32,
    pub stomp_bounce: f32,
    pub knockback_x: f32,
    pub knockback_y: f32,
    /// Frames a squished mob stays visible
    pub squish_ticks: u32,

    // === Interaction ===
    /// Horizontal center distance for signs and levers
    pub interact_range: f32,
    /// Vertical distance for levers
    pub lever_vertical_range: f32,
    pub image_item_hitbox: f32,
    pub glyph_item_hitbox: f32,

    // === Presentation ===
    /// Camera approach rate toward its target
    pub camera_follow: f32,
    /// Fraction of the view kept to the left of the player
    pub camera_lead: f32,
    pub dust_rise: f32,
    pub text_rise: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            acceleration: ACCELERATION,
            max_speed: MAX_SPEED,
            jump_force: JUMP_FORCE,
            climb_speed: CLIMB_SPEED,
            climb_strafe: CLIMB_STRAFE,

            landing_tolerance: 10.0,
            ladder_inset: 15.0,
            ladder_ground_slack: 5.0,
            carry_strip: 10.0,
            carry_factor: 0.05,

            hit_invulnerability_ms: 1000.0,
            respawn_invulnerability_ms: 1500.0,
            fall_margin: 100.0,
            stomp_bounce: -7.0,
            knockback_x: 5.0,
            knockback_y: -4.0,
            squish_ticks: 60,

            interact_range: 50.0,
            lever_vertical_range: 100.0,
            image_item_hitbox: 55.0,
            glyph_item_hitbox: 30.0,

            camera_follow: 0.1,
            camera_lead: 0.3,
            dust_rise: 0.5,
            text_rise: 2.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "carry_factor": 0.1 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.carry_factor, 0.1);
        assert_eq!(tuning.jump_force, JUMP_FORCE);
        assert_eq!(tuning.respawn_invulnerability_ms, 1500.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
