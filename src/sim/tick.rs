//! Fixed timestep simulation tick
//!
//! One call runs the whole frame pipeline: ladders, movement, collision,
//! camera, hazards, pickups, the win check, particles and moving platforms.

use super::collision;
use super::interact;
use super::particles;
use super::physics;
use super::state::{AudioCue, GameEvent, GamePhase, GameState};
use crate::consts::VIEW_WIDTH;

/// Input for a single tick
///
/// Directions are held state; the rest are one-shot presses that the frame
/// loop clears once a tick has seen them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump, and climb up on ladders
    pub up: bool,
    pub down: bool,
    /// Use a lever, read a sign, close a gift popup
    pub interact: bool,
    /// Close the sign overlay
    pub dismiss: bool,
    /// Start or restart a run
    pub start: bool,
    pub toggle_mute: bool,
}

impl TickInput {
    /// Forget the one-shot presses
    pub fn clear_presses(&mut self) {
        self.interact = false;
        self.dismiss = false;
        self.start = false;
        self.toggle_mute = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.clock_ms += f64::from(dt) * 1000.0;

    if input.toggle_mute {
        state.emit(GameEvent::ToggleMute);
    }

    if input.start {
        start_new_game(state);
    }

    if input.interact {
        interact::interact(state);
    }
    if input.dismiss {
        interact::dismiss(state);
    }

    // Only active play advances the world
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    physics::update_ladder_state(state, input);
    physics::step_player(state, input);

    update_camera(state);

    // A hazard can end the run or pause it; later checks see the new phase
    interact::check_fall(state);
    if state.phase == GamePhase::Playing {
        interact::update_mobs(state);
    }
    if state.phase == GamePhase::Playing {
        interact::check_items(state);
    }
    interact::check_win(state);

    particles::update(state);
    for platform in &mut state.moving_platforms {
        platform.ease();
    }
    collision::push_from_moving(state);
}

/// Reset everything and begin playing
pub fn start_new_game(state: &mut GameState) {
    let had_sign = state.sign_open.is_some();
    let had_gift = state.gift_open.is_some();

    state.reset();
    log::info!("New game started");

    if had_sign {
        state.emit(GameEvent::HideSign);
    }
    if had_gift {
        state.emit(GameEvent::HideGift);
    }
    state.emit(GameEvent::GameStarted);
    state.emit(GameEvent::ScoreChanged {
        score: 0,
        total: state.total_items(),
    });
    state.emit(GameEvent::Audio(AudioCue::StartMusic));
}

/// Ease the camera toward a point a little left of the player
fn update_camera(state: &mut GameState) {
    let target = state.player.pos.x - VIEW_WIDTH * state.tuning.camera_lead;
    state.camera_x += (target - state.camera_x) * state.tuning.camera_follow;
    state.camera_x = state.camera_x.max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    fn started() -> GameState {
        let mut state = GameState::new(12345);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        state.drain_events();
        state
    }

    #[test]
    fn test_title_does_not_simulate() {
        let mut state = GameState::new(12345);
        let before = state.player.pos;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.player.pos, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_start_emits_music_cue() {
        let mut state = GameState::new(12345);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::GameStarted));
        assert!(events.contains(&GameEvent::Audio(AudioCue::StartMusic)));
    }

    #[test]
    fn test_player_falls_onto_start_ground() {
        let mut state = started();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), LEVEL_FLOOR);
    }

    #[test]
    fn test_camera_never_negative() {
        let mut state = started();
        state.player.pos.x = -40.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.camera_x, 0.0);
    }

    #[test]
    fn test_camera_follows_right() {
        let mut state = started();
        state.player.pos = Vec2::new(1000.0, LEVEL_FLOOR - PLAYER_HEIGHT);
        state.player.grounded = true;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.camera_x > 0.0);
    }

    #[test]
    fn test_clock_runs_while_paused() {
        let mut state = started();
        state.phase = GamePhase::Paused;
        let before = state.clock_ms;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.clock_ms > before);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_mute_passes_through_any_phase() {
        let mut state = GameState::new(1);
        let input = TickInput {
            toggle_mute: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.drain_events(), vec![GameEvent::ToggleMute]);
    }

    #[test]
    fn test_determinism() {
        let mut a = started();
        let mut b = started();
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                up: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..30 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.particles.len(), b.particles.len());
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.pos, pb.pos);
        }
    }
}
