//! Player movement integration
//!
//! Two modes: free movement under gravity with axis-separated collision, and
//! ladder climbing where gravity is off and collisions are skipped.

use glam::Vec2;

use super::collision::{resolve_x, resolve_y};
use super::particles;
use super::state::{AudioCue, GameEvent, GameState};
use super::tick::TickInput;
use crate::consts::LEVEL_FLOOR;

/// Decide whether the player is on a ladder this frame
///
/// Runs before integration. Touching a ladder only starts a climb while a
/// vertical direction is held; letting go keeps the player hanging.
pub fn update_ladder_state(state: &mut GameState, input: &TickInput) {
    let inset = state.tuning.ladder_inset;
    let player_rect = state.player.rect();
    let touching = state
        .ladders
        .iter()
        .any(|l| player_rect.overlaps(&l.climb_hitbox(inset)));

    if touching {
        if input.up || input.down {
            state.player.climbing = true;
        }
    } else {
        state.player.climbing = false;
    }

    // Jumping off the bottom of a ladder hands over to the normal jump
    if state.player.climbing && input.up && near_floor(state) {
        state.player.climbing = false;
    }
}

/// Ground check used while climbing (the grounded flag is stale on a ladder)
fn near_floor(state: &GameState) -> bool {
    state.player.bottom() >= LEVEL_FLOOR - state.tuning.ladder_ground_slack
}

/// Advance the player one frame in whichever mode applies
pub fn step_player(state: &mut GameState, input: &TickInput) {
    if state.player.climbing {
        climb(state, input);
    } else {
        integrate(state, input);
    }
}

/// Ladder movement: fixed climb speed, small strafe, clamped at the floor
pub fn climb(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.vel = Vec2::ZERO;
    if input.up {
        player.vel.y = -tuning.climb_speed;
    }
    if input.down {
        player.vel.y = tuning.climb_speed;
    }
    if input.left {
        player.pos.x -= tuning.climb_strafe;
    }
    if input.right {
        player.pos.x += tuning.climb_strafe;
    }

    player.pos.y += player.vel.y;
    if player.bottom() > LEVEL_FLOOR {
        player.pos.y = LEVEL_FLOOR - player.size.y;
    }
}

/// Normal movement: accelerate, gravity, jump, then resolve X and Y in turn
pub fn integrate(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    // Right wins when both directions are held
    if input.right {
        player.vel.x += tuning.acceleration;
        player.facing_right = true;
    } else if input.left {
        player.vel.x -= tuning.acceleration;
        player.facing_right = false;
    } else {
        player.vel.x *= tuning.friction;
    }
    player.vel.x = player.vel.x.clamp(-tuning.max_speed, tuning.max_speed);

    player.vel.y += tuning.gravity;

    let jumped = input.up && player.grounded;
    if jumped {
        player.vel.y = tuning.jump_force;
        player.grounded = false;
    }

    if jumped {
        let feet = Vec2::new(state.player.pos.x, state.player.bottom());
        let center = feet + Vec2::new(state.player.size.x / 2.0, 0.0);
        particles::spawn_dust(state, center, 30);
        particles::spawn_dust(state, feet, 20);
        state.emit(GameEvent::Audio(AudioCue::Jump));
    }

    state.player.pos.x += state.player.vel.x;
    resolve_x(state);

    state.player.pos.y += state.player.vel.y;
    state.player.grounded = false;
    resolve_y(state);
}
