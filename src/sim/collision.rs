//! Axis-separated collision resolution
//!
//! The player moves along X and is pushed out of anything solid, then moves
//! along Y and is pushed out again. Resolving one axis at a time means each
//! pass only has to pick between two edges.

use super::geom::Rect;
use super::state::{GameState, PlatformKind, Player};
use crate::tuning::Tuning;

/// Push the player out of a box it ran into sideways
///
/// A player standing still leaves through whichever side is closer.
/// Returns true when the player was moved.
pub fn resolve_x_against(player: &mut Player, rect: &Rect) -> bool {
    if !player.rect().overlaps(rect) {
        return false;
    }
    if player.vel.x > 0.0 {
        player.pos.x = rect.x - player.size.x;
    } else if player.vel.x < 0.0 {
        player.pos.x = rect.right();
    } else {
        push_out_x(player, rect);
    }
    player.vel.x = 0.0;
    true
}

/// Move the player clear of `rect` along the shallower horizontal side
fn push_out_x(player: &mut Player, rect: &Rect) {
    let left_depth = player.pos.x + player.size.x - rect.x;
    let right_depth = rect.right() - player.pos.x;
    if left_depth < right_depth {
        player.pos.x = rect.x - player.size.x;
    } else {
        player.pos.x = rect.right();
    }
}

/// Moving platforms that slid into the player shove them aside
///
/// Runs after the platforms move, so the player never starts a step inside
/// one. Riders sit on the top edge and are not touched.
pub fn push_from_moving(state: &mut GameState) {
    let player = &mut state.player;
    for platform in &state.moving_platforms {
        if player.rect().overlaps(&platform.rect) {
            push_out_x(player, &platform.rect);
        }
    }
}

/// Land on, or bump the head against, a box after vertical movement
///
/// Rising through a cloud is never blocked. Landing only counts when the
/// previous bottom edge was within `landing_tolerance` of the top, so a side
/// graze while falling does not teleport the player up.
pub fn resolve_y_against(player: &mut Player, rect: &Rect, kind: PlatformKind, tuning: &Tuning) {
    if kind.is_one_way() && player.vel.y < 0.0 {
        return;
    }
    if !player.rect().overlaps(rect) {
        return;
    }

    let previous_bottom = player.bottom() - player.vel.y;
    if player.vel.y > 0.0 && previous_bottom <= rect.y + tuning.landing_tolerance {
        player.grounded = true;
        player.vel.y = 0.0;
        player.pos.y = rect.y - player.size.y;
    } else if player.vel.y < 0.0 && !kind.is_one_way() {
        player.vel.y = 0.0;
        player.pos.y = rect.bottom();
    }
}

/// X pass: walls and blocks, plus every moving platform
///
/// Clouds never stop sideways movement; moving platforms always do.
pub fn resolve_x(state: &mut GameState) {
    let player = &mut state.player;
    for platform in state.platforms.iter().filter(|p| !p.kind.is_one_way()) {
        resolve_x_against(player, &platform.rect);
    }
    for platform in &state.moving_platforms {
        resolve_x_against(player, &platform.rect);
    }
}

/// Y pass: every platform, then moving platforms with rider carry
pub fn resolve_y(state: &mut GameState) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    for platform in &state.platforms {
        resolve_y_against(player, &platform.rect, platform.kind, tuning);
    }

    for platform in &state.moving_platforms {
        resolve_y_against(player, &platform.rect, platform.kind, tuning);

        // Riders drift with the platform instead of sliding off
        let riding = player.grounded
            && player
                .rect()
                .overlaps(&platform.rect.top_strip(tuning.carry_strip));
        if platform.active && riding {
            player.pos.x += (platform.target_x - platform.rect.x) * tuning.carry_factor;
        }
    }
}
