//! Interactions and hazards
//!
//! Levers, signs, mobs, item pickup, the castle door, and falling off the
//! world. Each check runs once per frame (or once per interact press) and
//! reports what happened through `GameEvent`s.

use glam::Vec2;

use super::particles::{self, GOLD, GREEN, GREY, PINK, RED, TEXT_LIFE, WHITE};
use super::state::{AudioCue, GameEvent, GamePhase, GameState};
use crate::consts::VIEW_HEIGHT;

/// Interact pressed (F)
///
/// While a gift popup is open this only closes it. During play it toggles
/// nearby levers and then opens or closes a sign.
pub fn interact(state: &mut GameState) {
    match state.phase {
        GamePhase::Paused => dismiss_gift(state),
        GamePhase::Playing => {
            toggle_levers(state);
            toggle_sign(state);
        }
        _ => {}
    }
}

/// Escape pressed: close any sign
pub fn dismiss(state: &mut GameState) {
    if state.sign_open.take().is_some() {
        state.emit(GameEvent::HideSign);
    }
}

fn dismiss_gift(state: &mut GameState) {
    state.gift_open = None;
    state.phase = GamePhase::Playing;
    state.emit(GameEvent::HideGift);
}

/// Flip every lever within reach and drive its platform
pub fn toggle_levers(state: &mut GameState) {
    let reach = state.tuning.interact_range;
    let vertical = state.tuning.lever_vertical_range;
    let center = state.player.center_x();
    let player_y = state.player.pos.y;

    for index in 0..state.levers.len() {
        let lever = &mut state.levers[index];
        let near = (center - lever.rect.center_x()).abs() < reach
            && (player_y - lever.rect.y).abs() < vertical;
        if !near {
            continue;
        }

        lever.pulled = !lever.pulled;
        let (pulled, target) = (lever.pulled, lever.target);
        let label_pos = Vec2::new(lever.rect.x, lever.rect.y - 20.0);

        for platform in state.moving_platforms.iter_mut().filter(|p| p.id == target) {
            platform.active = pulled;
        }
        log::debug!("Lever {} {}", index, if pulled { "on" } else { "off" });

        let (text, color) = if pulled { ("ON!", GREEN) } else { ("OFF", GREY) };
        particles::spawn_text(state, label_pos, text, color, 10.0, 40);
        state.emit(GameEvent::LeverToggled { index, pulled });
        state.emit(GameEvent::Audio(AudioCue::Lever));
    }
}

/// Close the open sign, or open the nearest one while items remain
pub fn toggle_sign(state: &mut GameState) {
    if state.sign_open.take().is_some() {
        state.emit(GameEvent::HideSign);
        return;
    }
    if state.all_items_found() {
        return;
    }

    let reach = state.tuning.interact_range;
    let center = state.player.center_x();
    let nearby = state
        .signs
        .iter()
        .position(|s| (center - s.rect.center_x()).abs() < reach);

    if let Some(index) = nearby {
        state.sign_open = Some(index);
        let message = state.signs[index].message.clone();
        state.emit(GameEvent::ShowSign(message));
    }
}

/// Patrol mobs and resolve stomps and hits against the player
pub fn update_mobs(state: &mut GameState) {
    let now = state.clock_ms;

    for index in 0..state.mobs.len() {
        let mob = &mut state.mobs[index];
        if !mob.is_active() {
            continue;
        }

        mob.patrol();
        let mob_rect = mob.rect();
        if !state.player.rect().overlaps(&mob_rect) {
            continue;
        }

        let player = &state.player;
        let stomp = player.vel.y > 0.0 && player.bottom() < mob_rect.y + mob_rect.h / 2.0;

        if stomp {
            mob.squish(state.tuning.squish_ticks);
            state.player.vel.y = state.tuning.stomp_bounce;
            particles::spawn_text(state, Vec2::new(mob_rect.x, mob_rect.y), "SQUISH!", WHITE, 15.0, TEXT_LIFE);
            state.emit(GameEvent::MobStomped);
            state.emit(GameEvent::Audio(AudioCue::Stomp));
            log::debug!("Mob {} stomped", index);
        } else if !player.is_invulnerable(now) {
            let mob_heading = mob.vel_x;
            if lose_life(state) {
                return;
            }
            let tuning = &state.tuning;
            let player = &mut state.player;
            player.invulnerable_until = now + tuning.hit_invulnerability_ms;
            player.vel.x = if mob_heading > 0.0 {
                tuning.knockback_x
            } else {
                -tuning.knockback_x
            };
            player.vel.y = tuning.knockback_y;
            let ouch_pos = player.pos;
            particles::spawn_text(state, ouch_pos, "OUCH!", RED, 20.0, TEXT_LIFE);
            state.emit(GameEvent::Audio(AudioCue::Hurt));
            log::debug!("Hit by mob {}, {} lives left", index, state.lives);
        }
    }

    for mob in &mut state.mobs {
        mob.tick_despawn();
    }
    state.mobs.retain(|m| m.alive);
}

/// Collect every item the player is touching
pub fn check_items(state: &mut GameState) {
    let player_rect = state.player.rect();

    for index in 0..state.items.len() {
        let item = &state.items[index];
        if item.collected || !player_rect.overlaps(&item.hitbox(&state.tuning)) {
            continue;
        }

        state.items[index].collected = true;
        state.score += 1;
        let item = state.items[index].clone();
        let total = state.total_items();
        state.emit(GameEvent::ScoreChanged {
            score: state.score,
            total,
        });
        state.emit(GameEvent::ItemFound {
            index,
            hidden: item.hidden,
        });
        state.emit(GameEvent::Audio(AudioCue::Pickup));

        let above_player = state.player.pos - Vec2::new(0.0, 20.0);
        particles::spawn_text(state, above_player, item.pickup_icon(), PINK, 20.0, TEXT_LIFE);

        if item.hidden {
            particles::spawn_text(state, item.pos, "SECRET FOUND!", GOLD, 15.0, TEXT_LIFE);
            log::info!("Secret found: {}", item.image.as_deref().unwrap_or("?"));
            state.gift_open = Some(index);
            state.phase = GamePhase::Paused;
            state.emit(GameEvent::ShowGift {
                image: item.image,
                text: item.description,
            });
            // Everything else waits until the popup is dismissed
            return;
        }
        particles::spawn_text(state, item.pos, "YEAY! +100", WHITE, 12.0, TEXT_LIFE);
    }
}

/// Enter the castle once every item is found
pub fn check_win(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !state.all_items_found() {
        return;
    }
    if !state.player.rect().overlaps(&state.goal) {
        return;
    }

    state.phase = GamePhase::Victory;
    log::info!("Victory after {} ticks", state.time_ticks);
    state.emit(GameEvent::Victory);
    state.emit(GameEvent::Audio(AudioCue::PauseMusic));
    state.emit(GameEvent::Audio(AudioCue::VictoryCue));
}

/// Lose a life when the player drops below the view
///
/// Does nothing while the player is within bounds.
pub fn check_fall(state: &mut GameState) {
    if state.player.pos.y <= VIEW_HEIGHT + state.tuning.fall_margin || state.lives == 0 {
        return;
    }
    if lose_life(state) {
        return;
    }

    let until = state.clock_ms + state.tuning.respawn_invulnerability_ms;
    state.player.respawn();
    state.player.invulnerable_until = until;
    let pos = state.player.pos;
    particles::spawn_text(state, pos, "OUCH!", RED, 20.0, TEXT_LIFE);
    log::debug!("Fell, respawning with {} lives", state.lives);
}

/// Take a life; returns true when that was the last one
fn lose_life(state: &mut GameState) -> bool {
    state.lives = state.lives.saturating_sub(1);
    state.emit(GameEvent::LifeLost { lives: state.lives });
    if state.lives == 0 {
        game_over(state);
        true
    } else {
        false
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    log::info!("Game over with {} items", state.score);
    state.emit(GameEvent::GameOver);
    state.emit(GameEvent::Audio(AudioCue::PauseMusic));
    state.emit(GameEvent::Audio(AudioCue::GameOverCue));
}
