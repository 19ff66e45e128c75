//! Property tests for collision and hazard rules

use glam::Vec2;
use proptest::prelude::*;

use heart_quest::Tuning;
use heart_quest::consts::*;
use heart_quest::sim::collision::{resolve_x_against, resolve_y_against};
use heart_quest::sim::interact::check_fall;
use heart_quest::sim::{GameState, Mob, PlatformKind, Player, Rect};

fn player_at(pos: Vec2, vel: Vec2) -> Player {
    Player {
        pos,
        vel,
        ..Player::default()
    }
}

proptest! {
    /// Rising through a cloud never snaps or stops the player
    #[test]
    fn cloud_never_blocks_upward(
        px in 0.0f32..1000.0,
        py in 0.0f32..300.0,
        dy in -12.0f32..-0.1,
        rx in 0.0f32..1000.0,
        ry in 50.0f32..300.0,
        rw in 40.0f32..200.0,
    ) {
        let tuning = Tuning::default();
        let rect = Rect::new(rx, ry, rw, 20.0);
        let mut player = player_at(Vec2::new(px, py), Vec2::new(0.0, dy));
        let before = player.clone();

        resolve_y_against(&mut player, &rect, PlatformKind::Cloud, &tuning);

        prop_assert_eq!(player.pos, before.pos);
        prop_assert_eq!(player.vel, before.vel);
        prop_assert!(!player.grounded);
    }

    /// Falling onto a cloud from above rests exactly on its top edge
    #[test]
    fn cloud_catches_landing(
        rx in 0i32..1000,
        ry in 50i32..300,
        rw in 40i32..200,
        offset in 0i32..40,
        dy in 1.0f32..9.0,
        sink in 0.05f32..1.0,
    ) {
        let tuning = Tuning::default();
        let rect = Rect::new(rx as f32, ry as f32, rw as f32, 20.0);
        // Bottom edge has just crossed the top, and was above it last step
        let bottom = rect.y + dy * sink;
        let pos = Vec2::new(rect.x + offset as f32 - 20.0, bottom - PLAYER_HEIGHT);
        let mut player = player_at(pos, Vec2::new(0.0, dy));

        resolve_y_against(&mut player, &rect, PlatformKind::Cloud, &tuning);

        prop_assert!(player.grounded);
        prop_assert_eq!(player.vel.y, 0.0);
        prop_assert_eq!(player.bottom(), rect.y);
    }

    /// A sideways push always leaves the player clear of a solid box, even at rest
    #[test]
    fn x_resolution_separates(
        rx in 0i32..1000,
        ry in 0i32..300,
        rw in 20i32..200,
        rh in 20i32..100,
        dx in -40i32..40,
        dy in -50i32..50,
        moving_right in any::<bool>(),
        speed in 0i32..5,
    ) {
        let rect = Rect::new(rx as f32, ry as f32, rw as f32, rh as f32);
        let pos = Vec2::new((rx + dx) as f32, (ry + dy) as f32);
        let vx = if moving_right { speed as f32 } else { -(speed as f32) };
        let mut player = player_at(pos, Vec2::new(vx, 0.0));

        let overlapped = player.rect().overlaps(&rect);
        let moved = resolve_x_against(&mut player, &rect);

        prop_assert_eq!(moved, overlapped);
        prop_assert!(!player.rect().overlaps(&rect));
    }

    /// The fall check is a no-op while the player is within bounds
    #[test]
    fn fall_check_idempotent_in_bounds(
        x in -50.0f32..4300.0,
        y in -200.0f32..500.0,
        lives in 1u8..=3,
    ) {
        let mut state = GameState::new(3);
        state.reset();
        state.lives = lives;
        state.player.pos = Vec2::new(x, y);
        prop_assume!(y <= VIEW_HEIGHT + state.tuning.fall_margin);

        for _ in 0..3 {
            check_fall(&mut state);
        }

        prop_assert_eq!(state.lives, lives);
        prop_assert_eq!(state.player.pos, Vec2::new(x, y));
        prop_assert!(state.drain_events().is_empty());
    }

    /// Patrols turn around at their bounds, overshooting by at most one step
    #[test]
    fn patrol_stays_in_bounds(
        min_x in 0i32..3000,
        span in 60i32..400,
        start in 0.0f32..1.0,
        steps in 1usize..2000,
    ) {
        let min_x = min_x as f32;
        let max_x = min_x + span as f32;
        let x = min_x + 1.0 + start * (max_x - min_x - 37.0);
        let mut mob = Mob::new(x, 100.0, min_x, max_x);
        let step = mob.vel_x.abs();

        for _ in 0..steps {
            mob.patrol();
            prop_assert!(mob.pos.x >= min_x - step);
            prop_assert!(mob.pos.x + mob.size.x <= max_x + step);
        }
    }
}
