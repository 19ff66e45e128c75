//! End-to-end gameplay scenarios driven through `tick`

use glam::Vec2;

use heart_quest::consts::*;
use heart_quest::sim::interact::{check_fall, check_items, update_mobs};
use heart_quest::sim::{AudioCue, GameEvent, GamePhase, GameState, Mob, TickInput, tick};

fn started() -> GameState {
    let mut state = GameState::new(42);
    let input = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &input, SIM_DT);
    state.drain_events();
    state
}

fn count(events: &[GameEvent], wanted: &GameEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

#[test]
fn test_jump_from_ground() {
    let mut state = started();
    state.player.pos = Vec2::new(100.0, LEVEL_FLOOR - PLAYER_HEIGHT);
    state.player.vel = Vec2::ZERO;
    state.player.grounded = true;

    let input = TickInput {
        up: true,
        ..Default::default()
    };
    tick(&mut state, &input, SIM_DT);

    assert_eq!(state.player.vel.y, JUMP_FORCE);
    assert!(!state.player.grounded);
    assert_eq!(state.player.bottom(), LEVEL_FLOOR + JUMP_FORCE);
    assert!(state.drain_events().contains(&GameEvent::Audio(AudioCue::Jump)));
}

#[test]
fn test_right_wins_over_left() {
    let mut state = started();
    let input = TickInput {
        left: true,
        right: true,
        ..Default::default()
    };
    let x = state.player.pos.x;
    tick(&mut state, &input, SIM_DT);
    assert!(state.player.pos.x > x);
    assert!(state.player.facing_right);
}

#[test]
fn test_new_game_restores_everything() {
    let mut state = started();
    state.score = 5;
    state.lives = 1;
    state.player.pos = Vec2::new(2000.0, 10.0);
    state.player.vel = Vec2::new(3.0, -4.0);
    for item in &mut state.items {
        item.collected = true;
    }
    state.levers[0].pulled = true;
    state.moving_platforms[0].active = true;
    state.moving_platforms[0].rect.x = 1450.0;
    state.phase = GamePhase::GameOver;

    let input = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &input, SIM_DT);

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(state.lives, START_LIVES);
    assert!(state.items.iter().all(|i| !i.collected));
    assert!(state.levers.iter().all(|l| !l.pulled));
    for platform in &state.moving_platforms {
        assert!(!platform.active);
        assert_eq!(platform.rect.x, platform.start_x);
    }
    assert_eq!(state.player.pos.x, SPAWN_X);
    let events = state.drain_events();
    assert_eq!(
        count(&events, &GameEvent::ScoreChanged { score: 0, total: TOTAL_ITEMS }),
        1
    );
}

#[test]
fn test_reset_state_before_first_step() {
    let mut state = GameState::new(42);
    state.score = 3;
    state.reset();
    assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
    assert_eq!(state.player.vel, Vec2::ZERO);
    assert_eq!(state.score, 0);
}

#[test]
fn test_victory_fires_once() {
    let mut state = started();
    state.score = TOTAL_ITEMS;
    let goal = state.goal;
    state.player.pos = Vec2::new(goal.x, LEVEL_FLOOR - PLAYER_HEIGHT);
    state.player.grounded = true;

    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.phase, GamePhase::Victory);
    let events = state.drain_events();
    assert_eq!(count(&events, &GameEvent::Victory), 1);
    assert_eq!(count(&events, &GameEvent::Audio(AudioCue::VictoryCue)), 1);

    for _ in 0..30 {
        state.player.pos = Vec2::new(goal.x, LEVEL_FLOOR - PLAYER_HEIGHT);
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    let events = state.drain_events();
    assert_eq!(count(&events, &GameEvent::Victory), 0);
    assert_eq!(count(&events, &GameEvent::Audio(AudioCue::VictoryCue)), 0);
}

#[test]
fn test_goal_ignored_until_all_items() {
    let mut state = started();
    state.score = TOTAL_ITEMS - 1;
    state.player.pos = Vec2::new(state.goal.x, LEVEL_FLOOR - PLAYER_HEIGHT);
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn test_item_collected_once() {
    let mut state = started();
    let index = state.items.iter().position(|i| !i.hidden).unwrap();
    let item_pos = state.items[index].pos;

    for _ in 0..10 {
        state.player.pos = item_pos;
        check_items(&mut state);
    }

    assert!(state.items[index].collected);
    assert_eq!(state.score, 1);
    let found = state
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::ItemFound { .. }))
        .count();
    assert_eq!(found, 1);
}

#[test]
fn test_secret_item_pauses_until_interact() {
    let mut state = started();
    let index = state.items.iter().position(|i| i.hidden).unwrap();
    state.player.pos = state.items[index].pos;
    state.player.vel = Vec2::ZERO;
    check_items(&mut state);
    assert_eq!(state.phase, GamePhase::Paused);

    // Paused: the world holds still
    let pos = state.player.pos;
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.player.pos, pos);

    let input = TickInput {
        interact: true,
        ..Default::default()
    };
    tick(&mut state, &input, SIM_DT);
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.drain_events().contains(&GameEvent::HideGift));
}

/// Standing in a mob, feet below its middle
fn stand_in(state: &mut GameState, mob: usize) {
    let rect = state.mobs[mob].rect();
    state.player.pos = Vec2::new(rect.x, rect.bottom() - PLAYER_HEIGHT);
    state.player.vel = Vec2::ZERO;
}

#[test]
fn test_mob_hit_invulnerability_window() {
    let mut state = started();
    state.mobs = vec![Mob::new(2230.0, 250.0 - 35.0, 2200.0, 2280.0)];
    let hit_at = state.clock_ms;

    stand_in(&mut state, 0);
    update_mobs(&mut state);
    assert_eq!(state.lives, START_LIVES - 1);
    assert_eq!(state.player.invulnerable_until, hit_at + 1000.0);

    state.clock_ms = hit_at + 999.0;
    stand_in(&mut state, 0);
    update_mobs(&mut state);
    assert_eq!(state.lives, START_LIVES - 1);

    state.clock_ms = hit_at + 1000.0;
    stand_in(&mut state, 0);
    update_mobs(&mut state);
    assert_eq!(state.lives, START_LIVES - 2);
}

#[test]
fn test_fall_respawn_grants_longer_window() {
    let mut state = started();
    state.mobs = vec![Mob::new(2230.0, 250.0 - 35.0, 2200.0, 2280.0)];
    let fell_at = state.clock_ms;

    state.player.pos.y = VIEW_HEIGHT + 200.0;
    check_fall(&mut state);
    assert_eq!(state.lives, START_LIVES - 1);
    assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
    assert_eq!(state.player.invulnerable_until, fell_at + 1500.0);

    state.clock_ms = fell_at + 1400.0;
    stand_in(&mut state, 0);
    update_mobs(&mut state);
    assert_eq!(state.lives, START_LIVES - 1);
}

#[test]
fn test_last_life_ends_the_run() {
    let mut state = started();
    state.lives = 1;
    state.player.pos.y = VIEW_HEIGHT + 200.0;
    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.lives, 0);
    let events = state.drain_events();
    assert_eq!(count(&events, &GameEvent::GameOver), 1);
    assert!(events.contains(&GameEvent::Audio(AudioCue::GameOverCue)));

    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(count(&state.drain_events(), &GameEvent::GameOver), 0);
}

#[test]
fn test_lever_moves_bridge() {
    let mut state = started();
    let lever = state.levers[0].rect;
    state.player.pos = Vec2::new(lever.x, LEVEL_FLOOR - PLAYER_HEIGHT);
    state.player.grounded = true;

    let input = TickInput {
        interact: true,
        ..Default::default()
    };
    tick(&mut state, &input, SIM_DT);
    assert!(state.levers[0].pulled);
    assert!(state.moving_platforms[0].active);

    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    let bridge = &state.moving_platforms[0];
    assert!((bridge.rect.x - bridge.target_x).abs() <= 1.0);
}

#[test]
fn test_returning_bridge_pushes_player_aside() {
    let mut state = started();
    {
        let bridge = &mut state.moving_platforms[0];
        bridge.active = false;
        bridge.rect.x = bridge.target_x;
    }
    // Standing at the lip of the drop, in the bridge's way home
    state.player.pos = Vec2::new(1670.0, LEVEL_FLOOR - PLAYER_HEIGHT);
    state.player.vel = Vec2::ZERO;
    state.player.grounded = true;

    for _ in 0..200 {
        tick(&mut state, &TickInput::default(), SIM_DT);
        let bridge = state.moving_platforms[0].rect;
        assert!(!state.player.rect().overlaps(&bridge));
    }

    let x = state.player.pos.x;
    let input = TickInput {
        right: true,
        ..Default::default()
    };
    tick(&mut state, &input, SIM_DT);
    assert!(state.player.pos.x >= x);
    assert_eq!(state.lives, START_LIVES);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn test_spawned_mob_can_be_stomped() {
    let mut state = started();
    state.mobs.clear();
    state.spawn_mob(300.0, LEVEL_FLOOR - 35.0, 250.0, 400.0);
    assert_eq!(state.mobs.len(), 1);

    // Falling onto its head
    let rect = state.mobs[0].rect();
    state.player.pos = Vec2::new(rect.x, rect.y + 5.0 - PLAYER_HEIGHT);
    state.player.vel = Vec2::new(0.0, 5.0);
    update_mobs(&mut state);

    assert!(state.mobs[0].squished);
    assert_eq!(state.lives, START_LIVES);
    let events = state.drain_events();
    assert_eq!(count(&events, &GameEvent::MobStomped), 1);
    assert!(events.contains(&GameEvent::Audio(AudioCue::Stomp)));
}
