//! Scene building
//!
//! Turns a `GameState` into a flat list of 2D draw commands. Nothing here
//! touches the state mutably; a backend replays the list onto a real surface.
//! Images that have not loaded yet are replaced with simple shapes.

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::level::CASTLE;
use crate::sim::{GameState, PlatformKind, Rect};

pub type Color = [f32; 4];

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

const SKY_TOP: Color = rgb(0xba, 0xe6, 0xfd);
const SKY_BOTTOM: Color = rgb(0xf0, 0xf9, 0xff);
const HILL: Color = rgb(0xfb, 0xcf, 0xe8);
const HILL_SHINE: Color = rgba(255, 255, 255, 0.4);
const BUSH: Color = rgb(0xa7, 0xf3, 0xd0);
const CLOUD_PUFF: Color = rgba(255, 255, 255, 0.9);
const BLACK: Color = rgb(0, 0, 0);
const WHITE: Color = rgb(255, 255, 255);
const LADDER_WOOD: Color = rgb(0x8b, 0x45, 0x13);
const GROUND_FILL: Color = rgb(0xff, 0x99, 0xcc);
const GROUND_TOP: Color = rgb(0xff, 0x66, 0xb2);
const GROUND_CHECK: Color = rgba(255, 255, 255, 0.3);
const BLOCK_FILL: Color = rgb(0xfd, 0xba, 0x74);
const BLOCK_BORDER: Color = rgb(0xc2, 0x41, 0x0c);
const BLOCK_BOLT: Color = rgb(0x7c, 0x2d, 0x12);
const CLOUD_SHADE: Color = rgb(0xe2, 0xe8, 0xf0);
const LEVER_BASE: Color = rgb(0x55, 0x55, 0x55);
const LEVER_ON: Color = rgb(0x32, 0xcd, 0x32);
const LEVER_OFF: Color = rgb(0xff, 0x45, 0x00);
const STEM: Color = rgb(0x22, 0xc5, 0x5e);
const PETAL: Color = rgb(0xec, 0x48, 0x99);
const POLLEN: Color = rgb(0xff, 0xff, 0x00);
const SIGN_POST: Color = rgb(0x8b, 0x45, 0x13);
const SIGN_BOARD: Color = rgb(0xa0, 0x52, 0x2d);
const SIGN_BORDER: Color = rgb(0x6d, 0x4c, 0x41);
const SIGN_LINES: Color = rgba(255, 255, 255, 0.5);
const TRUNK: Color = rgb(0x5d, 0x40, 0x37);
const BLOSSOM: Color = rgb(0xff, 0xb7, 0xc5);
const HOT_PINK: Color = rgb(0xff, 0x69, 0xb4);
const HEART_FULL: Color = rgb(0xef, 0x44, 0x44);
const HEART_EMPTY: Color = rgb(0x55, 0x55, 0x55);
const PLACEHOLDER: Color = rgb(255, 0, 0);
const MOB_BODY: Color = rgb(0x7c, 0x3a, 0xed);
const MOB_EYE: Color = rgb(255, 255, 255);

/// Sprite keys the scene asks for
pub const PLAYER_IMAGE: &str = "player";
pub const CASTLE_IMAGE: &str = "castle";
pub const TREE_IMAGE: &str = "tree";

/// Drawn size of item sprites
const ITEM_SPRITE: f32 = 65.0;
/// Height of the cherry trees beside the signs
const TREE_HEIGHT: f32 = 300.0;

/// Something that knows which images are ready to draw
pub trait AssetSource {
    /// Natural size of a loaded image, `None` while it is still loading
    fn image_size(&self, key: &str) -> Option<Vec2>;
}

/// No images at all: everything falls back to placeholders
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn image_size(&self, _key: &str) -> Option<Vec2> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    Translate(f32, f32),
    Scale(f32, f32),
    Alpha(f32),
    VerticalGradient { top: Color, bottom: Color },
    Rect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    /// Upper half of an ellipse
    Dome { center: Vec2, radii: Vec2, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
        centered: bool,
        /// White halo behind the glyphs
        glow: bool,
    },
    Image { key: String, rect: Rect },
}

/// One frame's worth of draw commands
#[derive(Debug, Default)]
pub struct Scene {
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.push(DrawCmd::Rect {
            rect: Rect::new(x, y, w, h),
            color,
        });
    }

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, size: f32, color: Color) {
        self.push(DrawCmd::Text {
            pos: Vec2::new(x, y),
            text: text.into(),
            size,
            color,
            centered: false,
            glow: false,
        });
    }

    fn banner(&mut self, x: f32, y: f32, text: &str, size: f32) {
        self.push(DrawCmd::Text {
            pos: Vec2::new(x, y),
            text: text.to_string(),
            size,
            color: HOT_PINK,
            centered: true,
            glow: true,
        });
    }

    /// Texts drawn this frame, mostly useful for tests and debugging
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Image { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }
}

/// Build the draw list for the current state
pub fn build_scene(state: &GameState, assets: &dyn AssetSource, settings: &Settings) -> Scene {
    let mut scene = Scene::default();
    let time = state.clock_ms;

    scene.push(DrawCmd::VerticalGradient {
        top: SKY_TOP,
        bottom: SKY_BOTTOM,
    });

    if settings.quality.parallax_enabled() {
        scene.push(DrawCmd::Save);
        scene.push(DrawCmd::Translate(-(state.camera_x * 0.2), 0.0));
        draw_hills(&mut scene);
        scene.push(DrawCmd::Restore);

        scene.push(DrawCmd::Save);
        scene.push(DrawCmd::Translate(-(state.camera_x * 0.5), 0.0));
        draw_bushes(&mut scene);
        scene.push(DrawCmd::Restore);
    }

    scene.push(DrawCmd::Save);
    scene.push(DrawCmd::Translate(-state.camera_x.floor(), 0.0));

    for (x, y) in [(100.0, 50.0), (800.0, 80.0), (1600.0, 40.0)] {
        draw_cloud(&mut scene, x, y);
    }
    draw_ladders(&mut scene, state);
    draw_platforms(&mut scene, state);
    draw_levers(&mut scene, state);
    for flower in &state.flowers {
        draw_flower(&mut scene, flower.x, flower.y);
    }

    if !state.all_items_found() {
        draw_tree(&mut scene, assets, 2850.0, LEVEL_FLOOR);
        draw_tree(&mut scene, assets, 3150.0, LEVEL_FLOOR);
        for sign in &state.signs {
            draw_sign(&mut scene, sign.rect.x, sign.rect.y);
        }
        scene.banner(3000.0, 100.0, "Go Near Board & Press F", 20.0);
        if state.camera_x < 300.0 {
            scene.banner(150.0, 140.0, "Can you find the things", 12.0);
            scene.banner(150.0, 170.0, "hidden around the world?", 12.0);
        }
    } else {
        draw_castle(&mut scene, assets, state);
    }

    draw_items(&mut scene, state, assets, settings, time);
    draw_mobs(&mut scene, state);
    draw_player(&mut scene, state, assets, settings, time);

    for particle in &state.particles {
        scene.text(
            particle.pos.x,
            particle.pos.y,
            particle.text.clone(),
            particle.size,
            particle.color,
        );
    }

    scene.push(DrawCmd::Restore);
    scene
}

fn draw_hills(scene: &mut Scene) {
    let mut x = -200.0;
    while x < 5000.0 {
        scene.push(DrawCmd::Dome {
            center: Vec2::new(x, LEVEL_FLOOR),
            radii: Vec2::new(250.0, 200.0),
            color: HILL,
        });
        scene.push(DrawCmd::Circle {
            center: Vec2::new(x, 250.0),
            radius: 20.0,
            color: HILL_SHINE,
        });
        x += 400.0;
    }
}

fn draw_bushes(scene: &mut Scene) {
    let mut i = 0.0;
    while i < 5000.0 {
        let (x, y) = (i + 100.0, LEVEL_FLOOR);
        for (dx, dy, r) in [(0.0, 0.0, 40.0), (50.0, -20.0, 50.0), (100.0, 0.0, 40.0)] {
            scene.push(DrawCmd::Circle {
                center: Vec2::new(x + dx, y + dy),
                radius: r,
                color: BUSH,
            });
        }
        i += 300.0;
    }
}

/// Blocky smiling cloud
fn draw_cloud(scene: &mut Scene, x: f32, y: f32) {
    scene.rect(x + 20.0, y - 20.0, 80.0, 60.0, CLOUD_PUFF);
    scene.rect(x - 10.0, y + 10.0, 30.0, 30.0, CLOUD_PUFF);
    scene.rect(x + 100.0, y, 30.0, 40.0, CLOUD_PUFF);
    scene.rect(x + 40.0, y - 40.0, 40.0, 20.0, CLOUD_PUFF);
    scene.rect(x + 40.0, y - 5.0, 6.0, 6.0, BLACK);
    scene.rect(x + 70.0, y - 5.0, 6.0, 6.0, BLACK);
}

fn draw_ladders(scene: &mut Scene, state: &GameState) {
    for ladder in &state.ladders {
        let l = ladder.rect;
        scene.rect(l.x, l.y, 6.0, l.h, LADDER_WOOD);
        scene.rect(l.right() - 6.0, l.y, 6.0, l.h, LADDER_WOOD);
        let mut y = l.y;
        while y < l.bottom() {
            scene.rect(l.x, y, l.w, 6.0, LADDER_WOOD);
            y += 20.0;
        }
    }
}

fn draw_platforms(scene: &mut Scene, state: &GameState) {
    for platform in &state.platforms {
        let p = platform.rect;
        match platform.kind {
            PlatformKind::Ground => {
                scene.rect(p.x, p.y, p.w, p.h, GROUND_FILL);
                scene.rect(p.x, p.y, p.w, 10.0, GROUND_TOP);
                // Checkerboard texture
                let mut i = 0.0;
                while i < p.w {
                    let mut j = 0.0;
                    while j < p.h {
                        if ((i + j) / 20.0) as i32 % 2 == 0 {
                            scene.rect(p.x + i, p.y + j, 10.0, 10.0, GROUND_CHECK);
                        }
                        j += 20.0;
                    }
                    i += 20.0;
                }
            }
            PlatformKind::Block => {
                scene.rect(p.x, p.y, p.w, p.h, BLOCK_FILL);
                scene.rect(p.x, p.y, p.w, 4.0, BLOCK_BORDER);
                scene.rect(p.x, p.bottom() - 4.0, p.w, 4.0, BLOCK_BORDER);
                scene.rect(p.x, p.y, 4.0, p.h, BLOCK_BORDER);
                scene.rect(p.right() - 4.0, p.y, 4.0, p.h, BLOCK_BORDER);
                for (bx, by) in [
                    (p.x + 6.0, p.y + 6.0),
                    (p.right() - 12.0, p.y + 6.0),
                    (p.x + 6.0, p.bottom() - 12.0),
                    (p.right() - 12.0, p.bottom() - 12.0),
                ] {
                    scene.rect(bx, by, 6.0, 6.0, BLOCK_BOLT);
                }
            }
            PlatformKind::Cloud => draw_cloud_platform(scene, p),
        }
    }

    for platform in &state.moving_platforms {
        draw_cloud_platform(scene, platform.rect);
    }
}

fn draw_cloud_platform(scene: &mut Scene, p: Rect) {
    scene.rect(p.x, p.y, p.w, p.h, WHITE);
    scene.rect(p.x, p.bottom() - 5.0, p.w, 5.0, CLOUD_SHADE);
}

fn draw_levers(scene: &mut Scene, state: &GameState) {
    let reach = state.tuning.interact_range;
    for lever in &state.levers {
        let l = lever.rect;
        scene.rect(l.x, l.y + 20.0, 30.0, 10.0, LEVER_BASE);
        if lever.pulled {
            scene.rect(l.x + 15.0, l.y + 10.0, 20.0, 10.0, LEVER_ON);
            scene.rect(l.x + 30.0, l.y, 10.0, 10.0, LEVER_ON);
        } else {
            scene.rect(l.x - 5.0, l.y + 10.0, 20.0, 10.0, LEVER_OFF);
            scene.rect(l.x - 10.0, l.y, 10.0, 10.0, LEVER_OFF);
        }

        if (state.player.center_x() - l.center_x()).abs() < reach {
            scene.text(l.x + 10.0, l.y - 10.0, "F", 10.0, WHITE);
        }
    }
}

fn draw_flower(scene: &mut Scene, x: f32, y: f32) {
    scene.rect(x, y - 10.0, 2.0, 10.0, STEM);
    for (dx, dy) in [(-2.0, -12.0), (2.0, -12.0), (0.0, -14.0), (0.0, -10.0)] {
        scene.rect(x + dx, y + dy, 2.0, 2.0, PETAL);
    }
    scene.rect(x, y - 12.0, 2.0, 2.0, POLLEN);
}

fn draw_sign(scene: &mut Scene, x: f32, y: f32) {
    scene.rect(x + 15.0, y + 20.0, 10.0, 40.0, SIGN_POST);
    scene.rect(x, y, 40.0, 25.0, SIGN_BOARD);
    scene.push(DrawCmd::StrokeRect {
        rect: Rect::new(x, y, 40.0, 25.0),
        color: SIGN_BORDER,
    });
    scene.rect(x + 5.0, y + 5.0, 20.0, 2.0, SIGN_LINES);
    scene.rect(x + 5.0, y + 10.0, 30.0, 2.0, SIGN_LINES);
    scene.rect(x + 5.0, y + 15.0, 15.0, 2.0, SIGN_LINES);
}

/// Cherry tree centered on `x` with its base at `y`
fn draw_tree(scene: &mut Scene, assets: &dyn AssetSource, x: f32, y: f32) {
    match assets.image_size(TREE_IMAGE) {
        Some(size) if size.y > 0.0 => {
            let w = TREE_HEIGHT * size.x / size.y;
            scene.push(DrawCmd::Image {
                key: TREE_IMAGE.to_string(),
                rect: Rect::new(x - w / 2.0, y - TREE_HEIGHT, w, TREE_HEIGHT),
            });
        }
        _ => {
            scene.rect(x - 10.0, y - 80.0, 20.0, 80.0, TRUNK);
            scene.push(DrawCmd::Circle {
                center: Vec2::new(x, y - 90.0),
                radius: 40.0,
                color: BLOSSOM,
            });
        }
    }
}

/// Castle sprite centered on the goal, shrunk if it would poke out of the sky
pub fn castle_size(natural: Vec2, player_height: f32) -> Vec2 {
    if natural.y > LEVEL_FLOOR {
        let h = player_height * 4.0;
        Vec2::new(h * natural.x / natural.y, h)
    } else {
        natural
    }
}

fn draw_castle(scene: &mut Scene, assets: &dyn AssetSource, state: &GameState) {
    match assets.image_size(CASTLE_IMAGE) {
        Some(natural) if natural.y > 0.0 => {
            let size = castle_size(natural, state.player.size.y);
            let center_x = state.goal.center_x();
            scene.push(DrawCmd::Image {
                key: CASTLE_IMAGE.to_string(),
                rect: Rect::new(center_x - size.x / 2.0, LEVEL_FLOOR - size.y, size.x, size.y),
            });
        }
        _ => draw_procedural_castle(scene, CASTLE.x - 85.0, LEVEL_FLOOR - 250.0, 250.0),
    }
}

/// Pink castle on a 200x200 design grid scaled to `size`
fn draw_procedural_castle(scene: &mut Scene, x: f32, y: f32, size: f32) {
    let scale = size / 200.0;
    scene.push(DrawCmd::Save);
    scene.push(DrawCmd::Translate(x, y));
    scene.push(DrawCmd::Scale(scale, scale));

    scene.rect(50.0, 60.0, 100.0, 140.0, rgb(0xf9, 0xa8, 0xd4));
    scene.rect(20.0, 80.0, 40.0, 120.0, rgb(0xf4, 0x72, 0xb6));
    scene.rect(140.0, 80.0, 40.0, 120.0, rgb(0xf4, 0x72, 0xb6));

    let roof = rgb(0xdb, 0x27, 0x77);
    for points in [
        [(50.0, 60.0), (100.0, 10.0), (150.0, 60.0)],
        [(20.0, 80.0), (40.0, 40.0), (60.0, 80.0)],
        [(140.0, 80.0), (160.0, 40.0), (180.0, 80.0)],
    ] {
        scene.push(DrawCmd::Polygon {
            points: points.iter().map(|&(px, py)| Vec2::new(px, py)).collect(),
            color: roof,
        });
    }

    scene.push(DrawCmd::Dome {
        center: Vec2::new(100.0, 200.0),
        radii: Vec2::splat(30.0),
        color: rgb(0x83, 0x18, 0x43),
    });

    let window = rgb(0xfd, 0xf2, 0xf8);
    scene.rect(40.0, 100.0, 10.0, 20.0, window);
    scene.rect(150.0, 100.0, 10.0, 20.0, window);
    scene.push(DrawCmd::Circle {
        center: Vec2::new(100.0, 90.0),
        radius: 15.0,
        color: window,
    });

    scene.rect(99.0, -10.0, 2.0, 20.0, rgb(0x83, 0x18, 0x43));
    scene.push(DrawCmd::Polygon {
        points: vec![Vec2::new(100.0, -10.0), Vec2::new(120.0, -5.0), Vec2::new(100.0, 0.0)],
        color: HEART_FULL,
    });

    scene.push(DrawCmd::Restore);
}

fn draw_items(
    scene: &mut Scene,
    state: &GameState,
    assets: &dyn AssetSource,
    settings: &Settings,
    time: f64,
) {
    let bounce = if settings.reduced_motion {
        0.0
    } else {
        ((time / 200.0).sin() * 5.0) as f32
    };

    for item in state.items.iter().filter(|i| !i.collected) {
        let (x, y) = (item.pos.x, item.pos.y);
        if item.hidden {
            // Faint most of the time with a brief sharp flash
            let pulse = ((time / 200.0).sin() + 1.0) / 2.0;
            let alpha = 0.05 + pulse.powi(10) as f32 * 0.8;
            scene.text(x + 5.0, y + 5.0, "✨", 20.0, [1.0, 1.0, 1.0, alpha]);
            continue;
        }

        match &item.image {
            Some(key) if assets.image_size(key).is_some() => {
                scene.push(DrawCmd::Image {
                    key: key.clone(),
                    rect: Rect::new(x, y + bounce, ITEM_SPRITE, ITEM_SPRITE),
                });
            }
            Some(_) => scene.text(x, y + bounce, "?", 20.0, BLACK),
            None => {
                let icon = item.icon.as_deref().unwrap_or("?");
                scene.text(x, y + bounce, icon, 20.0, BLACK);
            }
        }
    }
}

fn draw_mobs(scene: &mut Scene, state: &GameState) {
    for mob in state.mobs.iter().filter(|m| m.alive) {
        let r = mob.rect();
        if mob.squished {
            // Flattened to a third of its height
            let h = r.h / 3.0;
            scene.rect(r.x, r.bottom() - h, r.w, h, MOB_BODY);
            continue;
        }
        scene.rect(r.x, r.y, r.w, r.h, MOB_BODY);
        let eye_x = if mob.vel_x < 0.0 { r.x + 6.0 } else { r.right() - 14.0 };
        scene.rect(eye_x, r.y + 8.0, 8.0, 8.0, MOB_EYE);
    }
}

fn draw_player(
    scene: &mut Scene,
    state: &GameState,
    assets: &dyn AssetSource,
    settings: &Settings,
    time: f64,
) {
    let player = &state.player;
    let r = player.rect();

    if assets.image_size(PLAYER_IMAGE).is_none() {
        scene.rect(r.x, r.y, r.w, r.h, PLACEHOLDER);
        return;
    }

    scene.push(DrawCmd::Save);
    if player.is_invulnerable(state.clock_ms) && settings.effective_flicker() {
        let alpha = if (time / 50.0).sin() > 0.0 { 0.5 } else { 0.2 };
        scene.push(DrawCmd::Alpha(alpha));
    }
    if player.facing_right {
        scene.push(DrawCmd::Image {
            key: PLAYER_IMAGE.to_string(),
            rect: r,
        });
    } else {
        scene.push(DrawCmd::Translate(r.right(), r.y));
        scene.push(DrawCmd::Scale(-1.0, 1.0));
        scene.push(DrawCmd::Image {
            key: PLAYER_IMAGE.to_string(),
            rect: Rect::new(0.0, 0.0, r.w, r.h),
        });
    }
    scene.push(DrawCmd::Restore);

    // Hearts above the head
    for i in 0..START_LIVES {
        let hx = player.center_x() - 20.0 + f32::from(i) * 15.0;
        let color = if i < state.lives { HEART_FULL } else { HEART_EMPTY };
        scene.text(hx, r.y - 15.0, "❤", 10.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TOTAL_ITEMS;
    use std::collections::HashMap;

    struct Loaded(HashMap<&'static str, Vec2>);

    impl AssetSource for Loaded {
        fn image_size(&self, key: &str) -> Option<Vec2> {
            self.0.get(key).copied()
        }
    }

    fn playing() -> GameState {
        let mut state = GameState::new(9);
        state.reset();
        state
    }

    #[test]
    fn test_missing_player_sprite_draws_placeholder() {
        let state = playing();
        let scene = build_scene(&state, &NoAssets, &Settings::default());
        let placeholder = DrawCmd::Rect {
            rect: state.player.rect(),
            color: PLACEHOLDER,
        };
        assert!(scene.commands.contains(&placeholder));
        assert_eq!(scene.images().count(), 0);
    }

    #[test]
    fn test_loaded_player_gets_hearts() {
        let mut state = playing();
        state.lives = 2;
        let assets = Loaded(HashMap::from([(PLAYER_IMAGE, Vec2::new(160.0, 240.0))]));
        let scene = build_scene(&state, &assets, &Settings::default());
        assert!(scene.images().any(|k| k == PLAYER_IMAGE));
        assert_eq!(scene.texts().filter(|t| *t == "❤").count(), START_LIVES as usize);
    }

    #[test]
    fn test_castle_replaces_signs_when_done() {
        let mut state = playing();
        let before = build_scene(&state, &NoAssets, &Settings::default());
        assert!(before.texts().any(|t| t == "Go Near Board & Press F"));

        state.score = TOTAL_ITEMS;
        let assets = Loaded(HashMap::from([(CASTLE_IMAGE, Vec2::new(300.0, 200.0))]));
        let after = build_scene(&state, &assets, &Settings::default());
        assert!(!after.texts().any(|t| t == "Go Near Board & Press F"));
        assert!(after.images().any(|k| k == CASTLE_IMAGE));
    }

    #[test]
    fn test_tall_castle_is_scaled_down() {
        let size = castle_size(Vec2::new(500.0, 1000.0), 60.0);
        assert_eq!(size, Vec2::new(120.0, 240.0));
        let small = castle_size(Vec2::new(200.0, 150.0), 60.0);
        assert_eq!(small, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_lever_hint_only_when_near() {
        let mut state = playing();
        let far = build_scene(&state, &NoAssets, &Settings::default());
        assert!(!far.texts().any(|t| t == "F"));

        state.player.pos.x = state.levers[0].rect.x;
        let near = build_scene(&state, &NoAssets, &Settings::default());
        assert!(near.texts().any(|t| t == "F"));
    }

    #[test]
    fn test_collected_items_not_drawn() {
        let mut state = playing();
        let hidden = state.items.iter().filter(|i| i.hidden).count();
        let sparkles = |s: &Scene| s.texts().filter(|t| *t == "✨").count();

        let scene = build_scene(&state, &NoAssets, &Settings::default());
        assert_eq!(sparkles(&scene), hidden);

        for item in state.items.iter_mut().filter(|i| i.hidden) {
            item.collected = true;
        }
        let scene = build_scene(&state, &NoAssets, &Settings::default());
        assert_eq!(sparkles(&scene), 0);
    }

    #[test]
    fn test_save_restore_balanced() {
        let mut state = playing();
        state.score = TOTAL_ITEMS;
        state.player.facing_right = false;
        let assets = Loaded(HashMap::from([(PLAYER_IMAGE, Vec2::new(160.0, 240.0))]));
        let scene = build_scene(&state, &assets, &Settings::default());
        let saves = scene.commands.iter().filter(|c| **c == DrawCmd::Save).count();
        let restores = scene.commands.iter().filter(|c| **c == DrawCmd::Restore).count();
        assert_eq!(saves, restores);
    }
}
