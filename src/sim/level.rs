//! The built-in level
//!
//! Roughly 4300px wide. The castle stands on the last ground strip; the final
//! cloud hops past it lead to a secret.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geom::Rect;
use super::state::{
    Item, Ladder, Lever, MOB_SIZE, Mob, MovingPlatform, Platform, PlatformKind, Sign,
};
use crate::consts::LEVEL_FLOOR;

use PlatformKind::{Block, Cloud, Ground};

/// Castle door hitbox (centered on x=3000, resting on the floor)
pub const GOAL: Rect = Rect::new(2980.0, LEVEL_FLOOR - 60.0, 40.0, 60.0);

/// Castle footprint used when the castle sprite hasn't loaded
pub const CASTLE: Rect = Rect::new(2900.0, LEVEL_FLOOR - 100.0, 80.0, 100.0);

/// Moving platform driven by the lever at the end of the drop
pub const CHOCOLATE_BRIDGE_ID: u32 = 1;

const PLATFORMS: [Platform; 20] = [
    // Starting area
    Platform::new(-50.0, LEVEL_FLOOR, 500.0, 60.0, Ground),
    Platform::new(550.0, 200.0, 150.0, 20.0, Cloud),
    Platform::new(300.0, 100.0, 150.0, 20.0, Cloud),
    // The gap
    Platform::new(800.0, LEVEL_FLOOR, 300.0, 60.0, Ground),
    // Staircase and high road
    Platform::new(1200.0, 280.0, 40.0, 40.0, Block),
    Platform::new(1240.0, 240.0, 40.0, 40.0, Block),
    Platform::new(1280.0, 200.0, 40.0, 40.0, Block),
    Platform::new(1320.0, 160.0, 40.0, 40.0, Block),
    Platform::new(1400.0, 160.0, 150.0, 20.0, Cloud),
    Platform::new(1400.0, 60.0, 200.0, 20.0, Cloud),
    Platform::new(1800.0, 100.0, 150.0, 20.0, Cloud),
    // Chocolate ledge, only reachable over the bridge
    Platform::new(1300.0, 335.0, 60.0, 20.0, Cloud),
    // The drop
    Platform::new(1700.0, LEVEL_FLOOR, 400.0, 60.0, Ground),
    // Floating islands
    Platform::new(2200.0, 250.0, 80.0, 20.0, Cloud),
    Platform::new(2400.0, 180.0, 80.0, 20.0, Cloud),
    // Castle grounds
    Platform::new(2600.0, LEVEL_FLOOR, 800.0, 60.0, Ground),
    // Post-game hops
    Platform::new(3500.0, 300.0, 60.0, 20.0, Cloud),
    Platform::new(3700.0, 250.0, 60.0, 20.0, Cloud),
    Platform::new(3900.0, 200.0, 60.0, 20.0, Cloud),
    Platform::new(4100.0, 150.0, 200.0, 20.0, Cloud),
];

const LADDERS: [Rect; 3] = [
    Rect::new(350.0, 100.0, 40.0, 250.0),
    Rect::new(1450.0, 60.0, 40.0, 100.0),
    Rect::new(1850.0, 100.0, 40.0, 250.0),
];

/// (x, y, image, hidden, description)
const ITEMS: [(f32, f32, &str, bool, Option<&str>); 8] = [
    (370.0, 50.0, "cake", false, None),
    (1500.0, 0.0, "lipstick", false, None),
    (1870.0, 30.0, "guitar", false, None),
    (620.0, 160.0, "love_letter", true, Some("You have my heart in words 💖")),
    (1320.0, 300.0, "chocolate", true, Some("Sweet but not as sweet as you! 🍫")),
    (3000.0, LEVEL_FLOOR - 150.0, "necklace", true, Some("Dazzling like you! 💎")),
    (2200.0, 100.0, "teddy", true, Some("Soft and cuddly, like you! 🧸")),
    (4180.0, 100.0, "flower", true, Some("A bouquet for my love! 🌹")),
];

const SIGNS: [(f32, &str); 3] = [
    (2700.0, "You make my heart\nskip a beat! 💓"),
    (3000.0, "I love you more\nthan everything! 😈"),
    (3300.0, "Will you be my\nValentine? 🌹"),
];

/// Everything placed in the world at load time
#[derive(Debug, Clone)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub ladders: Vec<Ladder>,
    pub items: Vec<Item>,
    pub levers: Vec<Lever>,
    pub signs: Vec<Sign>,
    pub mobs: Vec<Mob>,
    pub flowers: Vec<Vec2>,
    pub goal: Rect,
}

impl Level {
    /// Build the shipped level; `seed` only affects flower placement
    pub fn builtin(seed: u64) -> Self {
        let platforms = PLATFORMS.to_vec();
        let flowers = scatter_flowers(&platforms, seed);

        Self {
            moving_platforms: vec![MovingPlatform {
                id: CHOCOLATE_BRIDGE_ID,
                rect: Rect::new(1610.0, 335.0, 80.0, 20.0),
                kind: Cloud,
                active: false,
                start_x: 1610.0,
                target_x: 1420.0,
                speed: 0.05,
            }],
            ladders: LADDERS.iter().map(|&rect| Ladder { rect }).collect(),
            items: ITEMS
                .iter()
                .map(|&(x, y, image, hidden, description)| Item {
                    pos: Vec2::new(x, y),
                    image: Some(image.to_string()),
                    icon: None,
                    collected: false,
                    hidden,
                    description: description.map(str::to_string),
                })
                .collect(),
            levers: vec![Lever {
                // Right edge of the drop (1700 + 400)
                rect: Rect::new(2060.0, LEVEL_FLOOR - 30.0, 30.0, 30.0),
                pulled: false,
                target: CHOCOLATE_BRIDGE_ID,
            }],
            signs: SIGNS
                .iter()
                .map(|&(x, message)| Sign {
                    rect: Rect::new(x, LEVEL_FLOOR - 60.0, 40.0, 40.0),
                    message: message.to_string(),
                })
                .collect(),
            // Guarding the first floating island
            mobs: vec![Mob::new(2230.0, 250.0 - MOB_SIZE, 2200.0, 2280.0)],
            platforms,
            flowers,
            goal: GOAL,
        }
    }
}

/// Flowers every 30-80px along each ground strip
fn scatter_flowers(platforms: &[Platform], seed: u64) -> Vec<Vec2> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut flowers = Vec::new();
    for platform in platforms.iter().filter(|p| p.kind == Ground) {
        let mut offset = 20.0;
        while offset < platform.rect.w - 20.0 {
            flowers.push(Vec2::new(platform.rect.x + offset, platform.rect.y));
            offset += rng.random_range(30.0..80.0);
        }
    }
    flowers
}
