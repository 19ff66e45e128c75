//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in `GameState`. A new game
//! rebuilds the mutable entities from the built-in level.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::level::Level;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    #[default]
    Title,
    /// Active gameplay
    Playing,
    /// Frozen behind a secret-gift popup
    Paused,
    /// Out of lives
    GameOver,
    /// Reached the castle with every item
    Victory,
}

impl GamePhase {
    /// Terminal until the next new game
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Platform surface types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Ground,
    Block,
    /// One-way: only blocks the player landing from above
    Cloud,
}

impl PlatformKind {
    pub fn is_one_way(&self) -> bool {
        *self == PlatformKind::Cloud
    }
}

/// A static platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, kind: PlatformKind) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind,
        }
    }
}

/// A lever-driven platform sliding between two x positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub id: u32,
    pub rect: Rect,
    pub kind: PlatformKind,
    pub active: bool,
    pub start_x: f32,
    pub target_x: f32,
    /// Fraction of the remaining distance covered each frame
    pub speed: f32,
}

/// Closer than this to the goal and the platform stops easing
const PLATFORM_SETTLE_DISTANCE: f32 = 1.0;

impl MovingPlatform {
    /// Where the platform is heading right now
    pub fn goal_x(&self) -> f32 {
        if self.active {
            self.target_x
        } else {
            self.start_x
        }
    }

    /// Exponential approach toward the current goal
    pub fn ease(&mut self) {
        let goal = self.goal_x();
        let delta = goal - self.rect.x;
        if delta.abs() > PLATFORM_SETTLE_DISTANCE {
            self.rect.x += delta * self.speed;
        }
    }

    pub fn reset(&mut self) {
        self.rect.x = self.start_x;
        self.active = false;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ladder {
    pub rect: Rect,
}

impl Ladder {
    /// Narrow climb zone so neighbouring geometry doesn't grab the player
    pub fn climb_hitbox(&self, inset: f32) -> Rect {
        self.rect.inset_x(inset)
    }
}

/// A collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    /// Sprite key; items without one are drawn as `icon`
    pub image: Option<String>,
    pub icon: Option<String>,
    pub collected: bool,
    /// Secret items pulse faintly and open a gift popup when found
    pub hidden: bool,
    pub description: Option<String>,
}

impl Item {
    pub fn hitbox(&self, tuning: &Tuning) -> Rect {
        let size = if self.image.is_some() {
            tuning.image_item_hitbox
        } else {
            tuning.glyph_item_hitbox
        };
        Rect::new(self.pos.x, self.pos.y, size, size)
    }

    /// Glyph floated above the player on pickup
    pub fn pickup_icon(&self) -> &str {
        if let Some(icon) = &self.icon {
            return icon;
        }
        match self.image.as_deref() {
            Some("lipstick") => "💄",
            Some("cake") => "🍰",
            Some("guitar") => "🎸",
            _ => "✨",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lever {
    pub rect: Rect,
    pub pulled: bool,
    /// Id of the moving platform this lever drives
    pub target: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sign {
    pub rect: Rect,
    pub message: String,
}

/// A patrolling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_x: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub alive: bool,
    pub squished: bool,
    /// Frames left before a squished mob disappears
    pub despawn_ticks: u32,
}

/// Mob edge length
pub const MOB_SIZE: f32 = 35.0;
/// Mobs set off to the left
pub const MOB_PATROL_SPEED: f32 = -1.5;

impl Mob {
    pub fn new(x: f32, y: f32, min_x: f32, max_x: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(MOB_SIZE),
            vel_x: MOB_PATROL_SPEED,
            min_x,
            max_x,
            alive: true,
            squished: false,
            despawn_ticks: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Whether the mob can still hurt or be stomped
    pub fn is_active(&self) -> bool {
        self.alive && !self.squished
    }

    /// Step along the patrol line, turning around at either bound
    pub fn patrol(&mut self) {
        self.pos.x += self.vel_x;
        if self.pos.x <= self.min_x || self.pos.x + self.size.x >= self.max_x {
            self.vel_x = -self.vel_x;
        }
    }

    pub fn squish(&mut self, ticks: u32) {
        self.squished = true;
        self.despawn_ticks = ticks;
    }

    /// Count down a squished mob; returns true once it should be removed
    pub fn tick_despawn(&mut self) -> bool {
        if self.squished {
            self.despawn_ticks = self.despawn_ticks.saturating_sub(1);
            if self.despawn_ticks == 0 {
                self.alive = false;
            }
        }
        !self.alive
    }
}

/// A floating text or dust puff (purely visual)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub text: String,
    pub color: [f32; 4],
    pub size: f32,
    /// Frames remaining
    pub life: u32,
    /// Dust drifts slowly and jitters sideways
    pub dust: bool,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub climbing: bool,
    pub facing_right: bool,
    /// Simulation clock (ms) until which hazards are ignored
    pub invulnerable_until: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SPAWN_X, SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            grounded: false,
            climbing: false,
            facing_right: true,
            invulnerable_until: 0.0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn is_invulnerable(&self, now_ms: f64) -> bool {
        now_ms < self.invulnerable_until
    }

    /// Back to the spawn point, standing still
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(SPAWN_X, SPAWN_Y);
        self.vel = Vec2::ZERO;
        self.climbing = false;
    }
}

/// Cues for the audio adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    StartMusic,
    PauseMusic,
    GameOverCue,
    VictoryCue,
    Jump,
    Pickup,
    Stomp,
    Hurt,
    Lever,
}

/// Signals for the presentation layer, drained after each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    ScoreChanged { score: u32, total: u32 },
    LifeLost { lives: u8 },
    ItemFound { index: usize, hidden: bool },
    LeverToggled { index: usize, pulled: bool },
    MobStomped,
    ShowSign(String),
    HideSign,
    ShowGift {
        image: Option<String>,
        text: Option<String>,
    },
    HideGift,
    GameOver,
    Victory,
    ToggleMute,
    Audio(AudioCue),
}

/// Undrained events kept before the oldest are dropped
pub const MAX_EVENTS: usize = 256;

/// Minimum gap between overflow warnings
const DROP_WARNING_INTERVAL_MS: f64 = 1000.0;

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for dust jitter and decoration scatter
    pub seed: u64,
    pub phase: GamePhase,
    /// Items collected this run
    pub score: u32,
    pub lives: u8,
    /// Left edge of the view in world space
    pub camera_x: f32,
    /// Simulation clock in milliseconds
    pub clock_ms: f64,
    pub time_ticks: u64,
    pub tuning: Tuning,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub ladders: Vec<Ladder>,
    pub items: Vec<Item>,
    pub levers: Vec<Lever>,
    pub signs: Vec<Sign>,
    pub mobs: Vec<Mob>,
    /// Decorative flowers along the ground
    pub flowers: Vec<Vec2>,
    /// Castle door the player must reach
    pub goal: Rect,

    /// Index of the sign whose message is showing
    pub sign_open: Option<usize>,
    /// Index of the secret item whose gift popup is showing
    pub gift_open: Option<usize>,

    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Live particle limit; spawns beyond it are dropped
    #[serde(skip)]
    pub particle_cap: Option<usize>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    #[serde(skip)]
    dropped_events: u64,
    #[serde(skip)]
    last_drop_warning_ms: Option<f64>,
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a game sitting on the title screen
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let level = Level::builtin(seed);
        Self {
            seed,
            phase: GamePhase::Title,
            score: 0,
            lives: START_LIVES,
            camera_x: 0.0,
            clock_ms: 0.0,
            time_ticks: 0,
            tuning,
            player: Player::default(),
            platforms: level.platforms,
            moving_platforms: level.moving_platforms,
            ladders: level.ladders,
            items: level.items,
            levers: level.levers,
            signs: level.signs,
            mobs: level.mobs,
            flowers: level.flowers,
            goal: level.goal,
            sign_open: None,
            gift_open: None,
            particles: Vec::new(),
            particle_cap: None,
            events: Vec::new(),
            dropped_events: 0,
            last_drop_warning_ms: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start a fresh run: every mutable entity back to its level value
    pub fn reset(&mut self) {
        let size = self.player.size;
        let level = Level::builtin(self.seed);

        self.player = Player {
            size,
            ..Player::default()
        };
        self.score = 0;
        self.lives = START_LIVES;
        self.camera_x = 0.0;
        self.items = level.items;
        self.levers = level.levers;
        self.moving_platforms = level.moving_platforms;
        for platform in &mut self.moving_platforms {
            platform.reset();
        }
        self.mobs = level.mobs;
        self.sign_open = None;
        self.gift_open = None;
        self.particles.clear();
        self.phase = GamePhase::Playing;
    }

    /// Adopt the sprite's real size and stand the player on the floor
    pub fn set_player_size(&mut self, w: f32, h: f32) {
        self.player.size = Vec2::new(w, h);
        self.player.pos.y = LEVEL_FLOOR - h;
    }

    pub fn total_items(&self) -> u32 {
        TOTAL_ITEMS
    }

    pub fn all_items_found(&self) -> bool {
        self.score >= self.total_items()
    }

    /// Add a mob at runtime
    pub fn spawn_mob(&mut self, x: f32, y: f32, min_x: f32, max_x: f32) {
        self.mobs.push(Mob::new(x, y, min_x, max_x));
    }

    pub fn spawn_particle(&mut self, particle: Particle) {
        if let Some(cap) = self.particle_cap {
            if self.particles.len() >= cap {
                return;
            }
        }
        self.particles.push(particle);
    }

    /// Queue an event for the presentation layer
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
        if self.events.len() > MAX_EVENTS {
            let excess = self.events.len() - MAX_EVENTS;
            self.events.drain(..excess);
            self.dropped_events = self.dropped_events.saturating_add(excess as u64);
            if self.should_warn_drop() {
                log::warn!(
                    "Dropped {} undrained events (total dropped: {})",
                    excess,
                    self.dropped_events
                );
            }
        }
    }

    /// Overflow warnings go out at most once per second of game clock.
    /// The clock keeps running while paused, so a stalled consumer still
    /// gets reported.
    fn should_warn_drop(&mut self) -> bool {
        let due = self
            .last_drop_warning_ms
            .is_none_or(|last| self.clock_ms >= last + DROP_WARNING_INTERVAL_MS);
        if due {
            self.last_drop_warning_ms = Some(self.clock_ms);
        }
        due
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_on_title() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.items.len(), TOTAL_ITEMS as usize);
    }

    #[test]
    fn test_platform_eases_back_to_start() {
        let mut platform = MovingPlatform {
            id: 1,
            rect: Rect::new(1420.0, 335.0, 80.0, 20.0),
            kind: PlatformKind::Cloud,
            active: false,
            start_x: 1610.0,
            target_x: 1420.0,
            speed: 0.05,
        };
        platform.ease();
        assert!((platform.rect.x - (1420.0 + 190.0 * 0.05)).abs() < 1e-3);

        for _ in 0..400 {
            platform.ease();
        }
        assert!((platform.rect.x - 1610.0).abs() <= PLATFORM_SETTLE_DISTANCE);

        // Settled platforms stop moving entirely
        let settled = platform.rect.x;
        platform.ease();
        assert_eq!(platform.rect.x, settled);
    }

    #[test]
    fn test_squished_mob_despawns() {
        let mut mob = Mob::new(100.0, 0.0, 50.0, 200.0);
        mob.squish(3);
        assert!(!mob.is_active());
        assert!(!mob.tick_despawn());
        assert!(!mob.tick_despawn());
        assert!(mob.tick_despawn());
        assert!(!mob.alive);
    }

    #[test]
    fn test_event_queue_drops_oldest() {
        let mut state = GameState::new(1);
        for _ in 0..MAX_EVENTS {
            state.emit(GameEvent::MobStomped);
        }
        state.emit(GameEvent::Victory);
        assert_eq!(state.pending_events().len(), MAX_EVENTS);
        assert_eq!(state.dropped_events(), 1);
        assert_eq!(state.pending_events().last(), Some(&GameEvent::Victory));

        let drained = state.drain_events();
        assert_eq!(drained.len(), MAX_EVENTS);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_drop_warning_rate_limited_by_clock() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Paused;
        assert!(state.should_warn_drop());
        assert!(!state.should_warn_drop());

        // Ticks don't advance while paused, the clock does
        state.clock_ms += 999.0;
        assert!(!state.should_warn_drop());
        state.clock_ms += 1.0;
        assert!(state.should_warn_drop());
        assert!(!state.should_warn_drop());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(1);
        state.particle_cap = Some(1);
        for _ in 0..3 {
            state.spawn_particle(Particle {
                pos: Vec2::ZERO,
                text: "x".into(),
                color: [1.0; 4],
                size: 10.0,
                life: 10,
                dust: false,
            });
        }
        assert_eq!(state.particles.len(), 1);
    }

    #[test]
    fn test_pickup_icon_mapping() {
        let mut item = Item {
            pos: Vec2::ZERO,
            image: Some("cake".into()),
            icon: None,
            collected: false,
            hidden: false,
            description: None,
        };
        assert_eq!(item.pickup_icon(), "🍰");
        item.image = Some("teddy".into());
        assert_eq!(item.pickup_icon(), "✨");
        item.icon = Some("⭐".into());
        assert_eq!(item.pickup_icon(), "⭐");
    }
}
