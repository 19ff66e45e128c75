//! Heart Quest - A side-scrolling treasure-hunt platformer
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics, collisions, hazards, game state)
//! - `frame`: Fixed timestep accumulator driving the simulation
//! - `renderer`: Pure scene builder plus a Canvas2D backend on the web
//! - `tuning`: Data-driven physics and gameplay balance
//! - `settings`: Presentation preferences
//! - `ui` / `audio`: Browser adapters consuming simulation events

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use frame::FrameLoop;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the physics constants are tuned per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Canvas dimensions
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 400.0;

    /// Top edge of the ground platforms
    pub const LEVEL_FLOOR: f32 = 350.0;
    /// Items needed to open the castle
    pub const TOTAL_ITEMS: u32 = 8;
    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;

    /// Player defaults (replaced by the sprite size once it loads)
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 200.0;

    /// Physics defaults (pixels per frame)
    pub const GRAVITY: f32 = 0.5;
    pub const FRICTION: f32 = 0.8;
    pub const ACCELERATION: f32 = 0.4;
    pub const MAX_SPEED: f32 = 5.0;
    pub const JUMP_FORCE: f32 = -9.0;
    pub const CLIMB_SPEED: f32 = 3.0;
    pub const CLIMB_STRAFE: f32 = 2.0;
}
