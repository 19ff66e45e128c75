//! Simulation module
//!
//! All gameplay logic lives here. It must stay free of rendering and platform
//! dependencies:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Presentation is told what happened through `GameEvent`s

pub mod collision;
pub mod geom;
pub mod interact;
pub mod level;
pub mod particles;
pub mod physics;
pub mod state;
pub mod tick;

pub use geom::Rect;
pub use level::{GOAL, Level};
pub use state::{
    AudioCue, GameEvent, GamePhase, GameState, Item, Ladder, Lever, Mob, MovingPlatform,
    Particle, Platform, PlatformKind, Player, Sign,
};
pub use tick::{TickInput, start_new_game, tick};
