//! Fixed timestep driver
//!
//! The browser hands us variable frame times; the simulation wants exact
//! 60 Hz steps. Leftover time carries over to the next frame.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Longest real-time gap accepted in one frame (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Default)]
pub struct FrameLoop {
    accumulator: f32,
    /// Total fixed steps run
    pub steps: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many fixed steps as `dt` covers and return what they emitted
    ///
    /// One-shot presses are delivered to the first step only.
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, dt: f32) -> Vec<GameEvent> {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT);
            input.clear_presses();
            self.accumulator -= SIM_DT;
            self.steps += 1;
            substeps += 1;
        }

        state.drain_events()
    }

    /// Fraction of a step waiting in the accumulator
    pub fn pending(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
