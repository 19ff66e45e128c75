//! Rendering module
//!
//! `scene` builds a backend-independent draw list from the game state; on the
//! web `canvas` replays it through the 2D canvas API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, ImageStore};
pub use scene::{AssetSource, DrawCmd, NoAssets, Scene, build_scene};
