//! Canvas2D backend
//!
//! Replays a `Scene` onto a `CanvasRenderingContext2d` and owns the loaded
//! sprite images.

use std::collections::HashMap;
use std::f64::consts::PI;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{AssetSource, Color, DrawCmd, Scene};
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// Sprite keys and where the page serves them from
pub const SPRITES: &[(&str, &str)] = &[
    ("player", "assets/girl_player.png"),
    ("castle", "assets/castle.png"),
    ("tree", "assets/tree.png"),
    ("cake", "assets/cake.png"),
    ("lipstick", "assets/lipstick.png"),
    ("guitar", "assets/guitar.png"),
    ("love_letter", "assets/love letter.png"),
    ("chocolate", "assets/chocolate.png"),
    ("necklace", "assets/necklace.png"),
    ("teddy", "assets/teddy.png"),
    ("flower", "assets/flower.png"),
];

pub fn sprite_src(key: &str) -> Option<&'static str> {
    SPRITES.iter().find(|(k, _)| *k == key).map(|(_, src)| *src)
}

/// CSS color string for a linear RGBA color
fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

/// Sprite images keyed by name, loading in the background
#[derive(Default)]
pub struct ImageStore {
    images: HashMap<String, HtmlImageElement>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `src` under `key`
    pub fn load(&mut self, key: &str, src: &str) -> Result<(), JsValue> {
        let img = HtmlImageElement::new()?;
        img.set_src(src);
        self.images.insert(key.to_string(), img);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&HtmlImageElement> {
        self.images.get(key)
    }
}

impl AssetSource for ImageStore {
    fn image_size(&self, key: &str) -> Option<Vec2> {
        let img = self.images.get(key)?;
        // A broken image reports complete with a zero natural size
        if img.complete() && img.natural_width() > 0 {
            Some(Vec2::new(img.natural_width() as f32, img.natural_height() as f32))
        } else {
            None
        }
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw a full frame
    pub fn render(&self, scene: &Scene, images: &ImageStore) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

        for cmd in &scene.commands {
            match cmd {
                DrawCmd::Save => ctx.save(),
                DrawCmd::Restore => ctx.restore(),
                DrawCmd::Translate(x, y) => ctx.translate(*x as f64, *y as f64)?,
                DrawCmd::Scale(x, y) => ctx.scale(*x as f64, *y as f64)?,
                DrawCmd::Alpha(a) => ctx.set_global_alpha(*a as f64),
                DrawCmd::VerticalGradient { top, bottom } => {
                    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, VIEW_HEIGHT as f64);
                    gradient.add_color_stop(0.0, &css(*top))?;
                    gradient.add_color_stop(1.0, &css(*bottom))?;
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
                }
                DrawCmd::Rect { rect, color } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::StrokeRect { rect, color } => {
                    ctx.set_stroke_style_str(&css(*color));
                    ctx.set_line_width(2.0);
                    ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, PI * 2.0)?;
                    ctx.fill();
                }
                DrawCmd::Dome {
                    center,
                    radii,
                    color,
                } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.begin_path();
                    ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        0.0,
                        PI,
                        0.0,
                    )?;
                    ctx.fill();
                }
                DrawCmd::Polygon { points, color } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.set_fill_style_str(&css(*color));
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    ctx.fill();
                }
                DrawCmd::Text {
                    pos,
                    text,
                    size,
                    color,
                    centered,
                    glow,
                } => {
                    ctx.save();
                    ctx.set_font(&format!("{}px 'Press Start 2P', monospace", size));
                    ctx.set_text_align(if *centered { "center" } else { "left" });
                    if *glow {
                        ctx.set_shadow_color("white");
                        ctx.set_shadow_blur(4.0);
                    }
                    ctx.set_fill_style_str(&css(*color));
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                    ctx.restore();
                }
                DrawCmd::Image { key, rect } => {
                    if let Some(img) = images.get(key) {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            rect.x as f64,
                            rect.y as f64,
                            rect.w as f64,
                            rect.h as f64,
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
