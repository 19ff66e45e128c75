//! DOM overlays and HUD counters
//!
//! Mirrors simulation events onto the page: item counters, the sign and gift
//! popups, the start, game over and victory screens and the mute button.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::renderer::canvas::sprite_src;
use crate::sim::GameEvent;

const SIGN_OVERLAY: &str = "sign-overlay";
const SIGN_TEXT: &str = "sign-text";
const GIFT_OVERLAY: &str = "gift-overlay";
const GIFT_IMAGE: &str = "gift-reveal-img";
const GIFT_DESCRIPTION: &str = "gift-description";
const GAME_OVER_OVERLAY: &str = "game-over-overlay";
const VICTORY_OVERLAY: &str = "victory-overlay";
const START_OVERLAY: &str = "start-screen-overlay";
const ITEM_COUNT: &str = "item-count";
const TOTAL_ITEM_COUNT: &str = "total-item-count";
const MISSION_COUNT: &str = "mission-count";
const MUTE_BUTTON: &str = "btn-mute";

pub struct Ui {
    document: Document,
}

impl Ui {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Popups toggled through the `hidden` class
    fn set_hidden(&self, id: &str, hidden: bool) {
        let Some(el) = self.element(id) else {
            log::debug!("Missing #{}", id);
            return;
        };
        let classes = el.class_list();
        let result = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle #{}: {:?}", id, e);
        }
    }

    /// Full-screen overlays toggled through `display`
    fn set_shown(&self, id: &str, shown: bool) {
        let Some(el) = self
            .element(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        self.set_hidden(id, !shown);
        let display = if shown { "flex" } else { "none" };
        if let Err(e) = el.style().set_property("display", display) {
            log::warn!("Failed to style #{}: {:?}", id, e);
        }
    }

    /// Initial counter values before the first run
    pub fn init_counters(&self, total: u32) {
        let total = total.to_string();
        self.set_text(TOTAL_ITEM_COUNT, &total);
        self.set_text(MISSION_COUNT, &total);
        self.set_text(ITEM_COUNT, "0");
    }

    pub fn set_muted(&self, muted: bool) {
        self.set_text(MUTE_BUTTON, if muted { "🔇" } else { "🔊" });
    }

    /// Apply one simulation event to the page
    pub fn handle(&self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted => {
                self.set_hidden(SIGN_OVERLAY, true);
                self.set_hidden(GIFT_OVERLAY, true);
                self.set_shown(GAME_OVER_OVERLAY, false);
                self.set_shown(VICTORY_OVERLAY, false);
                self.set_shown(START_OVERLAY, false);
            }
            GameEvent::ScoreChanged { score, total } => {
                self.set_text(ITEM_COUNT, &score.to_string());
                self.set_text(TOTAL_ITEM_COUNT, &total.to_string());
            }
            GameEvent::ShowSign(message) => {
                self.set_text(SIGN_TEXT, message);
                self.set_hidden(SIGN_OVERLAY, false);
            }
            GameEvent::HideSign => self.set_hidden(SIGN_OVERLAY, true),
            GameEvent::ShowGift { image, text } => {
                if let Some(src) = image.as_deref().and_then(sprite_src) {
                    if let Some(img) = self
                        .element(GIFT_IMAGE)
                        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
                    {
                        img.set_src(src);
                    }
                }
                if let Some(text) = text {
                    self.set_text(GIFT_DESCRIPTION, text);
                }
                self.set_hidden(GIFT_OVERLAY, false);
            }
            GameEvent::HideGift => self.set_hidden(GIFT_OVERLAY, true),
            GameEvent::GameOver => self.set_shown(GAME_OVER_OVERLAY, true),
            GameEvent::Victory => self.set_shown(VICTORY_OVERLAY, true),
            GameEvent::LifeLost { lives } => log::debug!("Lives left: {}", lives),
            GameEvent::ItemFound { .. }
            | GameEvent::LeverToggled { .. }
            | GameEvent::MobStomped
            | GameEvent::ToggleMute
            | GameEvent::Audio(_) => {}
        }
    }
}

/// Hide the loading indicator if the page has one
pub fn hide_loading(document: &Document) -> Result<(), JsValue> {
    if let Some(el) = document.get_element_by_id("loading") {
        el.class_list().add_1("hidden")?;
    }
    Ok(())
}
