//! DOM presentation surface
//!
//! Expects this markup on the page:
//! - `#gameCanvas`: play surface (positioned container)
//! - `#gameCharacter`: the actor, containing `.character-pupil` elements
//! - `#characterBubble`: speech bubble
//! - `#gameScore`, `#gameTimer`: HUD labels

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::sim::{Collectible, CollectibleKind};
use crate::surface::{BubbleAnchor, Surface};

/// Particles per burst
const BURST_PARTICLES: u32 = 8;
/// How long burst particles stay in the DOM
const PARTICLE_LIFETIME_MS: i32 = 1000;

pub struct DomSurface {
    document: Document,
    canvas: HtmlElement,
    character: HtmlElement,
    bubble: HtmlElement,
    pupils: Vec<HtmlElement>,
    score: Option<HtmlElement>,
    timer: Option<HtmlElement>,
    treasures: HashMap<u32, HtmlElement>,
}

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn required(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    html_element(document, id).ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
}

fn px(value: f32) -> String {
    format!("{}px", value)
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("Failed to set {}: {:?}", property, e);
    }
}

impl DomSurface {
    /// Bind to the page's game elements
    pub fn new(document: Document) -> Result<Self, JsValue> {
        let canvas = required(&document, "gameCanvas")?;
        let character = required(&document, "gameCharacter")?;
        let bubble = required(&document, "characterBubble")?;

        let mut pupils = Vec::new();
        let nodes = character.query_selector_all(".character-pupil")?;
        for i in 0..nodes.length() {
            if let Some(pupil) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                pupils.push(pupil);
            }
        }

        let score = html_element(&document, "gameScore");
        let timer = html_element(&document, "gameTimer");
        if score.is_none() || timer.is_none() {
            log::warn!("HUD labels missing, score/timer will not be shown");
        }

        Ok(Self {
            document,
            canvas,
            character,
            bubble,
            pupils,
            score,
            timer,
            treasures: HashMap::new(),
        })
    }

    /// The play surface element (for input listeners and settings)
    pub fn canvas(&self) -> &HtmlElement {
        &self.canvas
    }

    /// The actor element (for click listeners)
    pub fn character(&self) -> &HtmlElement {
        &self.character
    }

    fn create_div(&self, class: &str) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        el.set_class_name(class);
        Ok(el)
    }

    fn build_treasure(&self, collectible: &Collectible) -> Result<HtmlElement, JsValue> {
        let kind = collectible.kind.as_str();
        let treasure = self.create_div("data-treasure")?;
        treasure.set_attribute("data-type", kind)?;
        treasure.set_attribute("data-value", &collectible.value().to_string())?;

        let inner = self.create_div(&format!("treasure-{}", kind))?;
        if collectible.kind == CollectibleKind::Coin {
            inner.set_text_content(Some("$"));
        }
        treasure.append_child(&inner)?;

        set_style(&treasure, "left", &px(collectible.pos.x));
        set_style(&treasure, "top", &px(collectible.pos.y));
        self.canvas.append_child(&treasure)?;
        Ok(treasure)
    }

    fn build_particle(&self, at: Vec2, index: u32) -> Result<(), JsValue> {
        let particle = self.create_div("particle-effect")?;
        set_style(&particle, "left", &px(at.x));
        set_style(&particle, "top", &px(at.y));
        let spread = js_sys::Math::random() * 20.0;
        set_style(
            &particle,
            "transform",
            &format!("rotate({}deg) translateX({}px)", index * 45, spread),
        );
        self.canvas.append_child(&particle)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let cleanup = Closure::once_into_js(move || particle.remove());
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cleanup.unchecked_ref(),
            PARTICLE_LIFETIME_MS,
        )?;
        Ok(())
    }
}

impl Surface for DomSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(
            self.canvas.offset_width() as f32,
            self.canvas.offset_height() as f32,
        )
    }

    fn place_collectible(&mut self, collectible: &Collectible) {
        match self.build_treasure(collectible) {
            Ok(el) => {
                self.treasures.insert(collectible.id, el);
            }
            Err(e) => log::warn!("Failed to place treasure #{}: {:?}", collectible.id, e),
        }
    }

    fn remove_collectible(&mut self, id: u32) {
        if let Some(el) = self.treasures.remove(&id) {
            el.remove();
        }
    }

    fn move_actor(&mut self, pos: Vec2) {
        set_style(&self.character, "left", &px(pos.x));
        set_style(&self.character, "top", &px(pos.y));
    }

    fn aim_pupils(&mut self, offsets: &[Vec2]) {
        if offsets.is_empty() {
            return;
        }
        for (i, pupil) in self.pupils.iter().enumerate() {
            let offset = offsets[i % offsets.len()];
            set_style(
                pupil,
                "transform",
                &format!(
                    "translate(calc(-50% + {}px), calc(-50% + {}px))",
                    offset.x, offset.y
                ),
            );
        }
    }

    fn set_score(&mut self, score: u32) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn set_time_left(&mut self, secs: u32) {
        if let Some(el) = &self.timer {
            el.set_text_content(Some(&secs.to_string()));
        }
    }

    fn show_bubble(&mut self, text: &str, anchor: BubbleAnchor) {
        self.bubble.set_text_content(Some(text));
        match anchor {
            BubbleAnchor::At(pos) => {
                set_style(&self.bubble, "left", &px(pos.x));
                set_style(&self.bubble, "top", &px(pos.y));
                set_style(&self.bubble, "transform", "");
                set_style(&self.bubble, "width", "");
            }
            BubbleAnchor::Centered => {
                set_style(&self.bubble, "left", "50%");
                set_style(&self.bubble, "top", "50%");
                set_style(&self.bubble, "transform", "translate(-50%, -50%)");
                set_style(&self.bubble, "width", "200px");
            }
        }
        if let Err(e) = self.bubble.class_list().add_1("show") {
            log::warn!("Failed to show bubble: {:?}", e);
        }
    }

    fn hide_bubble(&mut self) {
        if let Err(e) = self.bubble.class_list().remove_1("show") {
            log::warn!("Failed to hide bubble: {:?}", e);
        }
        set_style(&self.bubble, "transform", "");
        set_style(&self.bubble, "width", "");
    }

    fn burst(&mut self, at: Vec2) {
        for i in 0..BURST_PARTICLES {
            if let Err(e) = self.build_particle(at, i) {
                log::warn!("Failed to spawn particle: {:?}", e);
                break;
            }
        }
    }
}
