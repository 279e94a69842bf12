//! wasm-bindgen surface for the browser page
//!
//! The page calls `tick` from `requestAnimationFrame` with its timestamp,
//! forwards key/touch state through `set_thrust`, and draws from
//! `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::persistence::LocalStorageStore;
use crate::session::Session;
use crate::settings::{FormFactor, Tuning};
use crate::sim::{TickInput, Viewport};

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("AstroLab starting...");
}

/// One game session bound to the page
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a session sized to the canvas, picking the preset from its width
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsValue> {
        let viewport = Viewport::new(width, height).map_err(to_js)?;
        let tuning = Tuning::for_form_factor(FormFactor::from_viewport_width(width));
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(LocalStorageStore::default(), tuning, viewport, seed)
            .map_err(to_js)?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(WebGame {
            session,
            input: TickInput::default(),
        })
    }

    /// "Play" button
    pub fn start(&mut self, now_ms: f64) {
        self.session.start(now_ms);
    }

    /// "Play again" button
    pub fn restart(&mut self, now_ms: f64) {
        self.session.restart(now_ms);
    }

    /// Space / touch held
    pub fn set_thrust(&mut self, pressed: bool) {
        self.input.thrust = pressed;
    }

    /// Window resized
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.session.set_viewport(width, height).map_err(to_js)
    }

    /// Advance one frame. Returns whether another frame should be requested.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let input = self.input;
        self.session.tick(&input, now_ms);
        self.session.is_animating()
    }

    /// Everything the renderer needs for this frame, as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot())
            .map_err(|e| to_js(GameError::Serialization(e)))
    }

    /// Distance shown in the HUD, in whole meters
    pub fn distance(&self) -> f64 {
        self.session.distance().floor()
    }

    pub fn best_distance(&self) -> f64 {
        self.session.best_distance() as f64
    }

    pub fn grade(&self) -> String {
        self.session.grade().to_string()
    }

    pub fn share_text(&self) -> String {
        self.session.share_text()
    }

    pub fn can_share(&self) -> bool {
        self.session.can_share()
    }

    pub fn best_saved(&self) -> bool {
        self.session.best_saved()
    }
}
