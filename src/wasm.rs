//! Browser bindings. The page draws the board and forwards pointer clicks;
//! everything it renders comes from the snapshots returned here.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::moves::LegalMove;
use crate::session::Session;
use crate::types::Square;

#[wasm_bindgen]
pub struct WasmGame {
    session: Session,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` may be `undefined`/`null` for the defaults, or a partial
    /// [`SessionConfig`] object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<SessionConfig>(config)?.validate()?
        };
        Ok(Self {
            session: Session::new(&config),
        })
    }

    /// Human move by board coordinates.
    pub fn place(&mut self, col: i32, row: i32) -> Result<JsValue, JsError> {
        let square = Square::new(col, row)?;
        let state = self.session.place(square)?;
        to_js(&state)
    }

    /// Human move by pointer position, followed by the computer's replies.
    pub fn click(&mut self, x: f64, y: f64) -> Result<JsValue, JsError> {
        let state = self.session.click(x, y)?;
        to_js(&state)
    }

    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&mut self) -> Result<JsValue, JsError> {
        let state = self.session.computer_move()?;
        to_js(&state)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.game().state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        let moves: Vec<&LegalMove> = self.session.game().legal_moves().iter().collect();
        to_js(&moves)
    }

    #[wasm_bindgen(js_name = isHumanTurn)]
    pub fn is_human_turn(&self) -> bool {
        self.session.is_human_turn()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.game().is_game_over()
    }

    /// `null` until the game is over.
    pub fn outcome(&self) -> Result<JsValue, JsError> {
        match self.session.game().outcome() {
            Some(outcome) => to_js(&outcome),
            None => Ok(JsValue::NULL),
        }
    }

    /// Record for the page to hand to its score storage.
    #[wasm_bindgen(js_name = scoreRecord)]
    pub fn score_record(&self, name: String) -> Result<JsValue, JsError> {
        let record = self.session.score_record(name)?;
        to_js(&record)
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_text(&self) -> String {
        self.session.game().to_string()
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
