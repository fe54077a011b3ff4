use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config is not valid JSON: {0}")]
  Parse(#[from] serde_json::Error),
  #[error("cell size must be positive")]
  ZeroCellSize,
  #[error("canvas size {canvas} is not a multiple of cell size {cell}")]
  UnevenGrid {canvas:u32, cell:u32},
  #[error("speeds must be positive (initial {initial}, max {max})")]
  ZeroSpeed {initial:u32, max:u32},
  #[error("initial speed {initial} exceeds max speed {max}")]
  SpeedAboveMax {initial:u32, max:u32},
  #[error("a {0}x{0} grid leaves no room for food")]
  GridTooSmall(i32),
  #[error("{what} {x},{y} lies outside a {tiles}x{tiles} grid")]
  OutsideGrid {what:&'static str, x:i32, y:i32, tiles:i32},
  #[error("food {0},{1} starts on the snake")]
  FoodOnSnake(i32, i32),
}

#[derive(Debug, Error)]
pub enum GameError {
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error("page element '{0}' is missing or has the wrong type")]
  MissingElement(&'static str),
  #[error("{context}: {message}")]
  Js {context:&'static str, message:String},
  #[error("could not schedule the game clock: {0}")]
  Clock(String),
  #[error("high score storage: {0}")]
  Storage(String),
}

impl From<GameError> for wasm_bindgen::JsValue {
  fn from(err:GameError) -> Self {
    wasm_bindgen::JsValue::from_str(&err.to_string())
  }
}
