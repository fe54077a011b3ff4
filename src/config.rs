use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use log::LevelFilter;
use serde::Deserialize;

/// Tunables for one page. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  pub canvas_size:u32,
  pub cell_size:u32,
  pub initial_speed:u32,    // ticks per second
  pub max_speed:u32,
  pub speed_step_score:u32, // speed goes up each time the score hits a multiple
  pub food_score:u32,
  pub start:(i32,i32),
  pub initial_food:(i32,i32),
  pub storage_key:String,
  pub log_level:LevelFilter,
}

impl Default for GameConfig {
  fn default() -> Self {
    GameConfig {
      canvas_size: 400,
      cell_size: 20,
      initial_speed: 7,
      max_speed: 15,
      speed_step_score: 50,
      food_score: 10,
      start: (10,10),
      initial_food: (15,15),
      storage_key: "snakeHighScore".to_string(),
      log_level: LevelFilter::Info,
    }
  }
}

impl GameConfig {
  pub fn from_json(json:&str) -> Result<GameConfig, ConfigError> {
    let config:GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.cell_size == 0 {return Err(ConfigError::ZeroCellSize)}
    if self.canvas_size == 0 || self.canvas_size % self.cell_size != 0 {
      return Err(ConfigError::UnevenGrid {canvas: self.canvas_size, cell: self.cell_size})
    }
    if self.initial_speed == 0 || self.max_speed == 0 {
      return Err(ConfigError::ZeroSpeed {initial: self.initial_speed, max: self.max_speed})
    }
    if self.initial_speed > self.max_speed {
      return Err(ConfigError::SpeedAboveMax {initial: self.initial_speed, max: self.max_speed})
    }
    let grid = self.grid();
    if grid.tile_count() < 2 {return Err(ConfigError::GridTooSmall(grid.tile_count()))}
    for (what, cell) in [("start", self.start_cell()), ("food", self.initial_food_cell())] {
      if !grid.in_bounds(cell) {
        return Err(ConfigError::OutsideGrid {what, x: cell.x, y: cell.y, tiles: grid.tile_count()})
      }
    }
    if self.start == self.initial_food {
      return Err(ConfigError::FoodOnSnake(self.initial_food.0, self.initial_food.1))
    }
    Ok(())
  }

  pub fn grid(&self) -> Grid {
    Grid::new((self.canvas_size / self.cell_size.max(1)) as i32)
  }

  pub fn start_cell(&self) -> Cell {
    Cell::new(self.start.0, self.start.1)
  }

  pub fn initial_food_cell(&self) -> Cell {
    Cell::new(self.initial_food.0, self.initial_food.1)
  }
}
