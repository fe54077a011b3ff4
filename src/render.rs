use crate::grid::Cell;
use crate::snake::Snake;

const BACKGROUND:&str = "#ecf0f1";
const SNAKE_HEAD:&str = "#2c3e50";
const SNAKE_BODY:&str = "#11998e";
const SNAKE_EYE:&str  = "white";
const FOOD:&str       = "#e74c3c";
const OVERLAY:&str    = "rgba(0, 0, 0, 0.7)";
const OVERLAY_TEXT:&str = "white";

/// The few drawing primitives the game needs, in canvas units.
pub trait Surface {
  fn fill_rect(&mut self, x:f64, y:f64, w:f64, h:f64, colour:&str);
  fn fill_circle(&mut self, cx:f64, cy:f64, r:f64, colour:&str);
  /// Draws `text` centred horizontally on `x`.
  fn fill_text(&mut self, text:&str, x:f64, y:f64, font:&str, colour:&str);
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
  canvas:f64,
  cell:f64,
}

impl Renderer {
  pub fn new(canvas_size:u32, cell_size:u32) -> Renderer {
    Renderer {canvas: f64::from(canvas_size), cell: f64::from(cell_size)}
  }

  /// Paints the full board. Reads state, never changes it.
  pub fn draw<D:Surface + ?Sized>(&self, surface:&mut D, snake:&Snake, food:Cell) {
    surface.fill_rect(0.0, 0.0, self.canvas, self.canvas, BACKGROUND);

    for (i, segment) in snake.body().iter().enumerate() {
      let (x,y) = self.origin(*segment);
      let colour = if i == 0 {SNAKE_HEAD} else {SNAKE_BODY};
      surface.fill_rect(x, y, self.cell - 2.0, self.cell - 2.0, colour);
      if i == 0 {
        // eyes are a fifth of the cell, inset by a fifth
        let eye = self.cell / 5.0;
        surface.fill_rect(x + eye, y + eye, eye, eye, SNAKE_EYE);
        surface.fill_rect(x + eye * 3.0, y + eye, eye, eye, SNAKE_EYE);
      }
    }

    let (x,y) = self.origin(food);
    let half = self.cell / 2.0;
    surface.fill_circle(x + half, y + half, half - 2.0, FOOD);
  }

  pub fn draw_game_over<D:Surface + ?Sized>(&self, surface:&mut D, score:u32) {
    let mid = self.canvas / 2.0;
    surface.fill_rect(0.0, 0.0, self.canvas, self.canvas, OVERLAY);
    surface.fill_text("Game Over!", mid, mid - 20.0, "bold 30px Arial", OVERLAY_TEXT);
    surface.fill_text(&format!("Score: {score}"), mid, mid + 20.0, "20px Arial", OVERLAY_TEXT);
  }

  fn origin(&self, cell:Cell) -> (f64,f64) {
    (f64::from(cell.x) * self.cell, f64::from(cell.y) * self.cell)
  }
}
