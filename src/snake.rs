use crate::grid::{Cell, Grid, Velocity};
use thiserror::Error;

/// Why a step ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Collision {
  #[error("hit the wall at {0}")]
  Wall(Cell),
  #[error("ran into itself at {0}")]
  SelfBite(Cell),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
  pub head:Cell,
  pub ate_food:bool,
}

/// Occupied cells, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
  body:Vec<Cell>,
}

impl Snake {
  pub fn new(start:Cell) -> Snake {
    Snake {body: vec![start]}
  }

  #[cfg(test)]
  pub(crate) fn from_cells(body:Vec<Cell>) -> Snake {
    assert!(!body.is_empty());
    Snake {body}
  }

  pub fn head(&self) -> Cell {
    self.body[0]
  }

  pub fn body(&self) -> &[Cell] {
    &self.body
  }

  pub fn len(&self) -> usize {
    self.body.len()
  }

  pub fn contains(&self, cell:Cell) -> bool {
    self.body.contains(&cell)
  }

  /// Moves the head one step. The tail is still in place when the new head
  /// is tested, so following it directly counts as a collision. On error the
  /// body is unchanged.
  pub fn advance(&mut self, velocity:Velocity, food:Cell, grid:&Grid)
    -> Result<Step, Collision>
  {
    let head = self.head() + velocity;
    if !grid.in_bounds(head) {return Err(Collision::Wall(head))}
    if grid.is_occupied(head, &self.body) {return Err(Collision::SelfBite(head))}

    self.body.insert(0, head);
    let ate_food = head == food;
    if !ate_food {self.body.pop();}
    Ok(Step {head, ate_food})
  }
}
