use crate::grid::{Cell, Grid};
use crate::snake::Snake;
use rand::seq::IteratorRandom;
use rand::Rng;

/// Picks a cell uniformly among those the snake does not cover, or `None`
/// when the board is full. Sampling over the free cells directly means no
/// retry loop is needed however crowded the grid gets.
pub fn spawn<R:Rng + ?Sized>(grid:&Grid, snake:&Snake, rng:&mut R) -> Option<Cell> {
  grid.cells().filter(|cell| !snake.contains(*cell)).choose(rng)
}
