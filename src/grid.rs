use std::fmt;
use std::ops::Add;

/// A tile position. Signed so a head stepping past an edge is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
  pub x:i32,
  pub y:i32,
}

impl Cell {
  pub const fn new(x:i32, y:i32) -> Cell {
    Cell {x,y}
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// Per-tick displacement of the head. Only the zero vector and the four unit
/// vectors are constructible.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
  dx:i32,
  dy:i32,
}

impl Velocity {
  pub const STILL:Velocity = Velocity {dx: 0, dy: 0};
  pub const UP:Velocity    = Velocity {dx: 0, dy:-1};
  pub const DOWN:Velocity  = Velocity {dx: 0, dy: 1};
  pub const LEFT:Velocity  = Velocity {dx:-1, dy: 0};
  pub const RIGHT:Velocity = Velocity {dx: 1, dy: 0};

  pub fn dx(&self) -> i32 {self.dx}
  pub fn dy(&self) -> i32 {self.dy}

  pub fn is_still(&self) -> bool {
    *self == Velocity::STILL
  }

  pub fn opposite(&self) -> Velocity {
    Velocity {dx: -self.dx, dy: -self.dy}
  }
}

impl Add<Velocity> for Cell {
  type Output = Cell;
  fn add(self, v:Velocity) -> Cell {
    Cell::new(self.x + v.dx, self.y + v.dy)
  }
}

/// Square board of `tile_count` × `tile_count` cells. Edges do not wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
  tile_count:i32,
}

impl Grid {
  pub const fn new(tile_count:i32) -> Grid {
    Grid {tile_count}
  }

  pub fn tile_count(&self) -> i32 {
    self.tile_count
  }

  pub fn area(&self) -> usize {
    (self.tile_count.max(0) as usize).pow(2)
  }

  pub fn in_bounds(&self, cell:Cell) -> bool {
    (0..self.tile_count).contains(&cell.x) && (0..self.tile_count).contains(&cell.y)
  }

  pub fn is_occupied(&self, cell:Cell, body:&[Cell]) -> bool {
    body.contains(&cell)
  }

  /// Every cell on the board, row by row.
  pub fn cells(&self) -> impl Iterator<Item = Cell> + Clone {
    let n = self.tile_count;
    (0..n).flat_map(move |y| (0..n).map(move |x| Cell::new(x,y)))
  }
}
