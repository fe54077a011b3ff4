use crate::grid::Velocity;

/// A steering request, whichever channel it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {Up,Down,Left,Right}

impl Intent {
  /// Maps a `KeyboardEvent.key` value. Letters are case-insensitive.
  pub fn from_key(key:&str) -> Option<Intent> {
    match key {
      "ArrowUp"    => Some(Intent::Up),
      "ArrowDown"  => Some(Intent::Down),
      "ArrowLeft"  => Some(Intent::Left),
      "ArrowRight" => Some(Intent::Right),
      k if k.eq_ignore_ascii_case("w") => Some(Intent::Up),
      k if k.eq_ignore_ascii_case("s") => Some(Intent::Down),
      k if k.eq_ignore_ascii_case("a") => Some(Intent::Left),
      k if k.eq_ignore_ascii_case("d") => Some(Intent::Right),
      _ => None
    }
  }

  /// Maps the id of an on-screen direction button.
  pub fn from_button_id(id:&str) -> Option<Intent> {
    match id {
      "upBtn"    => Some(Intent::Up),
      "downBtn"  => Some(Intent::Down),
      "leftBtn"  => Some(Intent::Left),
      "rightBtn" => Some(Intent::Right),
      _ => None
    }
  }

  pub fn velocity(self) -> Velocity {
    match self {
      Intent::Up    => Velocity::UP,
      Intent::Down  => Velocity::DOWN,
      Intent::Left  => Velocity::LEFT,
      Intent::Right => Velocity::RIGHT,
    }
  }
}

/// `current` is what the last step used, `pending` what the next will use.
/// The guard compares against `current`, so several intents inside one tick
/// can never fold the head back onto the neck.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Steering {
  current:Velocity,
  pending:Velocity,
}

impl Steering {
  pub fn new(initial:Velocity) -> Steering {
    Steering {current: initial, pending: initial}
  }

  pub fn pending(&self) -> Velocity {
    self.pending
  }

  pub fn current(&self) -> Velocity {
    self.current
  }

  /// Returns whether the intent was accepted.
  pub fn steer(&mut self, intent:Intent) -> bool {
    let wanted = intent.velocity();
    if wanted == self.current.opposite() {return false}
    self.pending = wanted;
    true
  }

  /// Promotes the pending velocity for the step about to run.
  pub fn commit(&mut self) -> Velocity {
    self.current = self.pending;
    self.current
  }
}
