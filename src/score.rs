use crate::error::GameError;

/// Where the best score lives between page loads.
pub trait ScoreStore {
  /// Raw stored value, `None` if nothing was ever written.
  fn read(&self) -> Result<Option<String>, GameError>;
  fn write(&mut self, value:&str) -> Result<(), GameError>;
}

/// Absent, unreadable or malformed values all count as no prior score.
pub fn parse_stored(raw:Option<&str>) -> u32 {
  match raw.map(str::trim) {
    None => 0,
    Some(s) => s.parse::<u32>().unwrap_or_else(|_| {
      log::warn!("ignoring malformed stored high score {s:?}");
      0
    })
  }
}

/// Current and best score. The best only ever goes up.
#[derive(Debug)]
pub struct Scoreboard<St:ScoreStore> {
  store:St,
  score:u32,
  high_score:u32,
}

impl<St:ScoreStore> Scoreboard<St> {
  /// Reads the stored best once.
  pub fn load(store:St) -> Self {
    let high_score = match store.read() {
      Ok(raw) => parse_stored(raw.as_deref()),
      Err(e) => {
        log::warn!("{e}; starting from 0");
        0
      }
    };
    Scoreboard {store, score: 0, high_score}
  }

  pub fn score(&self) -> u32 {self.score}
  pub fn high_score(&self) -> u32 {self.high_score}

  pub fn add(&mut self, points:u32) -> u32 {
    self.score = self.score.saturating_add(points);
    self.score
  }

  pub fn clear(&mut self) {
    self.score = 0;
  }

  /// Promotes the run's score if it beats the best, writing it through.
  /// Returns whether a new best was set.
  pub fn settle(&mut self) -> bool {
    if self.score <= self.high_score {return false}
    self.high_score = self.score;
    if let Err(e) = self.store.write(&self.high_score.to_string()) {
      log::warn!("{e}; high score kept for this page only");
    }
    true
  }

  #[cfg(test)]
  pub(crate) fn store(&self) -> &St {
    &self.store
  }
}
