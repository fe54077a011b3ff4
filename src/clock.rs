use crate::error::GameError;
use std::time::Duration;

/// Something that can fire a repeating callback. The callback itself is
/// bound when the scheduler is built; this seam only controls the rate.
pub trait Scheduler {
  /// Begins firing every `period`. Callers cancel first.
  fn schedule(&mut self, period:Duration) -> Result<(), GameError>;
  fn cancel(&mut self);
}

/// The single repeating tick of a session.
#[derive(Debug)]
pub struct Clock<S:Scheduler> {
  scheduler:S,
  speed:u32,
  active:bool,
}

impl<S:Scheduler> Clock<S> {
  pub fn new(scheduler:S, speed:u32) -> Self {
    Clock {scheduler, speed, active: false}
  }

  pub fn period(speed:u32) -> Duration {
    Duration::from_millis(1000 / u64::from(speed.max(1)))
  }

  pub fn speed(&self) -> u32 {
    self.speed
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Stops any running timer and starts one at `speed`. The old timer is
  /// gone before the new one exists. If the new rate cannot be scheduled, a
  /// previously running clock is put back at its old rate and the error is
  /// still returned; `is_active` tells the caller which case it is in.
  pub fn start(&mut self, speed:u32) -> Result<(), GameError> {
    let was_active = self.active;
    self.stop();
    if let Err(e) = self.scheduler.schedule(Self::period(speed)) {
      if was_active && self.scheduler.schedule(Self::period(self.speed)).is_ok() {
        self.active = true;
      }
      return Err(e)
    }
    self.speed = speed;
    self.active = true;
    Ok(())
  }

  pub fn stop(&mut self) {
    if self.active {
      self.scheduler.cancel();
      self.active = false;
    }
  }

  /// Records a speed without touching the timer, for use while stopped.
  pub fn set_speed(&mut self, speed:u32) {
    self.speed = speed;
  }

  #[cfg(test)]
  pub(crate) fn scheduler(&self) -> &S {
    &self.scheduler
  }
}
