use crate::clock::{Clock, Scheduler};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::food;
use crate::grid::{Cell, Grid, Velocity};
use crate::input::{Intent, Steering};
use crate::render::{Renderer, Surface};
use crate::score::{ScoreStore, Scoreboard};
use crate::snake::Snake;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {Idle, Running, Paused, Ended}

/// What the page buttons should look like for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
  pub start_enabled:bool,
  pub pause_enabled:bool,
  pub pause_label:&'static str,
}

/// One page's game: board, score and the clock that drives them.
pub struct Session<S:Scheduler, St:ScoreStore, R:Rng> {
  config:GameConfig,
  grid:Grid,
  renderer:Renderer,
  snake:Snake,
  food:Cell,
  steering:Steering,
  scoreboard:Scoreboard<St>,
  clock:Clock<S>,
  rng:R,
  state:GameState,
}

impl<S:Scheduler, St:ScoreStore, R:Rng> Session<S,St,R> {
  pub fn new(config:GameConfig, scheduler:S, store:St, rng:R) -> Self {
    let grid = config.grid();
    let renderer = Renderer::new(config.canvas_size, config.cell_size);
    let clock = Clock::new(scheduler, config.initial_speed);
    let scoreboard = Scoreboard::load(store);
    log::debug!("loaded high score {}", scoreboard.high_score());
    Session {
      snake: Snake::new(config.start_cell()),
      food: config.initial_food_cell(),
      steering: Steering::default(),
      grid, renderer, scoreboard, clock, rng, config,
      state: GameState::Idle,
    }
  }

  pub fn state(&self) -> GameState {self.state}
  pub fn snake(&self) -> &Snake {&self.snake}
  pub fn food(&self) -> Cell {self.food}
  pub fn score(&self) -> u32 {self.scoreboard.score()}
  pub fn high_score(&self) -> u32 {self.scoreboard.high_score()}
  pub fn speed(&self) -> u32 {self.clock.speed()}
  pub fn velocity(&self) -> Velocity {self.steering.pending()}

  pub fn controls(&self) -> Controls {
    let in_play = matches!(self.state, GameState::Running | GameState::Paused);
    Controls {
      start_enabled: !in_play,
      pause_enabled: in_play,
      pause_label: if self.state == GameState::Paused {"Resume"} else {"Pause"},
    }
  }

  /// Begins a fresh run from Idle or Ended. Ignored mid-run.
  pub fn start(&mut self) -> Result<(), GameError> {
    if !matches!(self.state, GameState::Idle | GameState::Ended) {return Ok(())}
    self.snake = Snake::new(self.config.start_cell());
    self.steering = Steering::new(Velocity::RIGHT);
    self.scoreboard.clear();
    self.food = food::spawn(&self.grid, &self.snake, &mut self.rng)
      .unwrap_or_else(|| {
        log::warn!("no free cell for food, using the initial cell");
        self.config.initial_food_cell()
      });
    self.clock.start(self.config.initial_speed)?;
    self.state = GameState::Running;
    log::debug!("run started, food at {}", self.food);
    Ok(())
  }

  pub fn toggle_pause(&mut self) {
    self.state = match self.state {
      GameState::Running => GameState::Paused,
      GameState::Paused  => GameState::Running,
      other => {
        log::trace!("pause ignored while {other:?}");
        return
      }
    };
    log::debug!("now {:?}", self.state);
  }

  /// Back to the initial board from any state, drawn once.
  pub fn reset<D:Surface + ?Sized>(&mut self, surface:&mut D) {
    self.clock.stop();
    self.clock.set_speed(self.config.initial_speed);
    self.snake = Snake::new(self.config.start_cell());
    self.food = self.config.initial_food_cell();
    self.steering = Steering::default();
    self.scoreboard.clear();
    self.state = GameState::Idle;
    self.draw(surface);
  }

  /// Feeds a direction change. Only takes effect during an unpaused run.
  pub fn steer(&mut self, intent:Intent) -> bool {
    if self.state != GameState::Running {return false}
    self.steering.steer(intent)
  }

  /// One clock firing: advance if running, then repaint.
  pub fn tick<D:Surface + ?Sized>(&mut self, surface:&mut D) -> Result<(), GameError> {
    if self.state == GameState::Running {
      let velocity = self.steering.commit();
      match self.snake.advance(velocity, self.food, &self.grid) {
        Err(collision) => {
          log::debug!("game over: {collision}");
          self.end(surface);
          return Ok(())
        }
        Ok(step) if step.ate_food => match self.eat() {
          Ok(true) => {}
          Ok(false) => {
            log::info!("board full at score {}", self.score());
            self.end(surface);
            return Ok(())
          }
          // no timer left to drive the run
          Err(e) => {
            self.end(surface);
            return Err(e)
          }
        },
        Ok(_) => {}
      }
    }
    self.draw(surface);
    Ok(())
  }

  pub fn draw<D:Surface + ?Sized>(&self, surface:&mut D) {
    self.renderer.draw(surface, &self.snake, self.food);
  }

  /// Scores the pickup, places new food and bumps the speed on each step
  /// threshold. Returns false when no free cell is left for food. A failed
  /// speed-up that leaves the old timer running is only logged; an error
  /// means the clock is stopped.
  fn eat(&mut self) -> Result<bool, GameError> {
    let score = self.scoreboard.add(self.config.food_score);
    match food::spawn(&self.grid, &self.snake, &mut self.rng) {
      Some(cell) => self.food = cell,
      None => return Ok(false),
    }
    let step = self.config.speed_step_score;
    let speed = self.clock.speed();
    if step > 0 && score % step == 0 && speed < self.config.max_speed {
      log::info!("score {score}: speed {} -> {}", speed, speed + 1);
      if let Err(e) = self.clock.start(speed + 1) {
        if !self.clock.is_active() {return Err(e)}
        log::warn!("{e}; staying at speed {speed}");
      }
    }
    Ok(true)
  }

  fn end<D:Surface + ?Sized>(&mut self, surface:&mut D) {
    self.clock.stop();
    self.state = GameState::Ended;
    if self.scoreboard.settle() {
      log::info!("new high score {}", self.high_score());
    }
    self.draw(surface);
    self.renderer.draw_game_over(surface, self.score());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::clock::testing::RecordingScheduler;
  use crate::render::testing::RecordingSurface;
  use crate::score::testing::MemoryStore;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;
  use std::time::Duration;

  type TestSession = Session<RecordingScheduler, MemoryStore, StdRng>;

  fn session_with(config:GameConfig, store:MemoryStore) -> TestSession {
    Session::new(config, RecordingScheduler::default(), store, StdRng::seed_from_u64(3))
  }

  fn session() -> TestSession {
    session_with(GameConfig::default(), MemoryStore::default())
  }

  /// Puts food straight ahead and ticks, `n` times.
  fn feed(s:&mut TestSession, surface:&mut RecordingSurface, n:usize) {
    for _ in 0..n {
      s.food = s.snake.head() + s.steering.pending();
      s.tick(surface).unwrap();
      assert_eq!(s.state, GameState::Running);
    }
  }

  /// Moves food out of the way and ticks until the run ends.
  fn crash(s:&mut TestSession, surface:&mut RecordingSurface) {
    s.food = Cell::new(0,0);
    for _ in 0..s.grid.tile_count() + 1 {
      if s.state == GameState::Ended {return}
      s.tick(surface).unwrap();
    }
    assert_eq!(s.state, GameState::Ended);
  }

  #[test]
  fn starts_idle_with_initial_board() {
    let s = session();
    assert_eq!(s.state(), GameState::Idle);
    assert_eq!(s.snake().body(), &[Cell::new(10,10)]);
    assert_eq!(s.food(), Cell::new(15,15));
    assert!(s.velocity().is_still());
    assert_eq!(s.speed(), 7);
  }

  #[test]
  fn start_runs_the_clock_once() {
    let mut s = session();
    s.start().unwrap();
    assert_eq!(s.state(), GameState::Running);
    assert_eq!(s.velocity(), Velocity::RIGHT);
    assert!(!s.snake().contains(s.food()));
    s.start().unwrap();
    assert_eq!(s.clock.scheduler().schedules(), 1);
    assert_eq!(s.clock.scheduler().live, 1);
  }

  #[test]
  fn advance_grows_only_on_food() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.start().unwrap();
    s.food = Cell::new(11,10);
    s.tick(&mut surface).unwrap();
    assert_eq!(s.snake().body(), &[Cell::new(11,10), Cell::new(10,10)]);
    assert_eq!(s.score(), 10);
    assert!(!s.snake().contains(s.food()));

    let mut s = session();
    s.start().unwrap();
    s.food = Cell::new(0,0);
    s.tick(&mut surface).unwrap();
    assert_eq!(s.snake().body(), &[Cell::new(11,10)]);
  }

  #[test]
  fn pause_freezes_movement_but_still_paints() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.toggle_pause();
    assert_eq!(s.state(), GameState::Idle);

    s.start().unwrap();
    s.food = Cell::new(0,0);
    s.toggle_pause();
    assert_eq!(s.state(), GameState::Paused);
    assert_eq!(s.controls().pause_label, "Resume");
    assert!(!s.steer(Intent::Up));

    s.tick(&mut surface).unwrap();
    s.tick(&mut surface).unwrap();
    assert_eq!(s.snake().head(), Cell::new(10,10));
    assert_eq!(surface.frames, 2);

    s.toggle_pause();
    s.tick(&mut surface).unwrap();
    assert_eq!(s.snake().head(), Cell::new(11,10));
  }

  #[test]
  fn steering_follows_the_reversal_guard() {
    let mut s = session();
    assert!(!s.steer(Intent::Up));
    assert!(s.velocity().is_still());

    s.start().unwrap();
    assert!(!s.steer(Intent::Left));
    assert_eq!(s.velocity(), Velocity::RIGHT);
    assert!(s.steer(Intent::Up));
    assert_eq!(s.velocity(), Velocity::UP);
  }

  #[test]
  fn wall_hit_ends_the_run() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.start().unwrap();
    s.snake = Snake::new(Cell::new(19,10));
    s.food = Cell::new(0,0);
    s.tick(&mut surface).unwrap();
    assert_eq!(s.state(), GameState::Ended);
    assert!(!s.clock.is_active());
    assert_eq!(s.clock.scheduler().live, 0);
    assert_eq!(surface.texts(), vec!["Game Over!", "Score: 0"]);
    assert_eq!(s.controls(), Controls {start_enabled: true, pause_enabled: false, pause_label: "Pause"});
  }

  #[test]
  fn self_bite_ends_the_run() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.start().unwrap();
    s.snake = Snake::from_cells(vec![Cell::new(10,10), Cell::new(10,11), Cell::new(10,12)]);
    s.steering = Steering::new(Velocity::DOWN);
    s.food = Cell::new(0,0);
    s.tick(&mut surface).unwrap();
    assert_eq!(s.state(), GameState::Ended);
  }

  #[test]
  fn reaching_fifty_beats_a_forty_best() {
    let mut surface = RecordingSurface::default();
    let mut s = session_with(GameConfig::default(), MemoryStore::with("40"));
    assert_eq!(s.high_score(), 40);
    s.start().unwrap();
    feed(&mut s, &mut surface, 5);
    assert_eq!(s.score(), 50);
    crash(&mut s, &mut surface);
    assert_eq!(s.high_score(), 50);
    assert_eq!(s.scoreboard.store().value.as_deref(), Some("50"));
  }

  #[test]
  fn thirty_keeps_a_forty_best() {
    let mut surface = RecordingSurface::default();
    let mut s = session_with(GameConfig::default(), MemoryStore::with("40"));
    s.start().unwrap();
    feed(&mut s, &mut surface, 3);
    crash(&mut s, &mut surface);
    assert_eq!(s.high_score(), 40);
    assert_eq!(s.scoreboard.store().writes, 0);
  }

  #[test]
  fn fifty_points_speed_up_with_one_timer_swap() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.start().unwrap();
    feed(&mut s, &mut surface, 4);
    assert_eq!(s.speed(), 7);
    feed(&mut s, &mut surface, 1);
    assert_eq!(s.speed(), 8);

    let sched = s.clock.scheduler();
    assert_eq!(sched.schedules(), 2);
    assert_eq!(sched.max_live, 1);
    assert_eq!(sched.live, 1);
    assert_eq!(sched.calls.last(), Some(&crate::clock::testing::TimerCall::Schedule(Duration::from_millis(125))));
  }

  #[test]
  fn refused_speed_up_keeps_the_run_going() {
    let mut surface = RecordingSurface::default();
    let mut s:TestSession = Session::new(GameConfig::default(),
      RecordingScheduler::refusing(&[2]), MemoryStore::default(), StdRng::seed_from_u64(3));
    s.start().unwrap();
    feed(&mut s, &mut surface, 5);
    assert_eq!(s.state(), GameState::Running);
    assert!(s.clock.is_active());
    assert_eq!(s.speed(), 7);
    assert_eq!(s.clock.scheduler().live, 1);
    feed(&mut s, &mut surface, 1);
    assert_eq!(s.snake().len(), 7);
  }

  #[test]
  fn lost_timer_ends_the_run() {
    let mut surface = RecordingSurface::default();
    let mut s:TestSession = Session::new(GameConfig::default(),
      RecordingScheduler::refusing(&[2, 3]), MemoryStore::with("40"), StdRng::seed_from_u64(3));
    s.start().unwrap();
    feed(&mut s, &mut surface, 4);
    s.food = s.snake.head() + s.steering.pending();
    assert!(matches!(s.tick(&mut surface), Err(GameError::Clock(_))));
    assert_eq!(s.state(), GameState::Ended);
    assert!(!s.clock.is_active());
    assert_eq!(s.clock.scheduler().live, 0);
    assert_eq!(s.high_score(), 50);
    assert!(s.controls().start_enabled);
    assert_eq!(surface.texts(), vec!["Game Over!", "Score: 50"]);
    s.start().unwrap();
    assert_eq!(s.state(), GameState::Running);
  }

  #[test]
  fn input_after_game_over_is_ignored() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.start().unwrap();
    assert!(s.steer(Intent::Up));
    crash(&mut s, &mut surface);
    let velocity = s.velocity();
    assert!(!s.steer(Intent::Right));
    assert!(!s.steer(Intent::Left));
    assert_eq!(s.velocity(), velocity);
    s.toggle_pause();
    assert_eq!(s.state(), GameState::Ended);
    assert!(!s.controls().pause_enabled);
  }

  #[test]
  fn speed_stops_at_the_cap() {
    let mut surface = RecordingSurface::default();
    let config = GameConfig {max_speed: 8, ..GameConfig::default()};
    let mut s = session_with(config, MemoryStore::default());
    s.start().unwrap();
    feed(&mut s, &mut surface, 9);
    assert_eq!(s.speed(), 8);
    assert_eq!(s.clock.scheduler().schedules(), 2);
  }

  #[test]
  fn reset_twice_matches_reset_once() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.start().unwrap();
    feed(&mut s, &mut surface, 6);
    s.reset(&mut surface);
    let once = (s.state, s.snake.clone(), s.food, s.steering, s.score(), s.speed(), s.controls());
    s.reset(&mut surface);
    let twice = (s.state, s.snake.clone(), s.food, s.steering, s.score(), s.speed(), s.controls());
    assert_eq!(once, twice);
    assert_eq!(s.state(), GameState::Idle);
    assert_eq!(s.speed(), 7);
    assert_eq!(s.clock.scheduler().live, 0);
  }

  #[test]
  fn restart_after_game_over() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    s.start().unwrap();
    feed(&mut s, &mut surface, 2);
    crash(&mut s, &mut surface);
    s.toggle_pause();
    assert_eq!(s.state(), GameState::Ended);
    s.start().unwrap();
    assert_eq!(s.state(), GameState::Running);
    assert_eq!(s.score(), 0);
    assert_eq!(s.high_score(), 20);
    assert_eq!(s.snake().len(), 1);
    assert_eq!(s.clock.scheduler().max_live, 1);
  }

  #[test]
  fn full_board_ends_the_run() {
    let mut surface = RecordingSurface::default();
    let config = GameConfig {canvas_size: 40, start: (0,0), initial_food: (1,1), ..GameConfig::default()};
    let mut s = session_with(config, MemoryStore::default());
    s.start().unwrap();
    // 2x2 board: three segments plus the head stepping onto the last cell
    s.snake = Snake::from_cells(vec![Cell::new(0,0), Cell::new(0,1), Cell::new(1,1)]);
    s.food = Cell::new(1,0);
    s.tick(&mut surface).unwrap();
    assert_eq!(s.state(), GameState::Ended);
    assert_eq!(s.score(), 10);
  }

  #[test]
  fn random_play_keeps_the_board_consistent() {
    let mut surface = RecordingSurface::default();
    let mut s = session();
    let mut driver = StdRng::seed_from_u64(99);
    let intents = [Intent::Up, Intent::Down, Intent::Left, Intent::Right];
    s.start().unwrap();
    for _ in 0..2000 {
      if s.state() == GameState::Ended {s.start().unwrap();}
      if driver.gen_bool(0.3) {
        s.steer(intents[driver.gen_range(0..intents.len())]);
      }
      if driver.gen_bool(0.2) {
        s.food = s.snake.head() + s.steering.pending();
        if !s.grid.in_bounds(s.food) || s.snake.contains(s.food) {s.food = s.config.initial_food_cell();}
        if s.snake.contains(s.food) {continue}
      }
      s.tick(&mut surface).unwrap();
      let body = s.snake().body();
      let distinct:HashSet<Cell> = body.iter().copied().collect();
      assert_eq!(distinct.len(), body.len());
      assert!(body.iter().all(|c| s.grid.in_bounds(*c)));
      if s.state() == GameState::Running {assert!(!s.snake().contains(s.food()));}
      assert!(s.clock.scheduler().live <= 1);
    }
    assert_eq!(s.clock.scheduler().max_live, 1);
  }
}
