use crate::clock::Scheduler;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::Intent;
use crate::logger;
use crate::render::Surface;
use crate::score::ScoreStore;
use crate::session::{GameState, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::{prelude::*, JsCast};

const CONFIG_ELEMENT:&str = "snake-config";
const DIRECTION_BUTTONS:[&str;4] = ["upBtn", "downBtn", "leftBtn", "rightBtn"];

type PageSession = Session<IntervalTimer, LocalStore, StdRng>;

struct PageElements {
  canvas:web_sys::HtmlCanvasElement,
  context:web_sys::CanvasRenderingContext2d,
  score:web_sys::HtmlElement,
  high_score:web_sys::HtmlElement,
  start:web_sys::HtmlButtonElement,
  pause:web_sys::HtmlButtonElement,
}

impl PageElements {
  fn init(document:&web_sys::Document) -> Result<Self, GameError> {
    let canvas:web_sys::HtmlCanvasElement = element(document, "gameCanvas")?;
    let context = canvas
      .get_context("2d").map_err(js_err("get 2d context"))?
      .ok_or(GameError::MissingElement("gameCanvas 2d context"))?
      .dyn_into::<web_sys::CanvasRenderingContext2d>()
      .map_err(|_| GameError::MissingElement("gameCanvas 2d context"))?;
    Ok(PageElements {
      canvas,
      context,
      score: element(document, "score")?,
      high_score: element(document, "highScore")?,
      start: element(document, "startBtn")?,
      pause: element(document, "pauseBtn")?,
    })
  }
}

fn element<T:JsCast>(document:&web_sys::Document, id:&'static str) -> Result<T, GameError> {
  document.get_element_by_id(id)
    .and_then(|e| e.dyn_into::<T>().ok())
    .ok_or(GameError::MissingElement(id))
}

fn js_err(context:&'static str) -> impl Fn(JsValue) -> GameError {
  move |value| GameError::Js {context, message: format!("{value:?}")}
}

struct CanvasSurface {
  context:web_sys::CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
  fn fill_rect(&mut self, x:f64, y:f64, w:f64, h:f64, colour:&str) {
    self.context.set_fill_style(&JsValue::from_str(colour));
    self.context.fill_rect(x, y, w, h);
  }

  fn fill_circle(&mut self, cx:f64, cy:f64, r:f64, colour:&str) {
    self.context.set_fill_style(&JsValue::from_str(colour));
    self.context.begin_path();
    if let Err(e) = self.context.arc(cx, cy, r, 0.0, TAU) {
      log::warn!("arc failed: {e:?}");
      return
    }
    self.context.fill();
  }

  fn fill_text(&mut self, text:&str, x:f64, y:f64, font:&str, colour:&str) {
    self.context.set_fill_style(&JsValue::from_str(colour));
    self.context.set_font(font);
    self.context.set_text_align("center");
    if let Err(e) = self.context.fill_text(text, x, y) {
      log::warn!("fill_text failed: {e:?}");
    }
  }
}

/// `setInterval` around one long-lived tick callback.
struct IntervalTimer {
  window:web_sys::Window,
  callback:Closure<dyn FnMut()>,
  handle:Option<i32>,
}

impl Scheduler for IntervalTimer {
  fn schedule(&mut self, period:Duration) -> Result<(), GameError> {
    let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
    let id = self.window
      .set_interval_with_callback_and_timeout_and_arguments_0(
        self.callback.as_ref().unchecked_ref(), millis)
      .map_err(|e| GameError::Clock(format!("{e:?}")))?;
    self.handle = Some(id);
    Ok(())
  }

  fn cancel(&mut self) {
    if let Some(id) = self.handle.take() {
      self.window.clear_interval_with_handle(id);
    }
  }
}

/// One localStorage key. `storage` is `None` when the browser denies access.
struct LocalStore {
  storage:Option<web_sys::Storage>,
  key:String,
}

impl ScoreStore for LocalStore {
  fn read(&self) -> Result<Option<String>, GameError> {
    let storage = self.storage.as_ref()
      .ok_or_else(|| GameError::Storage("localStorage unavailable".into()))?;
    storage.get_item(&self.key).map_err(|e| GameError::Storage(format!("{e:?}")))
  }

  fn write(&mut self, value:&str) -> Result<(), GameError> {
    let storage = self.storage.as_ref()
      .ok_or_else(|| GameError::Storage("localStorage unavailable".into()))?;
    storage.set_item(&self.key, value).map_err(|e| GameError::Storage(format!("{e:?}")))
  }
}

/// Everything a page callback can ask of the game.
#[derive(Debug, Clone, Copy)]
enum Command {
  Tick,
  Start,
  TogglePause,
  Reset,
  Steer(Intent),
}

struct BrowserGame {
  session:PageSession,
  surface:CanvasSurface,
  page:PageElements,
}

impl BrowserGame {
  fn dispatch(&mut self, command:Command) {
    let result = match command {
      Command::Tick        => self.session.tick(&mut self.surface),
      Command::Start       => self.session.start(),
      Command::TogglePause => {self.session.toggle_pause(); Ok(())}
      Command::Reset       => {self.session.reset(&mut self.surface); Ok(())}
      Command::Steer(intent) => {self.session.steer(intent); Ok(())}
    };
    if let Err(e) = result {
      log::error!("{command:?} failed: {e}");
    }
    self.sync_page();
  }

  fn sync_page(&self) {
    let controls = self.session.controls();
    self.page.score.set_inner_text(&self.session.score().to_string());
    self.page.high_score.set_inner_text(&self.session.high_score().to_string());
    self.page.start.set_disabled(!controls.start_enabled);
    self.page.pause.set_disabled(!controls.pause_enabled);
    self.page.pause.set_inner_text(controls.pause_label);
  }
}

fn load_config(document:&web_sys::Document) -> Result<GameConfig, GameError> {
  match document.get_element_by_id(CONFIG_ELEMENT).and_then(|e| e.text_content()) {
    Some(json) => Ok(GameConfig::from_json(&json)?),
    None => Ok(GameConfig::default()),
  }
}

fn on_click(
  document:&web_sys::Document,
  id:&'static str,
  game:&Rc<RefCell<BrowserGame>>,
  command:Command,
) -> Result<(), GameError> {
  let target:web_sys::HtmlElement = element(document, id)?;
  let game = Rc::clone(game);
  let handler = Closure::<dyn FnMut()>::new(move || game.borrow_mut().dispatch(command));
  target
    .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
    .map_err(js_err("add click listener"))?;
  handler.forget();
  Ok(())
}

fn on_keydown(document:&web_sys::Document, game:&Rc<RefCell<BrowserGame>>) -> Result<(), GameError> {
  let game = Rc::clone(game);
  let handler = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
    move |event:web_sys::KeyboardEvent| {
      let Some(intent) = Intent::from_key(&event.key()) else {return};
      let mut game = game.borrow_mut();
      if game.session.state() == GameState::Running {event.prevent_default();}
      game.dispatch(Command::Steer(intent));
    });
  document
    .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
    .map_err(js_err("add keydown listener"))?;
  handler.forget();
  Ok(())
}

/// Wires the page up and paints the idle board.
pub fn run() -> Result<(), GameError> {
  let window = web_sys::window().ok_or(GameError::MissingElement("window"))?;
  let document = window.document().ok_or(GameError::MissingElement("document"))?;
  let config = load_config(&document)?;
  logger::init(config.log_level);

  let page = PageElements::init(&document)?;
  page.canvas.set_attribute("width", &config.canvas_size.to_string())
    .map_err(js_err("size canvas"))?;
  page.canvas.set_attribute("height", &config.canvas_size.to_string())
    .map_err(js_err("size canvas"))?;

  let store = LocalStore {
    storage: window.local_storage().unwrap_or_else(|e| {
      log::warn!("localStorage denied: {e:?}");
      None
    }),
    key: config.storage_key.clone(),
  };
  let rng = StdRng::from_entropy();

  let game = Rc::new_cyclic(|weak:&Weak<RefCell<BrowserGame>>| {
    let weak = weak.clone();
    let callback = Closure::<dyn FnMut()>::new(move || {
      if let Some(game) = weak.upgrade() {
        game.borrow_mut().dispatch(Command::Tick);
      }
    });
    let timer = IntervalTimer {window: window.clone(), callback, handle: None};
    let surface = CanvasSurface {context: page.context.clone()};
    RefCell::new(BrowserGame {
      session: Session::new(config, timer, store, rng),
      surface,
      page,
    })
  });

  on_keydown(&document, &game)?;
  on_click(&document, "startBtn", &game, Command::Start)?;
  on_click(&document, "pauseBtn", &game, Command::TogglePause)?;
  on_click(&document, "resetBtn", &game, Command::Reset)?;
  for id in DIRECTION_BUTTONS {
    if let Some(intent) = Intent::from_button_id(id) {
      on_click(&document, id, &game, Command::Steer(intent))?;
    }
  }

  {
    let mut game = game.borrow_mut();
    let BrowserGame {session, surface, ..} = &mut *game;
    session.draw(surface);
    game.sync_page();
  }
  log::info!("Snake Game loaded! Press Start to begin.");
  Ok(())
}
