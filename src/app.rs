use std::time::{Duration, Instant};

use glam::Vec2;
use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::MouseButton;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::{EventPump, Sdl};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::constants::{CANVAS_SIZE, LOOP_TIME};
use crate::error::{GameError, GameResult};
use crate::events::GameCommand;
use crate::game::Game;
use crate::highscore::FileStore;
use crate::input::bindings::{Bindings, KeyEvent};
use crate::input::SwipeTracker;
use crate::render::{canvas, Frame};

/// Mouse events synthesized from touches carry this id; the finger events already cover them.
const TOUCH_MOUSE_ID: u32 = u32::MAX;

/// Main application wrapper that manages SDL initialization, the window, and the frame loop.
pub struct App {
    pub game: Game,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    bindings: Bindings,
    swipe: SwipeTracker,
    started: Instant,
    last_tick: Instant,
    focused: bool,
    // Keep SDL alive for the app lifetime
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, creates the window and sets up the game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()`.
    pub fn new(config: Config) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        let (width, height) = (CANVAS_SIZE.x * config.window_scale, CANVAS_SIZE.y * config.window_scale);
        trace!(width, height, scale = config.window_scale, "Creating game window");
        let window = video_subsystem
            .window("Pac-Man", width, height)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info().name, "Canvas renderer initialized");

        let store = FileStore::new(config.high_score_path.clone());
        debug!(path = %store.path().display(), "High score store");
        let game = Game::new(config, Box::new(store))?;

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            canvas,
            event_pump,
            bindings: Bindings::default(),
            swipe: SwipeTracker::default(),
            started: Instant::now(),
            last_tick: Instant::now(),
            focused: true,
            _sdl_context: sdl_context,
        })
    }

    /// Executes a single frame: input, simulation, rendering, then sleep until the next frame.
    ///
    /// Returns `false` once the game has asked to exit.
    pub fn run(&mut self) -> GameResult<bool> {
        let start = Instant::now();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        self.handle_events();
        if self.game.tick(dt) {
            info!("Exiting game loop");
            return Ok(false);
        }

        let frame = Frame::build(&self.game.snapshot(), self.started.elapsed().as_secs_f32());
        canvas::present(&mut self.canvas, &frame)?;

        // Sleep if we still have time left
        let time = LOOP_TIME.saturating_sub(start.elapsed());
        if time != Duration::ZERO {
            if self.focused {
                spin_sleep::sleep(time);
            } else {
                std::thread::sleep(time);
            }
        }

        Ok(true)
    }

    fn handle_events(&mut self) {
        let mut keys = Vec::new();
        let mut commands = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => commands.push(GameCommand::Exit),
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    _ => {}
                },
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => keys.push(KeyEvent::Down(key)),
                Event::KeyUp {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => keys.push(KeyEvent::Up(key)),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    which,
                    x,
                    y,
                    ..
                } if which != TOUCH_MOUSE_ID => self.swipe.begin(Vec2::new(x as f32, y as f32)),
                Event::MouseMotion { which, x, y, .. } if which != TOUCH_MOUSE_ID => {
                    if let Some(direction) = self.swipe.update(Vec2::new(x as f32, y as f32)) {
                        commands.push(GameCommand::MovePlayer(direction));
                    }
                }
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    which,
                    ..
                } if which != TOUCH_MOUSE_ID => self.swipe.end(),
                // Finger coordinates are normalized to the window
                Event::FingerDown { x, y, .. } => self.swipe.begin(Vec2::new(x, y) * CANVAS_SIZE.as_vec2()),
                Event::FingerMotion { x, y, .. } => {
                    if let Some(direction) = self.swipe.update(Vec2::new(x, y) * CANVAS_SIZE.as_vec2()) {
                        commands.push(GameCommand::MovePlayer(direction));
                    }
                }
                Event::FingerUp { .. } => self.swipe.end(),
                _ => {}
            }
        }

        commands.extend(self.bindings.process(&keys));
        for command in commands {
            trace!(?command, "Queueing command");
            self.game.command(command);
        }
    }
}
