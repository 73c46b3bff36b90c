//! Frame-driven session: the game loop around [`tick`]
//!
//! The host calls [`Session::update`] once per display frame with the elapsed
//! milliseconds. The session samples the input latch, applies the
//! started/paused gate, clamps the frame time and runs the simulation. The
//! observer sees the HUD after every tick and hears once about a finished
//! game.

use std::sync::Arc;

use crate::input::InputLatch;
use crate::renderer::{Frame, RenderSink};
use crate::settings::{Settings, StepMode};
use crate::sim::level::WORLD_1_1;
use crate::sim::{GameEvent, GameState, HudSnapshot, TickInput, tick};

/// Receives session notifications. Both hooks default to doing nothing.
pub trait SessionObserver {
    /// Called after every simulation tick
    fn on_hud(&mut self, _hud: &HudSnapshot) {}

    /// Called once when the last life is lost
    fn on_game_over(&mut self) {}
}

impl SessionObserver for () {}

/// One play session: level, game state, timing and the pause gate
pub struct Session<O: SessionObserver> {
    settings: Settings,
    level: Vec<String>,
    state: GameState,
    observer: O,
    input: Arc<InputLatch>,
    started: bool,
    paused: bool,
    /// Pause key state at the previous update, for edge detection
    pause_held: bool,
    /// Unsimulated time in `StepMode::Fixed` (seconds)
    accumulator: f64,
}

impl<O: SessionObserver> Session<O> {
    /// Session on the built-in level
    pub fn new(settings: Settings, observer: O) -> Self {
        Self::with_level(&WORLD_1_1, settings, observer)
    }

    /// Session on a custom level template
    pub fn with_level<S: AsRef<str>>(template: &[S], settings: Settings, observer: O) -> Self {
        let level: Vec<String> = template.iter().map(|row| row.as_ref().to_string()).collect();
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Invalid session settings ({e}), using defaults");
                Settings::default()
            }
        };
        let state = GameState::from_template(&level, &settings);
        Self {
            settings,
            level,
            state,
            observer,
            input: Arc::new(InputLatch::new()),
            started: false,
            paused: false,
            pause_held: false,
            accumulator: 0.0,
        }
    }

    /// Begin a fresh game. Does nothing while a game is running.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.state = GameState::from_template(&self.level, &self.settings);
        self.started = true;
        self.paused = false;
        self.accumulator = 0.0;
        log::info!(
            "Session started (world {}, seed {})",
            self.settings.world_id,
            self.settings.seed
        );
    }

    /// Flip the pause gate. Does nothing unless a game is running.
    pub fn toggle_pause(&mut self) {
        if !self.started {
            return;
        }
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Advance the session by one display frame.
    ///
    /// Returns the simulation events of this frame (empty when gated).
    pub fn update(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let snapshot = self.input.snapshot();
        let pause_pressed = snapshot.pause && !self.pause_held;
        self.pause_held = snapshot.pause;
        if pause_pressed {
            self.toggle_pause();
        }

        if !self.started || self.paused {
            return Vec::new();
        }

        let clock = self.settings.clock;
        // NaN counts as no time passing
        let elapsed_ms = if elapsed_ms.is_nan() { 0.0 } else { elapsed_ms };
        let elapsed = elapsed_ms.max(0.0).min(clock.max_frame_ms) / 1000.0;
        let input = snapshot.tick_input();
        let mut events = Vec::new();

        match clock.mode {
            StepMode::PerFrame => {
                self.step(&input, elapsed as f32, &mut events);
            }
            StepMode::Fixed => {
                let dt = clock.fixed_dt();
                self.accumulator += elapsed;

                let mut substeps = 0;
                while self.accumulator >= f64::from(dt) && substeps < clock.max_substeps {
                    self.step(&input, dt, &mut events);
                    self.accumulator -= f64::from(dt);
                    substeps += 1;
                    if self.state.is_game_over() {
                        break;
                    }
                }
                // Time the cap left unsimulated is dropped, not carried
                if substeps == clock.max_substeps && self.accumulator >= f64::from(dt) {
                    log::debug!(
                        "Dropping {:.1} ms of simulation backlog",
                        self.accumulator * 1000.0
                    );
                    self.accumulator = 0.0;
                }
            }
        }

        if self.state.is_game_over() {
            self.started = false;
            self.accumulator = 0.0;
            log::info!(
                "Session over after {} ticks, score {}",
                self.state.time_ticks,
                self.state.score
            );
            self.observer.on_game_over();
        }

        events
    }

    /// One tick plus its HUD notification
    fn step(&mut self, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
        events.extend(tick(&mut self.state, input, dt));
        self.observer.on_hud(&self.state.hud());
    }

    /// Hand the current state to a render sink
    pub fn render(&self, sink: &mut impl RenderSink) {
        sink.render(&Frame::from_state(&self.state, self.paused));
    }

    /// Shared handle for the event layer to write key state into
    pub fn input_handle(&self) -> Arc<InputLatch> {
        Arc::clone(&self.input)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
