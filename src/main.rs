//! Retro Plumber headless demo
//!
//! Runs a session on the built-in level with the autopilot at the keys and
//! logs the HUD. Usage: `retro-plumber [settings.json] [frames]`.
//! Set `RUST_LOG=debug` to also print the viewport every second.

use retro_plumber::renderer::TextRenderer;
use retro_plumber::sim::{GameEvent, HudSnapshot, autopilot};
use retro_plumber::{Key, Session, SessionObserver, Settings};

/// Display frame length for a 60 Hz host
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Frames to run when none are given (two minutes)
const DEFAULT_FRAMES: u64 = 60 * 120;
/// HUD log interval in ticks
const HUD_LOG_INTERVAL: u64 = 600;

/// Logs HUD snapshots as JSON
#[derive(Default)]
struct HudLogger {
    ticks: u64,
    last: Option<HudSnapshot>,
    game_over: bool,
}

impl HudLogger {
    fn log(hud: &HudSnapshot) {
        match serde_json::to_string(hud) {
            Ok(json) => log::info!("HUD {json}"),
            Err(e) => log::warn!("Failed to encode HUD: {e}"),
        }
    }
}

impl SessionObserver for HudLogger {
    fn on_hud(&mut self, hud: &HudSnapshot) {
        self.ticks += 1;
        let lives_changed = self.last.as_ref().is_some_and(|last| last.lives != hud.lives);
        if self.ticks % HUD_LOG_INTERVAL == 0 || lives_changed {
            Self::log(hud);
        }
        self.last = Some(hud.clone());
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
        if let Some(hud) = &self.last {
            Self::log(hud);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Retro Plumber (headless demo) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            log::warn!("Invalid frame count ({e}), running {DEFAULT_FRAMES}");
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };

    let mut session = Session::new(settings, HudLogger::default());
    let keys = session.input_handle();
    let mut viewport = TextRenderer::new();
    session.start();

    let mut goals = 0;
    for frame in 0..frames {
        let input = autopilot(session.state());
        keys.set(Key::Left, input.direction < 0);
        keys.set(Key::Right, input.direction > 0);
        keys.set(Key::Jump, input.jump);

        for event in session.update(FRAME_MS) {
            if event == GameEvent::GoalReached {
                goals += 1;
            }
        }

        if log::log_enabled!(log::Level::Debug) && frame % 60 == 0 {
            session.render(&mut viewport);
            log::debug!("Frame {frame}\n{}", viewport.output());
        }

        if session.observer().game_over {
            break;
        }
    }

    // Final view of wherever the run ended
    session.render(&mut viewport);
    println!("{}", viewport.output());

    let hud = session.state().hud();
    log::info!(
        "Demo finished: {} ticks, {goals} goals, score {}, lives {}",
        session.state().time_ticks,
        hud.score,
        hud.lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives a Session directly; nothing to run here
}
