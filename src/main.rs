//! Terminal runner (default binary).
//!
//! This is the primary gameplay entrypoint. It uses crossterm for input and
//! a custom framebuffer-based renderer. Key events only feed the keyboard
//! state; once per tick that state is synced and handed to the simulation
//! together with the current camera heading.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{debug, error, info, warn};

use voxtris::core::{view_forward_from_yaw, GameSnapshot, GameState};
use voxtris::input::{
    key_transition, should_quit, system_key, KeyBindings, KeyTransition, KeyboardState, SystemKey,
};
use voxtris::logging::init_file_logger;
use voxtris::settings::{log_file_path, Settings};
use voxtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use voxtris::types::{Action, CoreEvent, TICK_MS};

fn main() -> Result<()> {
    init_file_logger(&log_file_path())?;
    let settings = Settings::from_env()?;
    info!("starting with {:?}", settings.game_config());

    let keymap = settings.keymap_path();
    let bindings = KeyBindings::load(&keymap)
        .with_context(|| format!("load key bindings from {}", keymap.display()))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &settings, bindings);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

fn run(term: &mut TerminalRenderer, settings: &Settings, bindings: KeyBindings) -> Result<()> {
    let mut game = GameState::new(settings.game_config());
    let mut keyboard = KeyboardState::new(bindings)
        .with_repeat_ms(settings.repeat_ms)
        .with_key_release_timeout_ms(settings.key_release_timeout_ms);
    let mut view = GameView::default().with_help(help_lines(keyboard.bindings()));

    let view_step = settings.view_step_radians();
    let mut yaw = 0.0f32;

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, view_forward_from_yaw(yaw), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if keyboard.is_capturing() {
                        if let Some(KeyTransition::Down(code)) = key_transition(key) {
                            if let Some(action) = keyboard.key_down(&code) {
                                save_bindings(settings, keyboard.bindings(), action);
                                view = GameView::default().with_help(help_lines(keyboard.bindings()));
                            }
                        }
                        continue;
                    }

                    if game.paused() && key.kind == KeyEventKind::Press {
                        if let KeyCode::Char(c @ '1'..='9') = key.code {
                            let n = c as usize - '1' as usize;
                            if let Some(action) = Action::ALL.get(n) {
                                info!("press a key for {}", action.as_str());
                                keyboard.listen_and_set(*action);
                            }
                            continue;
                        }
                    }

                    match system_key(key) {
                        Some(SystemKey::Pause) => {
                            game.toggle_pause();
                            keyboard.reset();
                        }
                        Some(SystemKey::Reset) => game.reset(),
                        Some(SystemKey::TurnViewLeft) if !game.paused() => yaw -= view_step,
                        Some(SystemKey::TurnViewRight) if !game.paused() => yaw += view_step,
                        _ => {}
                    }

                    match key_transition(key) {
                        Some(KeyTransition::Down(code)) => {
                            keyboard.key_down(&code);
                        }
                        Some(KeyTransition::Up(code)) => keyboard.key_up(&code),
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            // Long stalls (e.g. a suspended terminal) must not drop the piece
            // through several cells at once.
            let elapsed_ms = elapsed.as_millis().min(250) as u32;

            let input = keyboard.sync(elapsed_ms);
            game.step(elapsed_ms, &input, view_forward_from_yaw(yaw));
        }

        if let Some(ev) = game.take_last_event() {
            log_event(ev);
        }
    }
}

fn log_event(ev: CoreEvent) {
    match ev {
        CoreEvent::Placed {
            rows_cleared,
            score,
        } if rows_cleared > 0 => info!("cleared {rows_cleared} layer(s), score {score}"),
        CoreEvent::Placed { .. } => debug!("piece placed"),
        CoreEvent::GameOver { score } => info!("game over, final score {score}"),
        CoreEvent::Reset => debug!("reset"),
    }
}

fn save_bindings(settings: &Settings, bindings: &KeyBindings, action: Action) {
    let path = settings.keymap_path();
    match bindings.save(&path) {
        Ok(()) => info!(
            "{} bound to {}, saved to {}",
            action.as_str(),
            bindings.code(action),
            path.display()
        ),
        Err(e) => warn!("could not save key bindings: {e}"),
    }
}

fn help_lines(bindings: &KeyBindings) -> Vec<String> {
    let mut lines: Vec<String> = bindings
        .iter()
        .enumerate()
        .map(|(i, (action, code))| {
            let key = code.strip_prefix("Key").unwrap_or(code);
            format!("{} {:<5} {}", i + 1, key, action.as_str())
        })
        .collect();
    lines.extend(
        ["P     pause", "R     reset", "<- -> turn view", "Esc   quit", "1-9   rebind (paused)"]
            .map(String::from),
    );
    lines
}
