//! Fixed timestep simulation tick
//!
//! Applies commands, then (while playing) paddle samples and one physics step.

use super::input::{PaddleSample, Side, latest_targets};
use super::physics::advance;
use super::state::{GameEvent, GameMode, GameState, Snapshot};
use crate::highscores::{ScoreRecord, ScoreStore};

/// Discrete commands from the keyboard/UI collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append `text` to the name buffer and start playing
    SubmitName(String),
    /// Append printable characters to the name buffer
    TypeText(String),
    /// Drop the last character of the name buffer
    Backspace,
    TogglePause,
    /// Only honored after a game over
    Restart,
    Quit,
    /// Passed through as an event
    ToggleRecording,
    /// Passed through as an event
    Screenshot,
}

/// Everything delivered to the simulation for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Zero or more tracked hand positions; the last per side wins
    pub samples: Vec<PaddleSample>,
    /// Applied in order before the physics step
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() && self.commands.is_empty()
    }
}

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub snapshot: Snapshot,
    pub events: Vec<GameEvent>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, store: &mut dyn ScoreStore) -> TickOutput {
    let mut events = Vec::new();

    for command in &input.commands {
        if !state.running {
            break;
        }
        apply_command(state, command, &mut events);
    }

    if state.running && state.mode == GameMode::Playing {
        step_playing(state, &input.samples, store, &mut events);
    }

    for event in &events {
        log::debug!("tick {}: {:?}", state.time_ticks, event);
    }

    TickOutput {
        snapshot: state.snapshot(),
        events,
    }
}

fn apply_command(state: &mut GameState, command: &Command, events: &mut Vec<GameEvent>) {
    match command {
        Command::TypeText(text) => {
            if state.mode == GameMode::NameEntry {
                push_printable(&mut state.name_buffer, text);
            }
        }
        Command::Backspace => {
            if state.mode == GameMode::NameEntry {
                state.name_buffer.pop();
            }
        }
        Command::SubmitName(text) => {
            if state.mode == GameMode::NameEntry {
                push_printable(&mut state.name_buffer, text);
                let name = state.name_buffer.trim();
                state.player_name = if name.is_empty() {
                    state.config.default_player_name.clone()
                } else {
                    name.to_string()
                };
                state.name_buffer.clear();
                state.mode = GameMode::Playing;
                log::info!("Player {} is up", state.player_name);
            }
        }
        Command::TogglePause => match state.mode {
            GameMode::Playing => state.mode = GameMode::Paused,
            GameMode::Paused => state.mode = GameMode::Playing,
            _ => {}
        },
        Command::Restart => {
            if state.mode == GameMode::GameOver {
                state.score = 0;
                state.new_top_score = false;
                state.reset_ball();
                state.mode = GameMode::Playing;
                log::info!("Restarting");
            }
        }
        Command::Quit => {
            state.running = false;
            events.push(GameEvent::QuitRequested);
        }
        Command::ToggleRecording => events.push(GameEvent::RecordingToggled),
        Command::Screenshot => events.push(GameEvent::ScreenshotRequested),
    }
}

fn push_printable(buffer: &mut String, text: &str) {
    buffer.extend(text.chars().filter(|c| !c.is_control()));
}

fn step_playing(
    state: &mut GameState,
    samples: &[PaddleSample],
    store: &mut dyn ScoreStore,
    events: &mut Vec<GameEvent>,
) {
    state.time_ticks += 1;

    // Missing side keeps its last position
    let (left, right) = latest_targets(samples, state.config.paddle_height, state.config.arena_height);
    let arena_height = state.config.arena_height;
    for (side, target) in [(Side::Left, left), (Side::Right, right)] {
        if let Some(y) = target {
            state.paddle_mut(side).set_top(y, arena_height);
        }
    }

    let physics_events = advance(&mut state.ball, &state.left, &state.right, &state.config);

    for event in physics_events {
        match event {
            GameEvent::ScorePoint => state.score = state.score.saturating_add(1),
            GameEvent::GameOver => state.mode = GameMode::GameOver,
            _ => {}
        }
        events.push(event);
    }

    if state.mode == GameMode::GameOver {
        finish_rally(state, store, events);
    }
}

/// Record a new best score if this rally earned one
fn finish_rally(state: &mut GameState, store: &mut dyn ScoreStore, events: &mut Vec<GameEvent>) {
    log::info!("Game over: {} scored {}", state.player_name, state.score);
    if !state.top_score.beaten_by(state.score) {
        return;
    }

    let record = ScoreRecord::new(state.player_name.clone(), state.score);
    if let Err(e) = store.save(&record) {
        log::warn!("Could not save top score: {e}");
    }
    log::info!("New top score: {} - {}", record.name, record.score);
    state.top_score = record.clone();
    state.new_top_score = true;
    events.push(GameEvent::NewTopScore { record });
}
