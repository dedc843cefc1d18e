//! Fixed-rate run loop
//!
//! Pulls one frame of input, ticks the simulation, and hands the events to
//! the (external) audio/recording layer, here reduced to log lines.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::highscores::{ScoreRecord, ScoreStore};
use crate::platform::InputSource;
use crate::sim::{GameEvent, GameState, Snapshot, TickOutput, tick};

/// How a run ended without error
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub top_score: ScoreRecord,
    pub last: Snapshot,
}

/// Owns the game state and its score store for one process run
pub struct Runner<S> {
    pub state: GameState,
    store: S,
    /// Sleep to hold the configured frame rate; `None` runs flat out
    frame_interval: Option<Duration>,
    frames: u64,
    recording: bool,
}

impl<S: ScoreStore> Runner<S> {
    /// Load the best score from `store` and start a session.
    ///
    /// Fails with [`GameError::InvalidConfig`] before touching the store if
    /// `config` does not validate.
    pub fn new(config: GameConfig, mut store: S, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let top_score = store.load();
        let frame_interval = Some(Duration::from_secs_f64(1.0 / f64::from(config.fps)));
        Ok(Self {
            state: GameState::new(config, top_score, seed),
            store,
            frame_interval,
            frames: 0,
            recording: false,
        })
    }

    /// Skip frame pacing (tests, replaying scripts)
    pub fn unpaced(mut self) -> Self {
        self.frame_interval = None;
        self
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the recording collaborator should currently be capturing
    pub fn recording(&self) -> bool {
        self.recording
    }

    /// Run one frame
    pub fn step(&mut self, source: &mut dyn InputSource) -> Result<TickOutput, GameError> {
        let input = source.next_frame()?;
        let output = tick(&mut self.state, &input, &mut self.store);
        self.frames += 1;
        self.dispatch(&output);
        Ok(output)
    }

    /// Run until quit, or until the input source is lost
    pub fn run(&mut self, source: &mut dyn InputSource) -> Result<RunSummary, GameError> {
        loop {
            let started = Instant::now();
            let output = self.step(source)?;

            if !self.state.running {
                log::info!("Quit after {} frames", self.frames);
                return Ok(RunSummary {
                    frames: self.frames,
                    top_score: self.state.top_score.clone(),
                    last: output.snapshot,
                });
            }

            if let Some(interval) = self.frame_interval {
                let elapsed = started.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
        }
    }

    fn dispatch(&mut self, output: &TickOutput) {
        for event in &output.events {
            match event {
                GameEvent::RecordingToggled => {
                    self.recording = !self.recording;
                    if self.recording {
                        log::info!("Recording started");
                    } else {
                        log::info!("Recording stopped");
                    }
                }
                GameEvent::ScreenshotRequested => {
                    log::info!("Screenshot requested at frame {}", self.frames);
                }
                _ => {}
            }
        }

        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(&output.snapshot) {
                Ok(json) => log::trace!("{json}"),
                Err(e) => log::warn!("Could not serialize snapshot: {e}"),
            }
        }
    }
}
