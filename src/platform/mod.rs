//! Platform abstraction layer
//!
//! Handles the boundary with the hand-tracking collaborator:
//! - `InputSource`: anything that yields per-frame samples and commands
//! - `script`: line-oriented frames (stdin, files, tests)
//! - `worker`: background reader with last-sample-wins handoff

pub mod script;
pub mod worker;

pub use script::{ScriptSource, parse_frame};
pub use worker::InputWorker;

use std::io::BufRead;

use crate::error::GameError;
use crate::sim::TickInput;

/// Producer of per-frame input
pub trait InputSource {
    /// Input for the next frame.
    ///
    /// Returns [`GameError::InputSourceLost`] once no more frames can be produced.
    fn next_frame(&mut self) -> Result<TickInput, GameError>;
}

/// How frames are pulled from a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Blocking read of exactly one line per tick; replays are reproducible
    #[default]
    Script,
    /// Background reader, newest sample per hand each tick. For a live
    /// tracker feeding lines at its own capture rate.
    Live,
}

impl InputMode {
    pub fn from_flag(live: bool) -> Self {
        if live { Self::Live } else { Self::Script }
    }
}

/// Wrap `reader` as the input source for `mode`
pub fn open_input<R>(mode: InputMode, reader: R) -> Result<Box<dyn InputSource>, GameError>
where
    R: BufRead + Send + 'static,
{
    let source = ScriptSource::new(reader);
    match mode {
        InputMode::Script => Ok(Box::new(source)),
        InputMode::Live => {
            log::info!("Reading input on a background worker");
            Ok(Box::new(InputWorker::spawn(source)?))
        }
    }
}
