//! Line-oriented input frames
//!
//! One line per frame, whitespace-separated tokens:
//!
//! ```text
//! L:0.42 R:0.7        hand positions (0 = top, 1 = bottom)
//! pause restart quit  commands
//! record screenshot   pass-through commands
//! type:Ada backspace  name entry
//! submit submit:Ada   finish name entry
//! ```
//!
//! A blank line is a frame with no input. Bad tokens are logged and skipped.

use std::io::BufRead;

use super::InputSource;
use crate::error::GameError;
use crate::sim::{Command, PaddleSample, Side, TickInput};

/// Parse one frame line, skipping tokens that do not make sense
pub fn parse_frame(line: &str) -> TickInput {
    let mut frame = TickInput::default();
    for token in line.split_whitespace() {
        match parse_token(token) {
            Some(Token::Sample(sample)) => frame.samples.push(sample),
            Some(Token::Command(command)) => frame.commands.push(command),
            None => log::warn!("Skipping unrecognized input token {token:?}"),
        }
    }
    frame
}

enum Token {
    Sample(PaddleSample),
    Command(Command),
}

fn parse_token(token: &str) -> Option<Token> {
    if let Some((key, value)) = token.split_once(':') {
        let sample = |side| value.parse::<f32>().ok().map(|y| Token::Sample(PaddleSample::new(side, y)));
        return match key.to_ascii_lowercase().as_str() {
            "l" => sample(Side::Left),
            "r" => sample(Side::Right),
            "type" => Some(Token::Command(Command::TypeText(value.to_string()))),
            "submit" => Some(Token::Command(Command::SubmitName(value.to_string()))),
            _ => None,
        };
    }

    let command = match token.to_ascii_lowercase().as_str() {
        "pause" | "p" => Command::TogglePause,
        "restart" => Command::Restart,
        "quit" | "q" => Command::Quit,
        "record" | "v" => Command::ToggleRecording,
        "screenshot" | "s" => Command::Screenshot,
        "backspace" => Command::Backspace,
        "submit" => Command::SubmitName(String::new()),
        _ => return None,
    };
    Some(Token::Command(command))
}

/// Frames read from any buffered reader, one line each
pub struct ScriptSource<R> {
    reader: R,
    line: String,
    frames_read: u64,
}

impl<R: BufRead> ScriptSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            frames_read: 0,
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl<R: BufRead> InputSource for ScriptSource<R> {
    fn next_frame(&mut self) -> Result<TickInput, GameError> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| GameError::InputSourceLost(e.to_string()))?;
        if read == 0 {
            return Err(GameError::InputSourceLost(format!(
                "end of input after {} frames",
                self.frames_read
            )));
        }
        self.frames_read += 1;
        Ok(parse_frame(&self.line))
    }
}
