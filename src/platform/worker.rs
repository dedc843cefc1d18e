//! Background input reader
//!
//! Capture and landmark extraction block, so they run on their own thread.
//! The simulation only ever sees the newest position per hand; commands are
//! queued and never dropped.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use super::InputSource;
use crate::error::GameError;
use crate::sim::{PaddleSample, TickInput};

/// Runs an [`InputSource`] on a background thread
pub struct InputWorker {
    rx: Receiver<Result<TickInput, GameError>>,
    /// Loss reported while there was still input to hand over
    pending_loss: Option<GameError>,
    handle: Option<JoinHandle<()>>,
}

impl InputWorker {
    pub fn spawn<S>(mut source: S) -> Result<Self, GameError>
    where
        S: InputSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("input".into())
            .spawn(move || {
                loop {
                    let frame = source.next_frame();
                    let lost = frame.is_err();
                    // Receiver gone means the game has stopped
                    if tx.send(frame).is_err() || lost {
                        break;
                    }
                }
                log::debug!("Input worker exiting");
            })
            .map_err(|e| GameError::io("input worker", e))?;

        Ok(Self {
            rx,
            pending_loss: None,
            handle: Some(handle),
        })
    }

    /// Everything that arrived since the last call, collapsed into one frame.
    ///
    /// Never blocks. An empty frame means nothing new arrived.
    pub fn latest(&mut self) -> Result<TickInput, GameError> {
        if let Some(e) = self.pending_loss.take() {
            return Err(e);
        }

        let mut merged = TickInput::default();
        loop {
            match self.rx.try_recv() {
                Ok(Ok(frame)) => merge(&mut merged, frame),
                Ok(Err(e)) => {
                    if merged.is_empty() {
                        return Err(e);
                    }
                    self.pending_loss = Some(e);
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if merged.is_empty() {
                        return Err(GameError::InputSourceLost("input worker stopped".into()));
                    }
                    break;
                }
            }
        }
        Ok(merged)
    }
}

impl InputSource for InputWorker {
    fn next_frame(&mut self) -> Result<TickInput, GameError> {
        self.latest()
    }
}

impl Drop for InputWorker {
    fn drop(&mut self) {
        // A worker blocked on a read cannot be interrupted; only reap it if done
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}

/// Fold `frame` into `into`: newer samples replace older ones per side
fn merge(into: &mut TickInput, frame: TickInput) {
    for sample in frame.samples {
        replace_side(&mut into.samples, sample);
    }
    into.commands.extend(frame.commands);
}

fn replace_side(samples: &mut Vec<PaddleSample>, sample: PaddleSample) {
    match samples.iter_mut().find(|s| s.side == sample.side) {
        Some(existing) => *existing = sample,
        None => samples.push(sample),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::platform::ScriptSource;
    use crate::sim::{Command, Side};

    /// Poll until the worker has reported loss, collecting every frame
    fn drain(worker: &mut InputWorker) -> (TickInput, GameError) {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut all = TickInput::default();
        loop {
            match worker.latest() {
                Ok(frame) => merge(&mut all, frame),
                Err(e) => return (all, e),
            }
            assert!(Instant::now() < deadline, "worker never reported loss");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_last_sample_wins_and_commands_survive() {
        let script = "L:0.1 R:0.2\nL:0.3 pause\nL:0.9\nquit\n";
        let mut worker = InputWorker::spawn(ScriptSource::new(Cursor::new(script))).expect("spawn");

        let (frame, err) = drain(&mut worker);
        assert_eq!(
            frame.samples,
            vec![
                PaddleSample::new(Side::Left, 0.9),
                PaddleSample::new(Side::Right, 0.2)
            ]
        );
        assert_eq!(frame.commands, vec![Command::TogglePause, Command::Quit]);
        assert!(matches!(err, GameError::InputSourceLost(_)));
    }

    #[test]
    fn test_loss_is_sticky() {
        let mut worker = InputWorker::spawn(ScriptSource::new(Cursor::new(""))).expect("spawn");
        let (_, err) = drain(&mut worker);
        assert!(matches!(err, GameError::InputSourceLost(_)));
        assert!(worker.latest().is_err());
    }

    #[test]
    fn test_merge_replaces_per_side() {
        let mut merged = TickInput::default();
        merge(
            &mut merged,
            TickInput {
                samples: vec![PaddleSample::new(Side::Right, 0.4)],
                commands: vec![Command::Screenshot],
            },
        );
        merge(
            &mut merged,
            TickInput {
                samples: vec![PaddleSample::new(Side::Right, 0.6)],
                commands: vec![Command::Screenshot],
            },
        );
        assert_eq!(merged.samples, vec![PaddleSample::new(Side::Right, 0.6)]);
        assert_eq!(merged.commands.len(), 2);
    }
}
