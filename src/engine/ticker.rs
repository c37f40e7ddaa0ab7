use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use crate::engine::protocol::EngineCommand;
use crate::error::EngineError;

pub const GUARD_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Background thread that feeds `GuardTick` into the engine's command queue.
///
/// The ticker only ever sends; all guard movement still happens on the
/// engine thread. It stops when `stop` is called, when it is dropped, or
/// when the engine's queue goes away.
pub struct GuardTicker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl GuardTicker {
    pub fn start(tick_tx: Sender<EngineCommand>, interval: Duration) -> Result<Self, EngineError> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("guard-ticker".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if tick_tx.send(EngineCommand::GuardTick).is_err() {
                            break;
                        }
                    }
                    // Explicit stop or the ticker handle was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|source| EngineError::Spawn {
                name: "guard-ticker",
                source,
            })?;

        debug!("guard ticker started ({:?} interval)", interval);
        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        // Dropping the sender wakes the thread out of recv_timeout.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("guard ticker thread panicked");
            }
            debug!("guard ticker stopped");
        }
    }
}

impl Drop for GuardTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sends_ticks_until_stopped() {
        let (tx, rx) = mpsc::channel();
        let mut ticker = GuardTicker::start(tx, Duration::from_millis(5)).unwrap();

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, EngineCommand::GuardTick);
        assert!(ticker.is_running());

        ticker.stop();
        assert!(!ticker.is_running());

        // Drain anything sent before the stop landed, then nothing more arrives.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn exits_when_engine_queue_is_gone() {
        let (tx, rx) = mpsc::channel();
        let ticker = GuardTicker::start(tx, Duration::from_millis(1)).unwrap();
        drop(rx);

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while ticker.is_running() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!ticker.is_running());
    }
}
