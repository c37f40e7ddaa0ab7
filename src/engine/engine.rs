use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, warn};
use rand::Rng;

use crate::engine::controller::GameController;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::ticker::{GuardTicker, GUARD_TICK_INTERVAL};
use crate::error::EngineError;

/// Runs the game on its own thread. Commands come in over `rx`, and every
/// state change goes back over `tx` as a snapshot.
pub struct Engine<R: Rng> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    /// Handed to the guard ticker so ticks share the command queue.
    tick_tx: Sender<EngineCommand>,
    tick_interval: Duration,

    controller: GameController<R>,
    ticker: Option<GuardTicker>,
}

impl<R: Rng> Engine<R> {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        tick_tx: Sender<EngineCommand>,
        rng: R,
    ) -> Self {
        Self {
            rx,
            tx,
            tick_tx,
            tick_interval: GUARD_TICK_INTERVAL,
            controller: GameController::new(rng),
            ticker: None,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn run(&mut self) {
        if !self.publish() {
            return;
        }

        while let Ok(cmd) = self.rx.recv() {
            if cmd == EngineCommand::Shutdown {
                break;
            }
            if self.handle(cmd) && !self.publish() {
                break;
            }
        }

        self.stop_ticker();
        info!("engine stopped");
    }

    /// Applies one command and brings the ticker in line with the new state.
    /// Returns true if the game state changed.
    fn handle(&mut self, cmd: EngineCommand) -> bool {
        let changed = match cmd {
            EngineCommand::Move(direction) => self.controller.handle_movement(direction),
            EngineCommand::SubmitAnswer(text) => self.controller.submit_text(&text),
            EngineCommand::Choose(yes) => self.controller.choose(yes),
            EngineCommand::GuardTick => self.controller.guard_tick(),
            EngineCommand::Restart => {
                self.controller.restart();
                true
            }
            EngineCommand::Shutdown => false,
        };

        self.sync_ticker();
        changed
    }

    /// Keeps the ticker alive exactly while guards are active.
    fn sync_ticker(&mut self) {
        let wanted = self.controller.guards_active();
        match (wanted, self.ticker.is_some()) {
            (true, false) => {
                match GuardTicker::start(self.tick_tx.clone(), self.tick_interval) {
                    Ok(ticker) => self.ticker = Some(ticker),
                    Err(e) => error!("guards will not move: {e}"),
                }
            }
            (false, true) => self.stop_ticker(),
            _ => {}
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    /// Sends the current snapshot. Returns false once the UI has gone away.
    fn publish(&self) -> bool {
        let snapshot = self.controller.snapshot();
        if self.tx.send(EngineResponse::Snapshot(snapshot)).is_err() {
            debug!("response channel closed");
            return false;
        }
        true
    }
}

/// The UI side of a running engine thread.
pub struct EngineHandle {
    cmd_tx: Sender<EngineCommand>,
    resp_rx: Receiver<EngineResponse>,
    thread: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn<R>(rng: R, tick_interval: Duration) -> Result<Self, EngineError>
    where
        R: Rng + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let tick_tx = cmd_tx.clone();

        let thread = thread::Builder::new()
            .name("game-engine".into())
            .spawn(move || {
                let mut engine =
                    Engine::new(cmd_rx, resp_tx, tick_tx, rng).with_tick_interval(tick_interval);
                engine.run();
            })
            .map_err(|source| EngineError::Spawn {
                name: "game-engine",
                source,
            })?;

        Ok(Self {
            cmd_tx,
            resp_rx,
            thread: Some(thread),
        })
    }

    pub fn send(&self, cmd: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx.send(cmd).map_err(|_| EngineError::Disconnected)
    }

    /// Next pending response, if any.
    pub fn try_recv(&self) -> Result<Option<EngineResponse>, EngineError> {
        match self.resp_rx.try_recv() {
            Ok(resp) => Ok(Some(resp)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EngineError::Disconnected),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineResponse, EngineError> {
        self.resp_rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => EngineError::Timeout,
            RecvTimeoutError::Disconnected => EngineError::Disconnected,
        })
    }

    pub fn shutdown(&mut self) {
        if self.send(EngineCommand::Shutdown).is_err() {
            debug!("engine already stopped");
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("engine thread panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event_result::Outcome;
    use crate::model::game_state::Phase;
    use crate::model::grid::Direction;
    use rand::rngs::mock::StepRng;

    /// Guards only move on an explicit `GuardTick`; the real ticker never
    /// fires within a test.
    fn engine() -> Engine<StepRng> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();
        Engine::new(cmd_rx, resp_tx, cmd_tx, StepRng::new(0, 0))
            .with_tick_interval(Duration::from_secs(3600))
    }

    fn walk(engine: &mut Engine<StepRng>, direction: Direction, steps: usize) {
        for _ in 0..steps {
            engine.handle(EngineCommand::Move(direction));
        }
    }

    fn enter_temple(engine: &mut Engine<StepRng>) {
        walk(engine, Direction::Right, 6);
        walk(engine, Direction::Down, 14);
        engine.handle(EngineCommand::SubmitAnswer("treasure".into()));
        engine.handle(EngineCommand::Choose(true));
        assert_eq!(engine.controller.phase(), Phase::Temple);
    }

    #[test]
    fn ticker_runs_only_in_the_temple() {
        let mut engine = engine();
        assert!(engine.ticker.is_none());

        enter_temple(&mut engine);
        assert!(engine.ticker.is_some());
    }

    #[test]
    fn ticker_stops_when_the_chest_is_opened() {
        let mut engine = engine();
        enter_temple(&mut engine);

        walk(&mut engine, Direction::Right, 9);
        walk(&mut engine, Direction::Down, 9);
        assert!(engine.ticker.is_some());

        assert!(engine.handle(EngineCommand::SubmitAnswer("3".into())));
        assert_eq!(engine.controller.outcome(), Some(Outcome::Victory));
        assert!(engine.ticker.is_none());

        assert!(!engine.handle(EngineCommand::GuardTick));
        assert!(engine.ticker.is_none());
    }

    #[test]
    fn ticker_stops_when_a_guard_catches_the_player() {
        let mut engine = engine();
        enter_temple(&mut engine);

        // (5, 9) is a guard post.
        walk(&mut engine, Direction::Right, 5);
        walk(&mut engine, Direction::Down, 9);

        assert!(engine.controller.is_game_over());
        assert!(engine.ticker.is_none());
    }

    #[test]
    fn restart_stops_ticker_and_reentry_starts_a_new_one() {
        let mut engine = engine();
        enter_temple(&mut engine);

        engine.handle(EngineCommand::Restart);
        assert!(engine.ticker.is_none());

        enter_temple(&mut engine);
        assert!(engine.ticker.is_some());
    }
}
