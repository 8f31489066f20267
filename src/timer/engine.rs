use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::{TimerCommand, TimerState, apply};

/// How often the tick source fires. One second in production; tests
/// shrink it to keep themselves fast.
#[derive(Debug, Clone, Copy)]
pub struct TickPeriod(pub Duration);

impl Default for TickPeriod {
    fn default() -> Self {
        TickPeriod(Duration::from_secs(1))
    }
}

/// The periodic tick source: a background thread posting `Tick` commands
/// on the engine's channel until cancelled.
///
/// Cancellation is deterministic: dropping the `Ticker` signals the stop
/// channel and joins the thread, so no tick can be sent afterwards.
struct Ticker {
    stop_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    fn spawn(tx: mpsc::Sender<TimerCommand>, period: Duration) -> Ticker {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if tx.send(TimerCommand::Tick).is_err() {
                            // engine side is gone
                            break;
                        }
                    }
                    // stop signal, or the Ticker was dropped
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Ticker {
            stop_tx,
            handle: Some(handle),
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// The countdown engine: owns the timer state and the tick source.
///
/// `start` activates the tick source (at most one, ever); `pause`, `reset`
/// and `set_duration` cancel it before the state moves on, and discard any
/// tick that was already queued. The host event loop calls `pump` each
/// round to absorb elapsed ticks.
pub struct TimerEngine {
    state: TimerState,
    tx: mpsc::Sender<TimerCommand>,
    rx: mpsc::Receiver<TimerCommand>,
    ticker: Option<Ticker>,
    period: Duration,
}

impl TimerEngine {
    pub fn new(duration_secs: u32) -> Self {
        Self::with_period(duration_secs, TickPeriod::default())
    }

    pub fn with_period(duration_secs: u32, period: TickPeriod) -> Self {
        let (tx, rx) = mpsc::channel();
        TimerEngine {
            state: TimerState::new(duration_secs),
            tx,
            rx,
            ticker: None,
            period: period.0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Begin (or continue) the countdown. Idempotent: calling start while
    /// running never creates a second tick source.
    pub fn start(&mut self) {
        if self.state.time_left == 0 {
            return;
        }
        self.state = apply(self.state, TimerCommand::Start);
        if self.ticker.is_none() {
            self.ticker = Some(Ticker::spawn(self.tx.clone(), self.period));
        }
    }

    pub fn pause(&mut self) {
        self.cancel_ticks();
        self.state = apply(self.state, TimerCommand::Pause);
    }

    pub fn reset(&mut self) {
        self.cancel_ticks();
        self.state = apply(self.state, TimerCommand::Reset);
    }

    /// Retime the countdown. Stops an active run first (the surrounding UI
    /// disables this control while running; the engine tolerates the call).
    pub fn set_duration(&mut self, secs: u32) {
        if secs == 0 {
            return;
        }
        self.cancel_ticks();
        self.state = apply(self.state, TimerCommand::SetDuration(secs));
    }

    /// Absorb ticks queued by the tick source. Returns true if the state
    /// changed. Drops the tick source once the countdown expires.
    pub fn pump(&mut self) -> bool {
        let before = self.state;
        while let Ok(command) = self.rx.try_recv() {
            self.state = apply(self.state, command);
        }
        if self.state.time_left == 0 {
            self.ticker = None;
        }
        self.state != before
    }

    /// Stop the tick source and flush anything it already sent. After this
    /// returns, no stale tick can reach the state.
    fn cancel_ticks(&mut self) {
        self.ticker = None;
        while self.rx.try_recv().is_ok() {}
    }

    /// Sender half of the command channel. Lets tests inject ticks
    /// without a live tick source.
    #[cfg(test)]
    pub(crate) fn sender(&self) -> mpsc::Sender<TimerCommand> {
        self.tx.clone()
    }

    /// Block until the next tick arrives or the timeout passes, then pump.
    /// Used by the inline CLI countdown, which has no other event source.
    pub fn wait_tick(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(command) => {
                self.state = apply(self.state, command);
                if self.state.time_left == 0 {
                    self.ticker = None;
                }
                true
            }
            Err(_) => false,
        }
    }
}
