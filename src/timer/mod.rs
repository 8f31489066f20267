pub mod engine;

pub use engine::{TickPeriod, TimerEngine};

/// Default countdown length: 25 minutes.
pub const DEFAULT_DURATION_SECS: u32 = 25 * 60;

/// Countdown state. Created once at startup and kept for the life of the
/// process; `reset` restores it, nothing destroys it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    /// Total seconds configured for the current countdown
    pub duration: u32,
    /// Remaining seconds, always within 0..=duration
    pub time_left: u32,
    pub is_running: bool,
}

impl TimerState {
    pub fn new(duration_secs: u32) -> Self {
        // zero-length countdowns are meaningless; fall back to the default
        let duration = if duration_secs == 0 {
            DEFAULT_DURATION_SECS
        } else {
            duration_secs
        };
        TimerState {
            duration,
            time_left: duration,
            is_running: false,
        }
    }

    pub fn expired(self) -> bool {
        self.time_left == 0
    }

    /// Elapsed share of the countdown as a percentage; 0 for a zero duration.
    pub fn progress(self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        (self.duration - self.time_left) as f64 / self.duration as f64 * 100.0
    }
}

impl Default for TimerState {
    fn default() -> Self {
        TimerState::new(DEFAULT_DURATION_SECS)
    }
}

/// A timer transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    /// One second elapsed on the tick source
    Tick,
    Reset,
    /// New countdown length in seconds. Zero is ignored; a running
    /// countdown is stopped and retimed.
    SetDuration(u32),
}

/// Pure transition function for the countdown.
/// Inapplicable commands degrade to no-ops; nothing fails.
pub fn apply(state: TimerState, command: TimerCommand) -> TimerState {
    match command {
        TimerCommand::Start => {
            // an expired countdown cannot run; reset or retime it first
            if state.time_left == 0 {
                state
            } else {
                TimerState {
                    is_running: true,
                    ..state
                }
            }
        }
        TimerCommand::Pause => TimerState {
            is_running: false,
            ..state
        },
        TimerCommand::Tick => TimerState {
            time_left: state.time_left.saturating_sub(1),
            // auto-pause the moment the countdown reaches zero
            is_running: if state.time_left > 1 {
                state.is_running
            } else {
                false
            },
            ..state
        },
        TimerCommand::Reset => TimerState {
            time_left: state.duration,
            is_running: false,
            ..state
        },
        TimerCommand::SetDuration(secs) => {
            if secs == 0 {
                state
            } else {
                TimerState {
                    duration: secs,
                    time_left: secs,
                    is_running: false,
                }
            }
        }
    }
}

/// Render remaining seconds as mm:ss (or h:mm:ss past an hour).
pub fn format_time(secs: u32) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let rest = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, rest)
    } else {
        format!("{:02}:{:02}", mins, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_sets_running() {
        let state = apply(TimerState::new(300), TimerCommand::Start);
        assert!(state.is_running);
        assert_eq!(state.time_left, 300);
    }

    #[test]
    fn test_start_at_zero_is_noop() {
        let mut state = TimerState::new(1);
        state = apply(state, TimerCommand::Start);
        state = apply(state, TimerCommand::Tick);
        assert_eq!(state.time_left, 0);
        assert!(!state.is_running);

        let after = apply(state, TimerCommand::Start);
        assert_eq!(after, state);
    }

    #[test]
    fn test_pause_clears_running() {
        let state = apply(TimerState::new(300), TimerCommand::Start);
        let state = apply(state, TimerCommand::Pause);
        assert!(!state.is_running);
        assert_eq!(state.time_left, 300);
    }

    #[test]
    fn test_tick_counts_down_and_clamps() {
        // duration ticks from a fresh state reach exactly zero; extra
        // ticks stay clamped there
        let mut state = TimerState::new(5);
        for _ in 0..5 {
            state = apply(state, TimerCommand::Tick);
        }
        assert_eq!(state.time_left, 0);
        assert!(!state.is_running);

        state = apply(state, TimerCommand::Tick);
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn test_tick_auto_pauses_at_zero() {
        let mut state = apply(TimerState::new(2), TimerCommand::Start);
        state = apply(state, TimerCommand::Tick);
        assert_eq!(state.time_left, 1);
        assert!(state.is_running);

        state = apply(state, TimerCommand::Tick);
        assert_eq!(state.time_left, 0);
        assert!(!state.is_running);
    }

    #[test]
    fn test_run_to_completion_scenario() {
        let mut state = apply(TimerState::new(5), TimerCommand::Start);
        for _ in 0..5 {
            state = apply(state, TimerCommand::Tick);
        }
        assert_eq!(state.time_left, 0);
        assert!(!state.is_running);

        // a sixth tick leaves it clamped, not negative
        state = apply(state, TimerCommand::Tick);
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn test_reset_restores_duration() {
        let mut state = apply(TimerState::new(300), TimerCommand::Start);
        for _ in 0..17 {
            state = apply(state, TimerCommand::Tick);
        }
        state = apply(state, TimerCommand::Reset);
        assert_eq!(state.time_left, 300);
        assert!(!state.is_running);
    }

    #[test]
    fn test_set_duration_retimes_and_stops() {
        // retiming while running silently stops the run
        let state = apply(TimerState::new(300), TimerCommand::Start);
        let state = apply(state, TimerCommand::SetDuration(600));
        assert_eq!(state.duration, 600);
        assert_eq!(state.time_left, 600);
        assert!(!state.is_running);
    }

    #[test]
    fn test_set_duration_zero_is_noop() {
        let state = apply(TimerState::new(300), TimerCommand::SetDuration(0));
        assert_eq!(state.duration, 300);
        assert_eq!(state.time_left, 300);
    }

    #[test]
    fn test_new_zero_falls_back_to_default() {
        let state = TimerState::new(0);
        assert_eq!(state.duration, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_progress() {
        let mut state = apply(TimerState::new(100), TimerCommand::Start);
        assert_eq!(state.progress(), 0.0);
        for _ in 0..25 {
            state = apply(state, TimerCommand::Tick);
        }
        assert_eq!(state.progress(), 25.0);

        let degenerate = TimerState {
            duration: 0,
            time_left: 0,
            is_running: false,
        };
        assert_eq!(degenerate.progress(), 0.0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(3661), "1:01:01");
    }
}
