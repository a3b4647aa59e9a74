// src/engine/core.rs

//! Pure watch-loop state machine.
//!
//! [`WatchCore`] consumes [`WatchEvent`]s and returns [`WatchStep`]s that
//! describe what the IO shell (`engine::runtime::WatchRuntime`) should do:
//! arm or disarm the debounce timer, or run one test cycle.
//!
//! It has no channels, no timers and no processes, so every transition can
//! be unit tested directly.

use std::time::Duration;

use tracing::debug;

use crate::engine::WatchEvent;

/// Where the watch loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Debouncing,
    Running,
    Stopped,
}

/// Command produced by the core, executed by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    /// (Re)start the debounce timer from zero.
    ArmDebounce(Duration),
    /// Drop any pending debounce timer.
    DisarmDebounce,
    /// Run one execute-classify-report cycle.
    RunCycle,
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchStep {
    pub commands: Vec<WatchCommand>,
    /// Whether the runtime loop should keep running.
    pub keep_running: bool,
}

impl WatchStep {
    fn continue_with(commands: Vec<WatchCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    fn stop(commands: Vec<WatchCommand>) -> Self {
        Self {
            commands,
            keep_running: false,
        }
    }
}

#[derive(Debug)]
pub struct WatchCore {
    state: WatchState,
    debounce: Duration,
}

impl WatchCore {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: WatchState::Idle,
            debounce,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Enter `Running` for the unconditional cycle at session start.
    pub fn begin_initial_cycle(&mut self) -> WatchStep {
        if self.state == WatchState::Stopped {
            return WatchStep::stop(Vec::new());
        }
        self.state = WatchState::Running;
        WatchStep::continue_with(vec![WatchCommand::RunCycle])
    }

    /// The runtime finished the cycle it was asked to run.
    pub fn finish_cycle(&mut self) {
        if self.state == WatchState::Running {
            self.state = WatchState::Idle;
        }
    }

    /// Handle a single event.
    pub fn step(&mut self, event: WatchEvent) -> WatchStep {
        let before = self.state;
        let step = match (self.state, event) {
            (WatchState::Stopped, _) => WatchStep::stop(Vec::new()),

            (_, WatchEvent::ShutdownRequested) => {
                self.state = WatchState::Stopped;
                WatchStep::stop(vec![WatchCommand::DisarmDebounce])
            }

            (_, WatchEvent::FileChanged { .. }) => {
                self.state = WatchState::Debouncing;
                WatchStep::continue_with(vec![WatchCommand::ArmDebounce(self.debounce)])
            }

            (WatchState::Debouncing, WatchEvent::DebounceElapsed) => {
                self.state = WatchState::Running;
                WatchStep::continue_with(vec![WatchCommand::RunCycle])
            }

            // A timer that fired after its burst was superseded or cancelled.
            (_, WatchEvent::DebounceElapsed) => WatchStep::continue_with(Vec::new()),
        };

        debug!(?before, after = ?self.state, commands = ?step.commands, "watch core step");
        step
    }
}
