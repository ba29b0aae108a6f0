//! Cancellable gravity timer
//!
//! The timer only exists while a game is running. Pausing, game over and the
//! idle phase drop the underlying interval, so no tick can arrive for a game
//! that is not accepting them. A level change replaces the interval with one
//! at the new period.

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use tetris_rules_core::types::Phase;
use tetris_rules_core::GameState;

/// Period gravity should run at for `state`, or `None` when it must be stopped.
pub fn desired_period(state: &GameState) -> Option<Duration> {
    match state.phase() {
        Phase::Running => Some(Duration::from_millis(u64::from(state.gravity_interval_ms()))),
        Phase::Idle | Phase::Paused | Phase::GameOver => None,
    }
}

#[derive(Debug, Default)]
pub struct GravityTimer {
    interval: Option<Interval>,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self { interval: None }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Period of the armed interval
    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Arm, re-arm, or disarm to match the state's phase and level.
    pub fn sync(&mut self, state: &GameState) {
        self.set_period(desired_period(state));
    }

    /// Keep the running interval if the period is unchanged, otherwise
    /// replace it. The first tick of a new interval comes one full period later.
    pub fn set_period(&mut self, period: Option<Duration>) {
        match period {
            None => self.disarm(),
            Some(period) if self.period() == Some(period) => {}
            Some(period) => {
                let mut interval = time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.interval = Some(interval);
            }
        }
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    /// Wait for the next tick. Never resolves while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
