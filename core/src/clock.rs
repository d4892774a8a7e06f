//! Day clock — simulated time of day, day phase, and the tick source.
//!
//! The clock only tracks where in the trading day we are. It never
//! decides what happens on a tick; the engine does that.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayPhase {
    /// Waiting for the player to open the next day.
    Idle,
    Running,
    /// Final day closed. Terminal until reset.
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayClock {
    pub hour:           u32,
    pub minute:         u32,
    pub phase:          DayPhase,
    pub skip_available: bool,
    open_hour:          u32,
    close_hour:         u32,
    skip_unlock_hour:   u32,
    minutes_per_tick:   u32,
}

impl DayClock {
    pub fn new(open_hour: u32, close_hour: u32, skip_unlock_hour: u32, minutes_per_tick: u32) -> Self {
        Self {
            hour: open_hour,
            minute: 0,
            phase: DayPhase::Idle,
            skip_available: false,
            open_hour,
            close_hour,
            skip_unlock_hour,
            minutes_per_tick,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == DayPhase::Running
    }

    /// Back to opening time with skip locked.
    pub fn rewind(&mut self) {
        self.hour = self.open_hour;
        self.minute = 0;
        self.skip_available = false;
    }

    /// Advance one tick of simulated time.
    /// Returns true the first time the skip unlock hour is reached.
    pub fn advance(&mut self) -> bool {
        self.minute += self.minutes_per_tick;
        while self.minute >= 60 {
            self.minute -= 60;
            self.hour += 1;
        }

        if self.hour >= self.skip_unlock_hour && !self.skip_available {
            self.skip_available = true;
            return true;
        }
        false
    }

    pub fn is_closing_time(&self) -> bool {
        self.hour >= self.close_hour
    }

    pub fn jump_to_close(&mut self) {
        self.hour = self.close_hour;
        self.minute = 0;
    }

    /// Zero-padded "HH:MM".
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Drives clock ticks. The engine starts it when a day opens and stops
/// it whenever a day closes or the game resets, so a stale source can
/// never fire into fresh state.
pub trait TickSource: Send {
    fn start(&mut self, interval: Duration);
    fn stop(&mut self);
    fn is_active(&self) -> bool;

    /// Block until the next tick is due.
    /// Returns false immediately when the source is stopped.
    fn wait_for_tick(&mut self) -> bool;
}

/// Fires instantly whenever asked. Used by tests and fast-forward runs.
#[derive(Debug, Default)]
pub struct ManualTickSource {
    active: bool,
    starts: u32,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times start() has been called.
    pub fn start_count(&self) -> u32 {
        self.starts
    }
}

impl TickSource for ManualTickSource {
    fn start(&mut self, _interval: Duration) {
        self.active = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn wait_for_tick(&mut self) -> bool {
        self.active
    }
}

/// Paces ticks against the wall clock.
#[derive(Debug, Default)]
pub struct IntervalTickSource {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTickSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for IntervalTickSource {
    fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.next_due = Some(Instant::now() + interval);
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    fn wait_for_tick(&mut self) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        self.next_due = Some(due + self.interval);
        true
    }
}
