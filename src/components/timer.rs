//! Frame-driven time gates.
//!
//! Both gates are advanced explicitly with the frame delta instead of reading
//! a wall clock, so a frozen or paused world also freezes every gate embedded
//! in its components.
//!
//! - [`Timer`] is a repeating gate: [`Timer::tick`] returns `true` once per
//!   elapsed interval and restarts its clock.
//! - [`CooldownTimer`] is a one-shot gate: [`CooldownTimer::start`] arms it,
//!   [`CooldownTimer::update`] advances it and disarms it on completion.

/// Repeating interval gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    /// Seconds that must pass before the next tick fires.
    pub interval: f32,
    elapsed: f32,
}

impl Timer {
    pub fn new(interval: f32) -> Self {
        Timer {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance the clock by `dt` and report whether the interval has passed.
    ///
    /// Fires only when the accumulated time is strictly greater than the
    /// interval; on firing the clock restarts from zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            return true;
        }
        false
    }

    /// Restart the clock without firing.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// One-shot cooldown.
///
/// Starts disarmed with `amount_cooled == 1.0`. While armed, `amount_cooled`
/// grows linearly from `0.0` to `1.0` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownTimer {
    pub duration: f32,
    pub is_cooling_down: bool,
    pub amount_cooled: f32,
    elapsed: f32,
}

impl CooldownTimer {
    pub fn new(duration: f32) -> Self {
        CooldownTimer {
            duration,
            is_cooling_down: false,
            amount_cooled: 1.0,
            elapsed: 0.0,
        }
    }

    /// Arm the cooldown.
    pub fn start(&mut self) {
        self.is_cooling_down = true;
        self.amount_cooled = 0.0;
        self.elapsed = 0.0;
    }

    /// Advance an armed cooldown by `dt`. No-op while disarmed.
    pub fn update(&mut self, dt: f32) {
        if !self.is_cooling_down {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.is_cooling_down = false;
            self.amount_cooled = 1.0;
            self.elapsed = 0.0;
        } else {
            self.amount_cooled = self.elapsed / self.duration;
        }
    }

    /// Seconds since the last `start`, or `0.0` when disarmed.
    pub fn elapsed(&self) -> f32 {
        if self.is_cooling_down { self.elapsed } else { 0.0 }
    }
}
