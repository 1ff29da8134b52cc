//! One-shot and periodic time-driven animations
//!
//! Both are pure functions of the time `t` they are sampled at; neither
//! stores a running clock.

use crate::animation::easing::Easing;

/// An animation with a fixed start and duration
#[derive(Clone, Debug, PartialEq)]
pub struct EventAnimation {
    start: f64,
    duration: f64,
    easing: Easing,
    interrupted: bool,
}

impl EventAnimation {
    pub fn new(start: f64, duration: f64) -> Self {
        Self {
            start,
            duration: duration.max(0.0),
            easing: Easing::default(),
            interrupted: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time at which the animation completes
    pub fn end_time(&self) -> f64 {
        self.start + self.duration
    }

    /// Move the animation so it begins at `start`, keeping its duration
    pub fn restart_at(&mut self, start: f64) {
        self.start = start;
        self.interrupted = false;
    }

    /// Eased progress at `t`, clamped to [0, 1]
    pub fn progress(&self, t: f64) -> f32 {
        if self.duration <= 0.0 {
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        let linear = ((t - self.start) / self.duration).clamp(0.0, 1.0) as f32;
        self.easing.apply(linear)
    }

    pub fn is_over(&self, t: f64) -> bool {
        self.interrupted || t >= self.end_time()
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Mark the animation over without reaching its end
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }
}

/// A looping animation that only ends when interrupted
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodicAnimation {
    start: f64,
    period: f64,
    interrupted: bool,
}

impl PeriodicAnimation {
    pub fn new(start: f64, period: f64) -> Self {
        Self {
            start,
            period,
            interrupted: false,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Position within the current period, in [0, 1)
    pub fn phase(&self, t: f64) -> f32 {
        if self.period <= 0.0 || t <= self.start {
            return 0.0;
        }
        ((t - self.start) / self.period).fract() as f32
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }
}
