/// Default minimum interval between two flips, in seconds.
pub const DEFAULT_TRIGGER_DELAY: f64 = 0.25;

/// Overage ratios at or above this are treated as a stale first call
/// (huge delta after load or a long pause) and reported as 1.0.
pub const DEFAULT_RATIO_CEILING: f64 = 10.0;

/// Time-gated boolean latch.
///
/// `toggle` only flips the value once more than `delay` seconds have passed
/// since the previous successful flip. Callers use it to debounce held keys,
/// to pace key-repeat movement (scaled by [`DelayTrigger::overage_ratio`]),
/// and to cap the frame rate.
#[derive(Debug, Clone)]
pub struct DelayTrigger {
    value: bool,
    delay: f64,
    last_flip: f64,
    last_ratio: f64,
    ratio_ceiling: f64,
}

impl DelayTrigger {
    pub fn new(delay: f64) -> Self {
        Self {
            value: false,
            delay: delay.max(0.0),
            last_flip: 0.0,
            last_ratio: 0.0,
            ratio_ceiling: DEFAULT_RATIO_CEILING,
        }
    }

    /// Replace the clamp threshold used by [`DelayTrigger::overage_ratio`].
    pub fn with_ratio_ceiling(mut self, ceiling: f64) -> Self {
        self.ratio_ceiling = ceiling;
        self
    }

    /// Flip the value if the debounce interval has elapsed (or `force` is set).
    /// Returns whether a flip happened.
    pub fn toggle(&mut self, now: f64, force: bool) -> bool {
        let diff = now - self.last_flip;
        if diff > self.delay || force {
            self.last_flip = now;
            self.value = !self.value;
            self.last_ratio = if self.delay > 0.0 { diff / self.delay } else { 1.0 };
            return true;
        }
        false
    }

    /// How far the last successful flip overshot the interval, as a multiple
    /// of the interval. Clamped to 1.0 once it reaches the ratio ceiling.
    pub fn overage_ratio(&self) -> f64 {
        if self.last_ratio >= self.ratio_ceiling {
            1.0
        } else {
            self.last_ratio
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Negative delays are treated as zero.
    pub fn set_delay(&mut self, delay: f64) {
        self.delay = delay.max(0.0);
    }

    /// Timestamp of the last successful flip.
    pub fn last_flip(&self) -> f64 {
        self.last_flip
    }
}

impl Default for DelayTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_DELAY)
    }
}
