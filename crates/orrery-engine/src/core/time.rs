use super::trigger::DelayTrigger;

/// Pause-aware animation clock.
///
/// Converts wall-clock seconds into "play time": wall-clock time minus every
/// interval spent paused. Pause requests go through a [`DelayTrigger`], so a
/// held pause key toggles once per debounce window rather than every frame.
#[derive(Debug, Clone)]
pub struct PlayClock {
    /// Trigger value doubles as the paused flag.
    pausing: DelayTrigger,
    just_started: bool,
    just_resumed: bool,
    pause_start: f64,
    total_paused: f64,
}

impl PlayClock {
    pub fn new(pause_debounce: f64) -> Self {
        Self {
            pausing: DelayTrigger::new(pause_debounce),
            just_started: true,
            just_resumed: false,
            pause_start: 0.0,
            total_paused: 0.0,
        }
    }

    /// Attempt to toggle pause. Requests inside the debounce window are
    /// ignored. Returns whether the state changed.
    pub fn pause_toggle_requested(&mut self, now: f64) -> bool {
        if !self.pausing.toggle(now, false) {
            return false;
        }
        self.apply_transition(now);
        true
    }

    /// Enter the paused state regardless of debounce. No-op when already paused.
    pub fn force_pause(&mut self, now: f64) {
        if self.is_paused() {
            return;
        }
        self.pausing.toggle(now, true);
        self.apply_transition(now);
    }

    fn apply_transition(&mut self, now: f64) {
        if self.pausing.value() {
            self.pause_start = now;
            log::debug!("clock paused at {now:.3}s");
        } else {
            self.total_paused += (now - self.pause_start).max(0.0);
            self.just_resumed = true;
            log::debug!(
                "clock resumed at {now:.3}s (total paused {:.3}s)",
                self.total_paused
            );
        }
    }

    /// Wall-clock time minus all paused time. Frozen while paused.
    pub fn play_time(&self, now: f64) -> f64 {
        if self.is_paused() {
            self.pause_start - self.total_paused
        } else {
            now - self.total_paused
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pausing.value()
    }

    /// The first frame after load may animate even while paused, so bodies
    /// start from a fully computed position.
    pub fn can_update_animation(&self) -> bool {
        !self.is_paused() || self.just_started
    }

    pub fn just_started(&self) -> bool {
        self.just_started
    }

    pub fn set_just_started(&mut self, value: bool) {
        self.just_started = value;
    }

    /// Returns true once after each pause→resume transition.
    pub fn take_resumed(&mut self) -> bool {
        std::mem::take(&mut self.just_resumed)
    }

    /// Fold time that should not count as animation (asset loading) into
    /// the paused total. While paused, the open pause interval already
    /// covers it.
    pub fn add_elapsed_seconds(&mut self, seconds: f64) {
        if self.is_paused() || seconds <= 0.0 {
            return;
        }
        self.total_paused += seconds;
    }

    pub fn total_paused(&self) -> f64 {
        self.total_paused
    }
}

impl Default for PlayClock {
    fn default() -> Self {
        Self::new(super::trigger::DEFAULT_TRIGGER_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_with_wall_clock_when_unpaused() {
        let clock = PlayClock::new(0.25);
        assert_eq!(clock.play_time(12.5), 12.5);
        assert!(!clock.is_paused());
    }

    #[test]
    fn paused_interval_is_excluded() {
        let mut clock = PlayClock::new(0.25);
        assert!(clock.pause_toggle_requested(10.0));
        let before = clock.play_time(10.0);
        assert!(clock.pause_toggle_requested(15.0));
        let after = clock.play_time(15.0);
        assert!((after - before).abs() < 1e-9);
        assert!((clock.total_paused() - 5.0).abs() < 1e-9);
        assert!((clock.play_time(16.0) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn play_time_is_monotonic_across_cycles() {
        let mut clock = PlayClock::new(0.25);
        let mut last = f64::MIN;
        for i in 0..5000 {
            let now = i as f64 * 0.017;
            // mash the pause key every 7th frame
            if i % 7 == 0 {
                clock.pause_toggle_requested(now);
            }
            let t = clock.play_time(now);
            assert!(t >= last, "play time went back at {now}: {t} < {last}");
            last = t;
        }
    }

    #[test]
    fn held_key_toggles_once_per_window() {
        let mut clock = PlayClock::new(0.25);
        assert!(clock.pause_toggle_requested(1.0));
        assert!(!clock.pause_toggle_requested(1.05));
        assert!(!clock.pause_toggle_requested(1.2));
        assert!(clock.is_paused());
    }

    #[test]
    fn just_started_exempts_first_frame() {
        let mut clock = PlayClock::new(0.25);
        clock.force_pause(0.1);
        assert!(clock.is_paused());
        assert!(clock.can_update_animation());
        clock.set_just_started(false);
        assert!(!clock.can_update_animation());
    }

    #[test]
    fn resume_is_reported_once() {
        let mut clock = PlayClock::new(0.25);
        clock.pause_toggle_requested(1.0);
        assert!(!clock.take_resumed());
        clock.pause_toggle_requested(2.0);
        assert!(clock.take_resumed());
        assert!(!clock.take_resumed());
    }

    #[test]
    fn loading_time_not_counted() {
        let mut clock = PlayClock::new(0.25);
        clock.add_elapsed_seconds(3.0);
        assert!((clock.play_time(5.0) - 2.0).abs() < 1e-9);
        clock.add_elapsed_seconds(-1.0);
        assert!((clock.play_time(5.0) - 2.0).abs() < 1e-9);
    }
}
