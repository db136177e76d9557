use orrery_engine::*;

use crate::bodies;

// ── Key codes (DOM keyCode) ──────────────────────────────────────────

const KEY_P: u32 = 80;
const KEY_R: u32 = 82;
const KEY_EQUALS: u32 = 187;
const KEY_MINUS: u32 = 189;
const KEY_NUMPAD_ADD: u32 = 107;
const KEY_NUMPAD_SUBTRACT: u32 = 109;

// ── Custom event kinds from the host ─────────────────────────────────

/// a = new reference delay in seconds per Earth orbit.
const CUSTOM_SET_SPEED: u32 = 2;
const CUSTOM_TOGGLE_PAUSE: u32 = 3;
const CUSTOM_RANDOMIZE: u32 = 4;
/// a = body row, b = inclination in degrees.
const CUSTOM_SET_INCLINATION: u32 = 5;
/// a = body row, b = ascending node in degrees.
const CUSTOM_SET_ASCENDING_NODE: u32 = 6;

/// Seconds of play time per Earth orbit at startup.
const DEFAULT_YEAR_SECONDS: f64 = 480.0;
/// Key-repeat interval for the speed keys.
const SPEED_REPEAT: f64 = 0.05;
/// Reference delay multiplier per repeat at an overage ratio of 1.
const SPEED_STEP: f64 = 0.97;
const MIN_YEAR_SECONDS: f64 = 1.0;
const MAX_YEAR_SECONDS: f64 = 86_400.0;

pub struct SolarSystem {
    /// Paces held +/- keys; the overage ratio keeps the change rate
    /// independent of the frame rate.
    speed_repeat: DelayTrigger,
    randomize_debounce: DelayTrigger,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            speed_repeat: DelayTrigger::new(SPEED_REPEAT),
            randomize_debounce: DelayTrigger::default(),
        }
    }

    fn handle_speed_keys(&mut self, scene: &mut SceneModel, input: &InputQueue, now: f64) {
        let faster = input.is_held(KEY_EQUALS) || input.is_held(KEY_NUMPAD_ADD);
        let slower = input.is_held(KEY_MINUS) || input.is_held(KEY_NUMPAD_SUBTRACT);
        if faster == slower || !self.speed_repeat.toggle(now, false) {
            return;
        }

        let step = SPEED_STEP.powf(self.speed_repeat.overage_ratio());
        let factor = if faster { step } else { step.recip() };
        let delay = (scene.reference_delay() * factor).clamp(MIN_YEAR_SECONDS, MAX_YEAR_SECONDS);
        if let Err(err) = scene.set_reference_delay(delay) {
            log::warn!("speed change: {err}");
        }
    }

    fn handle_custom(&mut self, scene: &mut SceneModel, kind: u32, a: f32, b: f32, now: f64) {
        match kind {
            CUSTOM_SET_SPEED => {
                if let Err(err) = scene.set_reference_delay(a as f64) {
                    log::warn!("set speed: {err}");
                }
            }
            CUSTOM_TOGGLE_PAUSE => {
                scene.pause_toggle_requested(now);
            }
            CUSTOM_RANDOMIZE => scene.randomize_orbit_angles(),
            CUSTOM_SET_INCLINATION => {
                if let Err(err) = scene.set_inclination(BodyId(a as usize), b as f64) {
                    log::warn!("set inclination: {err}");
                }
            }
            CUSTOM_SET_ASCENDING_NODE => {
                if let Err(err) = scene.set_ascending_node(BodyId(a as usize), b as f64) {
                    log::warn!("set ascending node: {err}");
                }
            }
            _ => {}
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for SolarSystem {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            reference_delay: DEFAULT_YEAR_SECONDS,
            ..SceneConfig::default()
        }
    }

    fn table(&self) -> SceneTable {
        bodies::solar_table()
    }

    fn init(&mut self, scene: &mut SceneModel) {
        scene.randomize_orbit_angles();
        log::info!(
            "solar system: {} bodies, one Earth orbit every {:.0}s",
            scene.len(),
            scene.reference_delay()
        );
    }

    fn update(&mut self, scene: &mut SceneModel, input: &InputQueue, now: f64) {
        if input.is_held(KEY_P) {
            scene.pause_toggle_requested(now);
        }
        if input.is_held(KEY_R) && self.randomize_debounce.toggle(now, false) {
            scene.randomize_orbit_angles();
        }
        self.handle_speed_keys(scene, input, now);

        for event in input.iter() {
            if let InputEvent::Custom { kind, a, b, .. } = *event {
                self.handle_custom(scene, kind, a, b, now);
            }
        }
    }
}
