/// Input events the scene understands.
/// Key codes carry no scene-specific meaning here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the UI layer (sliders, buttons).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Per-frame queue of input events plus the set of keys currently held.
///
/// Events are drained every frame. Held keys persist until their `KeyUp`,
/// so debounced actions can poll them every frame like a key-down check.
pub struct InputQueue {
    events: Vec<InputEvent>,
    held: Vec<u32>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            held: Vec::with_capacity(8),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                if !self.held.contains(&key_code) {
                    self.held.push(key_code);
                }
            }
            InputEvent::KeyUp { key_code } => self.held.retain(|&k| k != key_code),
            InputEvent::Custom { .. } => {}
        }
        self.events.push(event);
    }

    /// Drain all pending events. Held keys are kept.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Whether `key_code` is down right now.
    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    /// Release every held key (window lost focus).
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
