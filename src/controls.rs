use std::cell::Cell;
use std::rc::Rc;

/// The four driving commands read by a vehicle each frame.
///
/// The commands are independent, so e.g. `forward` and `left` may both be set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlIntent {
    pub forward: bool,
    pub left: bool,
    pub right: bool,
    pub reverse: bool,
}

impl ControlIntent {
    /// Accelerate forward and nothing else.
    pub const FORWARD: Self = Self {
        forward: true,
        left: false,
        right: false,
        reverse: false,
    };

    /// Builds an intent from decision outputs in the order forward, left, right, reverse.
    /// Any non-zero output switches the corresponding command on.
    pub fn from_outputs(outputs: &[f64; 4]) -> Self {
        Self {
            forward: outputs[0] != 0.0,
            left: outputs[1] != 0.0,
            right: outputs[2] != 0.0,
            reverse: outputs[3] != 0.0,
        }
    }
}

/// One of the four keys used to drive a vehicle by hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Maps a DOM style key name, such as `"ArrowUp"`, to a driving key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Keyboard state shared between the host and a human driven vehicle.
///
/// The host forwards key events with [KeyboardInput::key_down] and
/// [KeyboardInput::key_up]; the vehicle reads the latest state once per frame.
/// Clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct KeyboardInput {
    state: Rc<Cell<ControlIntent>>,
}

impl KeyboardInput {
    /// Creates a keyboard input with no keys held.
    pub fn new() -> Self {
        Default::default()
    }

    /// Records that a key was pressed. Repeated presses have no further effect.
    pub fn key_down(&self, key: Key) {
        self.set(key, true);
    }

    /// Records that a key was released.
    pub fn key_up(&self, key: Key) {
        self.set(key, false);
    }

    /// The current state of the keys.
    pub fn intent(&self) -> ControlIntent {
        self.state.get()
    }

    fn set(&self, key: Key, held: bool) {
        let mut intent = self.state.get();
        match key {
            Key::Up => intent.forward = held,
            Key::Down => intent.reverse = held,
            Key::Left => intent.left = held,
            Key::Right => intent.right = held,
        }
        self.state.set(intent);
    }
}

/// Where a vehicle's control intent comes from.
#[derive(Clone, Debug)]
pub enum Controls {
    /// Driven by a person through a shared keyboard state.
    Keyboard(KeyboardInput),
    /// Scripted traffic which always drives forward.
    Traffic,
    /// Driven by the vehicle's decision policy; the intent is overwritten every frame.
    Autopilot(ControlIntent),
}

impl Controls {
    /// The control intent to apply this frame.
    pub fn intent(&self) -> ControlIntent {
        match self {
            Controls::Keyboard(input) => input.intent(),
            Controls::Traffic => ControlIntent::FORWARD,
            Controls::Autopilot(intent) => *intent,
        }
    }

    /// Whether decision outputs should drive the vehicle.
    pub fn is_autopilot(&self) -> bool {
        matches!(self, Controls::Autopilot(_))
    }

    /// Overwrites the intent of an autopilot. Other sources are left untouched.
    pub(crate) fn apply_decision(&mut self, outputs: &[f64; 4]) {
        if let Controls::Autopilot(intent) = self {
            *intent = ControlIntent::from_outputs(outputs);
        }
    }
}
