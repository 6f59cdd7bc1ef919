//! Boundary traits for the engine's external collaborators: the input
//! handler that feeds discrete menu signals, and the animation system that
//! plays clips and reports back frame events.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// The frame-event name this engine interprets; damage lands in sync with
/// the visual when a clip raises it mid-swing.
pub const ATTACK_HIT_EVENT: &str = "attack_hit";

/// Discrete input signals consumed during the menu phases. There are no
/// continuous axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    MenuUp,
    MenuDown,
    MenuLeft,
    MenuRight,
    Confirm,
    Cancel,
}

/// Source of player input. The engine consumes at most one signal per
/// frame while a menu phase is active.
pub trait InputPort {
    fn poll(&mut self) -> Option<InputAction>;
}

/// A queued input source, used by tests and headless runners to script a
/// whole encounter up front.
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    queue: VecDeque<InputAction>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: InputAction) {
        self.queue.push_back(action);
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = InputAction>) {
        self.queue.extend(actions);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputPort for QueuedInput {
    fn poll(&mut self) -> Option<InputAction> {
        self.queue.pop_front()
    }
}

/// The animation collaborator. `play` returns false when the clip cannot
/// start, in which case the engine applies the pending result directly so
/// damage is never lost.
pub trait AnimationPort {
    fn play(&mut self, entity_id: u32, clip_id: &str, restart: bool) -> bool;
}

/// Signals the animation system raises back into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationSignal {
    /// A named frame event inside a playing clip. Only
    /// [`ATTACK_HIT_EVENT`] is interpreted.
    FrameEvent { entity_id: u32, name: String },
    /// The clip finished.
    Completed { entity_id: u32 },
}
