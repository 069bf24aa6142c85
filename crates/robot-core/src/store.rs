//! The single shared robot state.
//!
//! Every input adapter and the status endpoint hold a clone of the same
//! [`RobotStore`]. All access goes through one mutex, and a mutation plus the
//! snapshot that reflects it happen under a single acquisition, so callers
//! never observe a half-applied command.

use robot_types::{Component, ComponentStatus, IndicatorColor, Snapshot};
use std::sync::{Arc, Mutex, MutexGuard};

/// Mutable robot state. Only reachable through [`RobotStore`].
#[derive(Debug, Clone)]
pub struct RobotState {
    color: IndicatorColor,
    message: String,
    components: ComponentStatus,
    voice_active: bool,
}

impl RobotState {
    fn new(initial_message: impl Into<String>) -> Self {
        Self {
            color: IndicatorColor::Idle,
            message: initial_message.into(),
            components: ComponentStatus::default(),
            voice_active: false,
        }
    }

    pub fn set_color(&mut self, color: IndicatorColor) {
        self.color = color;
    }

    pub fn set_component(&mut self, component: Component, on: bool) {
        self.components.set(component, on);
    }

    /// Turns every component off and idles the indicator.
    pub fn reset_all(&mut self) {
        self.components.clear();
        self.color = IndicatorColor::Idle;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Flips voice mode and returns the new value.
    pub fn toggle_voice_mode(&mut self) -> bool {
        self.voice_active = !self.voice_active;
        self.voice_active
    }

    pub fn components(&self) -> &ComponentStatus {
        &self.components
    }

    pub fn voice_active(&self) -> bool {
        self.voice_active
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            color: self.color,
            message: self.message.clone(),
            gpio: self.components,
            voice_active: self.voice_active,
        }
    }
}

/// Cloneable handle to the process-wide [`RobotState`].
#[derive(Debug, Clone)]
pub struct RobotStore {
    inner: Arc<Mutex<RobotState>>,
}

impl RobotStore {
    /// Creates the store with everything off, the indicator idle, and
    /// `initial_message` as the last message.
    pub fn new(initial_message: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RobotState::new(initial_message))),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Runs `f` against the state and returns its result together with the
    /// snapshot taken immediately afterwards, under the same lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut RobotState) -> R) -> (R, Snapshot) {
        let mut state = self.lock();
        let result = f(&mut state);
        (result, state.snapshot())
    }

    pub fn voice_active(&self) -> bool {
        self.lock().voice_active()
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.lock().set_message(message);
    }

    fn lock(&self) -> MutexGuard<'_, RobotState> {
        // A panic while holding the lock cannot leave the state invalid: every
        // mutator is a plain field assignment.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
