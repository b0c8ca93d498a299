use std::cell::{Cell, RefCell};

use serde::Serialize;
use vigil_core::Violation;

/// Where the process is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Authoring/editor mode: the gate guards entry into Running.
    Authoring,
    /// A shipped build: always simulating, no gate.
    Standalone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    /// The gate's validation pass is in progress.
    EnteringRunning,
    Running,
}

/// Process-level execution state shared by the facade, monitor, and gate.
///
/// Single-threaded: interior mutability only, never shared across threads.
#[derive(Debug)]
pub struct Session {
    mode: ExecutionMode,
    phase: Cell<Phase>,
    active_scenes: RefCell<Vec<String>>,
    suspended: RefCell<Option<Violation>>,
}

impl Session {
    #[must_use]
    pub fn new(mode: ExecutionMode) -> Self {
        let phase = match mode {
            ExecutionMode::Authoring => Phase::Idle,
            ExecutionMode::Standalone => Phase::Running,
        };
        Self {
            mode,
            phase: Cell::new(phase),
            active_scenes: RefCell::new(Vec::new()),
            suspended: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn authoring() -> Self {
        Self::new(ExecutionMode::Authoring)
    }

    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn set_phase(&self, phase: Phase) {
        tracing::debug!(from = ?self.phase.get(), to = ?phase, "session phase change");
        self.phase.set(phase);
    }

    /// True while the host is actively simulating.
    #[must_use]
    pub fn is_simulating(&self) -> bool {
        self.mode == ExecutionMode::Standalone || self.phase.get() == Phase::Running
    }

    /// Record a scene as loaded. Loading an already active scene is a no-op.
    pub fn open_scene(&self, name: impl Into<String>) {
        let name = name.into();
        let mut scenes = self.active_scenes.borrow_mut();
        if !scenes.contains(&name) {
            scenes.push(name);
        }
    }

    pub fn close_scene(&self, name: &str) {
        self.active_scenes.borrow_mut().retain(|s| s != name);
    }

    #[must_use]
    pub fn active_scenes(&self) -> Vec<String> {
        self.active_scenes.borrow().clone()
    }

    /// Park `violation` as the reason to suspend a pending transition.
    ///
    /// Only takes effect in authoring mode while the gate pass is running.
    /// The first parked violation wins. Returns whether it was parked.
    pub fn suspend_transition(&self, violation: &Violation) -> bool {
        if self.mode != ExecutionMode::Authoring || self.phase.get() != Phase::EnteringRunning {
            return false;
        }
        let mut slot = self.suspended.borrow_mut();
        if slot.is_none() {
            *slot = Some(violation.clone());
        }
        true
    }

    #[must_use]
    pub fn is_transition_suspended(&self) -> bool {
        self.suspended.borrow().is_some()
    }

    /// Clear the latch, returning the violation that set it.
    pub fn take_suspension(&self) -> Option<Violation> {
        self.suspended.borrow_mut().take()
    }
}
