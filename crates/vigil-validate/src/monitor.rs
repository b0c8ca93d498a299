//! Validation of live scene entities.

use std::collections::HashSet;

use serde::Serialize;
use vigil_assert::{Asserter, ExecutionMode, assertions_enabled};
use vigil_config::MonitorConfig;
use vigil_core::{ContextRef, ObjectGraph, ObjectId, SceneRole, Violation};

use crate::registry::ValidatorRegistry;

/// Per-scene dedup state. Reset on every scene activation.
#[derive(Debug, Default)]
pub struct RunnerState {
    seen_entities: HashSet<ObjectId>,
    allow_repeated_validation: bool,
    rerun_on_structural_change: bool,
}

impl RunnerState {
    fn from_config(config: &MonitorConfig) -> Self {
        Self {
            seen_entities: HashSet::new(),
            allow_repeated_validation: config.allow_repeated_validation,
            rerun_on_structural_change: config.rerun_on_structural_change,
        }
    }

    #[must_use]
    pub fn has_seen(&self, id: &ObjectId) -> bool {
        self.seen_entities.contains(id)
    }

    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen_entities.len()
    }

    #[must_use]
    pub const fn allow_repeated_validation(&self) -> bool {
        self.allow_repeated_validation
    }

    #[must_use]
    pub const fn rerun_on_structural_change(&self) -> bool {
        self.rerun_on_structural_change
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorReport {
    pub builtins_checked: usize,
    pub entities_validated: usize,
    pub entities_skipped: usize,
    pub parts_validated: usize,
}

/// Runs entity validation for one active scene.
pub struct SceneMonitor {
    config: MonitorConfig,
    state: RunnerState,
}

impl SceneMonitor {
    #[must_use]
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            state: RunnerState::from_config(&config),
            config,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &RunnerState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Start a fresh dedup window.
    pub fn reset(&mut self) {
        self.state = RunnerState::from_config(&self.config);
    }

    /// Scene activation: reset, mark the scene active, validate.
    ///
    /// # Errors
    ///
    /// Returns the first violation raised by a built-in check or an entity.
    pub fn activate(
        &mut self,
        graph: &dyn ObjectGraph,
        registry: &ValidatorRegistry,
        asserter: &Asserter<'_>,
    ) -> Result<MonitorReport, Violation> {
        self.reset();
        asserter.session().open_scene(graph.scene_name());
        tracing::debug!(scene = graph.scene_name(), "scene activated");
        self.validate_active_scene(graph, registry, asserter)
    }

    /// Scene teardown: the scene stops being active and its dedup window ends.
    pub fn deactivate(&mut self, graph: &dyn ObjectGraph, asserter: &Asserter<'_>) {
        asserter.session().close_scene(graph.scene_name());
        self.reset();
    }

    /// Re-validate after the live graph gained or lost entities.
    ///
    /// Only runs in authoring mode with `rerun_on_structural_change` on.
    /// Returns `Ok(None)` when it did not run.
    ///
    /// # Errors
    ///
    /// Returns the first violation raised during the re-run.
    pub fn on_structural_change(
        &mut self,
        graph: &dyn ObjectGraph,
        registry: &ValidatorRegistry,
        asserter: &Asserter<'_>,
    ) -> Result<Option<MonitorReport>, Violation> {
        if asserter.session().mode() != ExecutionMode::Authoring
            || !self.state.rerun_on_structural_change
        {
            return Ok(None);
        }
        self.validate_active_scene(graph, registry, asserter).map(Some)
    }

    /// Run built-in checks, then every assertable live entity.
    ///
    /// # Errors
    ///
    /// Returns the first violation; nothing after it is validated.
    pub fn validate_active_scene(
        &mut self,
        graph: &dyn ObjectGraph,
        registry: &ValidatorRegistry,
        asserter: &Asserter<'_>,
    ) -> Result<MonitorReport, Violation> {
        let mut report = MonitorReport {
            builtins_checked: self.check_builtins(graph, asserter)?,
            ..MonitorReport::default()
        };

        let simulating = asserter.session().is_simulating();
        for entity in graph.all_live() {
            if !registry.is_assertable(entity) {
                continue;
            }
            if !self.state.allow_repeated_validation && self.state.has_seen(entity.id()) {
                report.entities_skipped += 1;
                continue;
            }

            let context = ContextRef::entity(entity.id().clone(), entity.name());
            report.parts_validated += registry.validate_object(entity, asserter, &context)?;
            report.entities_validated += 1;

            if simulating {
                self.state.seen_entities.insert(entity.id().clone());
            }
        }

        tracing::debug!(
            scene = graph.scene_name(),
            validated = report.entities_validated,
            skipped = report.entities_skipped,
            "scene validation finished"
        );
        Ok(report)
    }

    fn check_builtins(
        &self,
        graph: &dyn ObjectGraph,
        asserter: &Asserter<'_>,
    ) -> Result<usize, Violation> {
        let context = ContextRef::scene(graph.scene_name());
        let mut checked = 0;
        for role in self.config.builtins.enabled_roles() {
            check_singleton(graph, role, asserter, &context)?;
            checked += 1;
        }
        Ok(checked)
    }
}

fn check_singleton(
    graph: &dyn ObjectGraph,
    role: SceneRole,
    asserter: &Asserter<'_>,
    context: &ContextRef,
) -> Result<(), Violation> {
    if !assertions_enabled() {
        return Ok(());
    }
    let found = graph.with_role(role).len();
    if found == 1 {
        return Ok(());
    }
    asserter.assert_true(
        false,
        context,
        &format!(
            "scene '{}' must contain exactly one {} (found {found})",
            graph.scene_name(),
            role.label()
        ),
    )
}
