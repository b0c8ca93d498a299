//! The `Idle -> Running` transition.

use serde::Serialize;
use vigil_assert::{Asserter, Phase};
use vigil_config::{ConfigError, SettingsSource, ValidationSettings};
use vigil_core::{AssetStore, ContextRef, ObjectGraph, Violation};
use vigil_validate::{
    AssetValidationPipeline, MonitorReport, PipelineError, PipelineReport, SceneMonitor,
    ValidatorRegistry,
};

use crate::error::GateError;
use crate::prompt::{OperatorDecision, OperatorPrompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Idle,
    Running,
}

/// Outcome of a transition that reached the running state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionReport {
    pub state: GateState,
    /// False when the operator proceeded without settings.
    pub validated: bool,
    pub pipeline: Option<PipelineReport>,
    pub monitor: Option<MonitorReport>,
    /// Violation the operator chose to continue past.
    pub overridden: Option<Violation>,
}

/// Decides whether the application may enter the running state.
pub struct TransitionGate<'a> {
    settings: &'a dyn SettingsSource,
    store: &'a dyn AssetStore,
    graph: &'a dyn ObjectGraph,
    registry: &'a ValidatorRegistry,
    prompt: &'a dyn OperatorPrompt,
    monitor: SceneMonitor,
    state: GateState,
}

impl<'a> TransitionGate<'a> {
    #[must_use]
    pub const fn new(
        settings: &'a dyn SettingsSource,
        store: &'a dyn AssetStore,
        graph: &'a dyn ObjectGraph,
        registry: &'a ValidatorRegistry,
        prompt: &'a dyn OperatorPrompt,
        monitor: SceneMonitor,
    ) -> Self {
        Self {
            settings,
            store,
            graph,
            registry,
            prompt,
            monitor,
            state: GateState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    #[must_use]
    pub const fn monitor(&self) -> &SceneMonitor {
        &self.monitor
    }

    /// Attempt `Idle -> Running`.
    ///
    /// Settings are loaded fresh on every attempt. The asset pipeline and the
    /// scene activation pass run as one trapped scope; a violation from
    /// either, or one parked on the session by a validator that swallowed
    /// its own error, is put to the operator.
    ///
    /// # Errors
    ///
    /// - `GateError::Violation` when the operator aborts after a violation.
    /// - `GateError::ConfigurationMissing` when settings cannot be loaded and
    ///   the operator aborts.
    /// - `GateError::StoreUnavailable` when the store query fails. The
    ///   operator is not consulted.
    /// - `GateError::AlreadyRunning` when called after a successful start.
    pub fn request_start(
        &mut self,
        asserter: &Asserter<'_>,
    ) -> Result<TransitionReport, GateError> {
        if self.state == GateState::Running {
            return Err(GateError::AlreadyRunning);
        }

        let settings = match self.settings.load_settings() {
            Ok(settings) => settings,
            Err(error) => return self.proceed_without_settings(error, asserter),
        };

        let session = asserter.session();
        session.set_phase(Phase::EnteringRunning);
        let outcome = self.run_validation(&settings, asserter);
        let parked = session.take_suspension();

        let (pipeline, monitor, violation) = match outcome {
            Ok((pipeline, monitor)) => (Some(pipeline), Some(monitor), parked),
            Err(PipelineError::Violation(violation)) => (None, None, Some(violation)),
            Err(PipelineError::Store(error)) => {
                session.set_phase(Phase::Idle);
                return Err(GateError::StoreUnavailable(error));
            }
        };

        let mut report = TransitionReport {
            state: GateState::Running,
            validated: true,
            pipeline,
            monitor,
            overridden: None,
        };

        if let Some(violation) = violation {
            match self.prompt.on_violation(&violation) {
                OperatorDecision::Abort => {
                    tracing::warn!(context = %violation.context(), "transition aborted by operator");
                    self.monitor.deactivate(self.graph, asserter);
                    session.set_phase(Phase::Idle);
                    return Err(GateError::Violation(violation));
                }
                OperatorDecision::Continue => {
                    tracing::warn!(
                        context = %violation.context(),
                        "operator continued past violation"
                    );
                    asserter.report(&violation, false);
                    report.overridden = Some(violation);
                }
            }
        }

        self.enter_running(asserter);
        Ok(report)
    }

    fn run_validation(
        &mut self,
        settings: &ValidationSettings,
        asserter: &Asserter<'_>,
    ) -> Result<(PipelineReport, MonitorReport), PipelineError> {
        let pipeline = AssetValidationPipeline::new(self.store, self.registry)
            .run_on_store(settings, asserter)?;
        let monitor = self.monitor.activate(self.graph, self.registry, asserter)?;
        Ok((pipeline, monitor))
    }

    fn proceed_without_settings(
        &mut self,
        error: ConfigError,
        asserter: &Asserter<'_>,
    ) -> Result<TransitionReport, GateError> {
        match self.prompt.on_missing_configuration(&error) {
            OperatorDecision::Abort => {
                tracing::warn!(%error, "transition aborted: validation settings unavailable");
                Err(GateError::ConfigurationMissing(error))
            }
            OperatorDecision::Continue => {
                let notice = Violation::new(
                    format!("validation skipped: {error}"),
                    ContextRef::Unattributed,
                );
                asserter.report(&notice, false);
                self.enter_running(asserter);
                Ok(TransitionReport {
                    state: GateState::Running,
                    validated: false,
                    pipeline: None,
                    monitor: None,
                    overridden: None,
                })
            }
        }
    }

    fn enter_running(&mut self, asserter: &Asserter<'_>) {
        self.state = GateState::Running;
        asserter.session().set_phase(Phase::Running);
        tracing::info!(scene = self.graph.scene_name(), "entered running state");
    }
}
