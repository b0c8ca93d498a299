use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use serde::Serialize;
use vigil_assert::{Asserter, FeedbackOverlay, FileLogSink, Session};
use vigil_config::{MonitorConfig, ProjectSettings, config_path};
use vigil_core::Violation;
use vigil_gate::{
    FixedDecision, GateState, OperatorDecision, OperatorPrompt, TransitionGate, TransitionReport,
};
use vigil_validate::{SceneMonitor, ValidatorRegistry};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{CheckArgs, FailurePolicy};
use crate::host::{assets, scene};
use crate::output::output;
use crate::schema::{self, SchemaCache};
use crate::terminal::{LinePrompt, TerminalPresenter};

/// Violation log, relative to the config directory.
pub const LOG_FILE: &str = "validation.log";

#[derive(Debug, Serialize)]
struct CheckResponse {
    /// Entered the running state with nothing overridden or skipped.
    passed: bool,
    state: GateState,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<TransitionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<Violation>,
    log: String,
}

/// Handle `vigil check`.
pub fn handle(args: &CheckArgs, project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut schemas = SchemaCache::new(project_root);
    let store = assets::load_store(project_root, &mut schemas)?;
    let graph = scene::load_scene(project_root, args.scene.as_deref(), &mut schemas)?;
    let monitor_config =
        MonitorConfig::load(project_root).context("failed to load monitor configuration")?;

    let mut registry = ValidatorRegistry::new();
    schema::register(&mut registry);

    let log_path = config_path(project_root, LOG_FILE);
    let overlay = FeedbackOverlay::new(Rc::new(TerminalPresenter));
    let sink = FileLogSink::new(log_path.clone());
    let session = Session::authoring();
    let asserter = Asserter::new(&overlay, &sink, &session);

    let settings = ProjectSettings::new(project_root);
    let prompt = prompt_for(args.on_failure);
    let mut gate = TransitionGate::new(
        &settings,
        &store,
        &graph,
        &registry,
        prompt.as_ref(),
        SceneMonitor::new(monitor_config),
    );

    let result = gate.request_start(&asserter);
    let response = match &result {
        Ok(report) => CheckResponse {
            passed: report.validated && report.overridden.is_none(),
            state: gate.state(),
            report: Some(report.clone()),
            violation: None,
            log: log_path.display().to_string(),
        },
        Err(error) => CheckResponse {
            passed: false,
            state: gate.state(),
            report: None,
            violation: error.violation().cloned(),
            log: log_path.display().to_string(),
        },
    };
    output(&response, flags.format)?;

    result
        .map(|_| ())
        .context("check: transition into the running state was not allowed")
}

fn prompt_for(policy: FailurePolicy) -> Box<dyn OperatorPrompt> {
    match policy {
        FailurePolicy::Prompt => Box::new(LinePrompt::stdin()),
        FailurePolicy::Abort => Box::new(FixedDecision(OperatorDecision::Abort)),
        FailurePolicy::Continue => Box::new(FixedDecision(OperatorDecision::Continue)),
    }
}
