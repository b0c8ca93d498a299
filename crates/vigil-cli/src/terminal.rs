//! Terminal stand-ins for the overlay surface and the operator dialog.

use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, StdinLock, Write};

use vigil_config::ConfigError;
use vigil_core::{Presenter, Violation};
use vigil_gate::{OperatorDecision, OperatorPrompt};

const RULE: &str = "----------------------------------------";

/// Prints overlay panels to stderr.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show_message(&self, text: &str) {
        eprintln!("{RULE}\n{text}\n{RULE}");
    }

    fn show_failure(&self, text: &str, active_contexts: &[String]) {
        eprintln!("{RULE}\nVALIDATION FAILURE\n\n{text}");
        if !active_contexts.is_empty() {
            eprintln!("\nactive scenes: {}", active_contexts.join(", "));
        }
        eprintln!("{RULE}");
    }
}

/// Asks the operator on a line-oriented input. Anything but an explicit
/// "continue" aborts, including end of input.
pub struct LinePrompt<R> {
    input: RefCell<R>,
}

impl LinePrompt<StdinLock<'static>> {
    pub fn stdin() -> Self {
        if !io::stdin().is_terminal() {
            tracing::debug!("stdin is not a terminal; prompts read piped input");
        }
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> LinePrompt<R> {
    pub const fn new(input: R) -> Self {
        Self {
            input: RefCell::new(input),
        }
    }

    fn ask(&self, question: &str) -> OperatorDecision {
        eprint!("{question} [c]ontinue / [a]bort: ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => parse_decision(&answer),
            Err(error) => {
                tracing::warn!(%error, "failed to read operator answer; aborting");
                OperatorDecision::Abort
            }
        }
    }
}

impl<R: BufRead> OperatorPrompt for LinePrompt<R> {
    fn on_violation(&self, violation: &Violation) -> OperatorDecision {
        self.ask(&format!(
            "Validation failed: {violation}\nEnter the running state anyway?"
        ))
    }

    fn on_missing_configuration(&self, error: &ConfigError) -> OperatorDecision {
        self.ask(&format!(
            "{error}\nRun 'vigil init' to create settings. Enter the running state without validation?"
        ))
    }
}

fn parse_decision(answer: &str) -> OperatorDecision {
    match answer.trim().to_ascii_lowercase().as_str() {
        "c" | "continue" => OperatorDecision::Continue,
        _ => OperatorDecision::Abort,
    }
}
