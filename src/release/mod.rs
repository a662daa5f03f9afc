//! Release workflows: name parsing, resolution, conditional creation and
//! state polling.

pub mod create;
pub mod lookup;
pub mod name;
pub mod resolver;
pub mod wait;

pub use create::{CreateOptions, CreateOutcome, CreateResult, create_release};
pub use name::{QualifiedReleaseName, ReleaseRef};
pub use resolver::Resolver;
pub use wait::{UntilMode, WaitSpec, wait_for};

/// Non-fatal notices collected during a workflow.
///
/// Workflows return these instead of logging, so callers decide how to
/// surface them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
