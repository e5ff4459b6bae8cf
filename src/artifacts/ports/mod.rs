//! Port contracts for generic artifact operations.
//!
//! Ports define infrastructure-agnostic interfaces to the host pipeline,
//! the CLI process, and the working-directory filesystem.

mod cli;
mod inputs;
mod workspace;

pub use cli::{CliInvocation, CliOutput, CliRunner, CliRunnerError, CliRunnerResult};
#[cfg(test)]
pub use cli::MockCliRunner;
pub use inputs::TaskInputs;
pub use workspace::{SpecWorkspace, SpecWorkspaceError, SpecWorkspaceResult};
