//! Adapter implementations for generic artifact ports.

pub mod memory;

mod azure;
mod process;
mod workspace;

pub use azure::{AzurePipelinesInputs, task_complete_command};
pub use process::ProcessCliRunner;
pub use workspace::CapStdSpecWorkspace;
