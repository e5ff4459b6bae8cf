//! In-memory adapters for tests and deterministic local runs.

mod cli;
mod inputs;
mod workspace;

pub use cli::InMemoryCliRunner;
pub use inputs::InMemoryTaskInputs;
pub use workspace::InMemorySpecWorkspace;
