//! Application services for generic artifact operations.

mod dispatch;
mod lifecycle;
mod orchestrator;
mod request;

pub use dispatch::build_command;
pub use lifecycle::{ServerLease, ServerLifecycleError, ServerLifecycleResult, ServerLifecycleService};
pub use orchestrator::{GenericArtifactsService, GenericTaskError, GenericTaskResult};
pub use request::{InvocationContext, TaskRequest, parse_context, parse_request};
