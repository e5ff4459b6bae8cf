//! Domain model for generic artifact operations.
//!
//! The domain models the closed set of operations, their validated option
//! values, the structured command that the CLI will receive, and the
//! per-invocation identifiers and outcome. Nothing in here performs I/O.

mod command;
mod connection;
mod error;
mod ids;
mod operation;
mod outcome;
pub mod params;
mod spec_file;

pub use command::{CommandArg, CommandSpec};
pub use connection::{ConnectionDetails, Credentials};
pub use error::{InputError, ParseOperationKindError};
pub use ids::ServerId;
pub use operation::{
    BuildInfo, DebianTriple, DefinitionOptions, DownloadOptions, DryRunOptions, Operation,
    OperationKind, PropertiesOptions, UploadOptions, normalize_download_path,
};
pub use outcome::{ExecutionOutcome, TaskStage};
pub use spec_file::{CommonOptions, FileSpec, SpecSource, spec_file_name};
