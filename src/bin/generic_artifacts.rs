//! Runs one generic artifacts task invocation under Azure Pipelines.
//!
//! Inputs are read from the agent environment. The outcome is written to
//! standard output as a `task.complete` logging command and mirrored in the
//! exit status; diagnostics go to standard error.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use generic_artifacts_task::artifacts::{
    adapters::{AzurePipelinesInputs, CapStdSpecWorkspace, ProcessCliRunner, task_complete_command},
    domain::{ExecutionOutcome, TaskStage},
    services::GenericArtifactsService,
};
use generic_artifacts_task::config::{
    DEFAULT_BUILD_NUMBER_OVERRIDE_VARIABLE, DEFAULT_CLI_PATH, DEFAULT_SERVER_ID_PREFIX,
    TaskSettings,
};
use mockable::DefaultClock;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

/// Upload, download and manage generic artifacts with the `JFrog` CLI.
#[derive(Parser, Debug)]
#[command(name = "generic-artifacts")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `jf` executable
    #[arg(long, env = "JFROG_CLI_PATH", default_value = DEFAULT_CLI_PATH)]
    cli_path: Utf8PathBuf,

    /// Prefix of the transient server ids registered with the CLI
    #[arg(
        long,
        env = "GENERIC_ARTIFACTS_SERVER_ID_PREFIX",
        default_value = DEFAULT_SERVER_ID_PREFIX
    )]
    server_id_prefix: String,

    /// Host variable whose value overrides the requested build number
    #[arg(
        long,
        env = "GENERIC_ARTIFACTS_BUILD_NUMBER_VARIABLE",
        default_value = DEFAULT_BUILD_NUMBER_OVERRIDE_VARIABLE
    )]
    build_number_variable: String,

    /// Report `Download Succeeded.` for every successful operation
    #[arg(long)]
    legacy_success_message: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

const fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn task_settings(args: Args) -> TaskSettings {
    TaskSettings::new()
        .with_cli_path(args.cli_path)
        .with_server_id_prefix(args.server_id_prefix)
        .with_build_number_override_variable(args.build_number_variable)
        .with_legacy_success_message(args.legacy_success_message)
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(settings: TaskSettings) -> ExecutionOutcome {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "failed to create Tokio runtime");
            return ExecutionOutcome::failure(
                TaskStage::Configuration,
                format!("failed to create async runtime: {err}"),
            );
        }
    };

    let service = GenericArtifactsService::new(
        Arc::new(ProcessCliRunner::new()),
        Arc::new(CapStdSpecWorkspace::new()),
        Arc::new(DefaultClock),
        settings,
    );
    let inputs = AzurePipelinesInputs::from_env();
    runtime.block_on(service.run(&inputs))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(log_level(args.verbose, args.quiet));

    let outcome = run(task_settings(args));

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = writeln!(stdout, "{}", task_complete_command(&outcome)) {
        error!(error = %err, "failed to report task outcome");
        return ExitCode::FAILURE;
    }

    if outcome.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
