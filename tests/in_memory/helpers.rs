//! Shared helpers for in-memory generic artifacts integration tests.

use std::sync::Arc;

use generic_artifacts_task::artifacts::{
    adapters::memory::{InMemoryCliRunner, InMemorySpecWorkspace, InMemoryTaskInputs},
    services::GenericArtifactsService,
};
use generic_artifacts_task::config::TaskSettings;
use mockable::DefaultClock;
use rstest::fixture;

/// Service wired to in-memory adapters.
pub type TestService =
    GenericArtifactsService<InMemoryCliRunner, InMemorySpecWorkspace, DefaultClock>;

/// Endpoint id used by every test connection.
pub const ENDPOINT_ID: &str = "rt-prod";

/// Working directory reported by the test host.
pub const WORKING_DIRECTORY: &str = "/home/vsts/work/1/s";

/// Test service together with the adapters it drives.
pub struct TestContext {
    /// Recording CLI runner.
    pub runner: Arc<InMemoryCliRunner>,
    /// Recording spec workspace.
    pub workspace: Arc<InMemorySpecWorkspace>,
    /// Service under test.
    pub service: TestService,
}

/// Provides a service over fresh in-memory adapters.
#[fixture]
pub fn context() -> TestContext {
    let runner = Arc::new(InMemoryCliRunner::new());
    let workspace = Arc::new(InMemorySpecWorkspace::new());
    let service = GenericArtifactsService::new(
        runner.clone(),
        workspace.clone(),
        Arc::new(DefaultClock),
        TaskSettings::default(),
    );
    TestContext {
        runner,
        workspace,
        service,
    }
}

/// Host inputs for a basic-auth connection with an inline file spec.
#[fixture]
pub fn pipeline() -> InMemoryTaskInputs {
    InMemoryTaskInputs::new()
        .with_variable("System.DefaultWorkingDirectory", WORKING_DIRECTORY)
        .with_variable("Release.ReleaseId", "77")
        .with_endpoint_url(ENDPOINT_ID, "https://repo.example.com/artifactory/")
        .with_endpoint_parameter(ENDPOINT_ID, "username", "deployer")
        .with_endpoint_parameter(ENDPOINT_ID, "password", "hunter2")
        .with_input("connection", ENDPOINT_ID)
        .with_input(
            "fileSpec",
            r#"{"files":[{"pattern":"libs-release-local/app/*.jar","target":"out/"}]}"#,
        )
}
