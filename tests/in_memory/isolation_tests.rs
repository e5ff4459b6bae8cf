//! Server id isolation across invocations sharing one CLI store.

use super::helpers::{TestContext, context, pipeline};
use generic_artifacts_task::artifacts::adapters::memory::InMemoryTaskInputs;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_invocations_use_fresh_ids(context: TestContext, pipeline: InMemoryTaskInputs) {
    let inputs = pipeline.with_input("command", "Copy");

    for _ in 0..3 {
        let outcome = context.service.run(&inputs).await;
        assert!(outcome.succeeded());
    }

    let commands = context
        .runner
        .repository_commands()
        .expect("commands should be readable");
    let mut ids: Vec<&str> = commands
        .iter()
        .filter_map(|command| command.flag_value("server-id"))
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.starts_with("generic_77_")));
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3, "every invocation should register its own id");
    assert!(
        context
            .runner
            .configured_servers()
            .expect("store should be readable")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_invocations_do_not_share_profiles(
    context: TestContext,
    pipeline: InMemoryTaskInputs,
) {
    let upload = pipeline.clone().with_input("command", "Upload");
    let download = pipeline.with_input("command", "Download");

    let (first, second) = tokio::join!(
        context.service.run(&upload),
        context.service.run(&download)
    );

    assert!(first.succeeded());
    assert!(second.succeeded());
    assert!(
        context
            .runner
            .configured_servers()
            .expect("store should be readable")
            .is_empty()
    );
}
