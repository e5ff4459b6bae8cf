//! Composition of the repository command for a validated request.

use super::request::TaskRequest;
use crate::artifacts::domain::{CommandArg, CommandSpec, ServerId, params};
use crate::config::TaskSettings;
use camino::Utf8Path;

/// Builds the `jf rt ...` command for a request.
///
/// Tokens are composed in a fixed order: sub-command keywords, the
/// operation's own fragments, `--project` and `--server-id`, then for
/// file-spec operations `--spec` followed by the spec-associated flags.
/// `spec_path` is ignored for resolve-by-definition requests.
#[must_use]
pub fn build_command(
    settings: &TaskSettings,
    request: &TaskRequest,
    server_id: &ServerId,
    spec_path: Option<&Utf8Path>,
) -> CommandSpec {
    let operation = request.operation();
    let command = CommandSpec::new(settings.cli_path().as_str())
        .keywords(operation.kind().sub_command())
        .args(operation.fragments())
        .arg_opt(params::value_if(request.project(), "project"))
        .arg(CommandArg::value("server-id", server_id.as_str()));

    let Some(common) = request.common() else {
        return command;
    };
    command
        .arg_opt(spec_path.map(|path| CommandArg::value("spec", path.as_str())))
        .arg_opt(params::value_if(common.spec_vars.as_deref(), "spec-vars"))
        .arg_opt(params::switch_if(common.fail_no_op, "fail-no-op"))
        .arg_opt(params::switch_if(common.insecure_tls, "insecure-tls"))
}
