//! Registration and removal of transient CLI server profiles.

use super::request::InvocationContext;
use crate::artifacts::{
    domain::{CommandArg, CommandSpec, Credentials, ServerId},
    ports::{CliInvocation, CliRunner, CliRunnerError},
};
use crate::config::TaskSettings;
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while managing a server profile.
#[derive(Debug, Clone, Error)]
pub enum ServerLifecycleError {
    /// `config add` failed.
    #[error("failed registering server {server_id}: {source}")]
    Register {
        /// Id that was being registered.
        server_id: ServerId,
        /// Underlying CLI failure.
        source: CliRunnerError,
    },

    /// `config remove` failed.
    #[error("failed removing server {server_id}: {source}")]
    Unregister {
        /// Id that was being removed.
        server_id: ServerId,
        /// Underlying CLI failure.
        source: CliRunnerError,
    },
}

/// Result type for lifecycle operations.
pub type ServerLifecycleResult<T> = Result<T, ServerLifecycleError>;

/// A registered server profile that must be handed back to
/// [`ServerLifecycleService::unregister`].
#[derive(Debug)]
#[must_use = "a registered server must be unregistered"]
pub struct ServerLease {
    server_id: ServerId,
    working_directory: Utf8PathBuf,
    released: bool,
}

impl ServerLease {
    /// Returns the registered id.
    #[must_use]
    pub const fn server_id(&self) -> &ServerId {
        &self.server_id
    }
}

impl Drop for ServerLease {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                server_id = %self.server_id,
                "server lease dropped without unregistering"
            );
        }
    }
}

/// Creates and removes per-invocation server profiles in the CLI
/// configuration store.
#[derive(Clone)]
pub struct ServerLifecycleService<R, C>
where
    R: CliRunner,
    C: Clock + Send + Sync,
{
    runner: Arc<R>,
    clock: Arc<C>,
    settings: Arc<TaskSettings>,
}

impl<R, C> ServerLifecycleService<R, C>
where
    R: CliRunner,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(runner: Arc<R>, clock: Arc<C>, settings: Arc<TaskSettings>) -> Self {
        Self {
            runner,
            clock,
            settings,
        }
    }

    /// Registers a freshly generated server id for the context's connection.
    ///
    /// When registration fails a best-effort removal of the same id runs,
    /// since the CLI may have persisted partial state. Its result is only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`ServerLifecycleError::Register`] when `config add` fails.
    pub async fn register(
        &self,
        context: &InvocationContext,
    ) -> ServerLifecycleResult<ServerLease> {
        let server_id = ServerId::generate(
            self.settings.server_id_prefix(),
            context.run_id(),
            &*self.clock,
        );
        let invocation = self.add_invocation(&server_id, context);

        info!(server_id = %server_id, "registering server");
        if let Err(source) = self.runner.run(&invocation).await {
            if let Err(err) = self
                .remove(&server_id, context.working_directory())
                .await
            {
                debug!(server_id = %server_id, error = %err, "partial registration removal failed");
            }
            return Err(ServerLifecycleError::Register { server_id, source });
        }

        Ok(ServerLease {
            server_id,
            working_directory: context.working_directory().to_owned(),
            released: false,
        })
    }

    /// Removes the leased server id. The lease is consumed whether or not
    /// removal succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ServerLifecycleError::Unregister`] when `config remove`
    /// fails.
    pub async fn unregister(&self, mut lease: ServerLease) -> ServerLifecycleResult<()> {
        lease.released = true;
        info!(server_id = %lease.server_id, "unregistering server");
        self.remove(&lease.server_id, &lease.working_directory)
            .await
            .map_err(|source| ServerLifecycleError::Unregister {
                server_id: lease.server_id.clone(),
                source,
            })
    }

    async fn remove(
        &self,
        server_id: &ServerId,
        working_directory: &Utf8Path,
    ) -> Result<(), CliRunnerError> {
        let command = CommandSpec::new(self.settings.cli_path().as_str())
            .keywords("config remove")
            .arg(CommandArg::positional(server_id.as_str()))
            .arg(CommandArg::switch("quiet"));
        self.runner
            .run(&CliInvocation::new(command, working_directory))
            .await
            .map(|_| ())
    }

    /// Builds `config add`. The password or token is read by the CLI from
    /// standard input and never appears in the argument list.
    fn add_invocation(&self, server_id: &ServerId, context: &InvocationContext) -> CliInvocation {
        let connection = context.connection();
        let (credential_args, secret) = match connection.credentials() {
            Credentials::UsernamePassword { username, password } => (
                vec![
                    CommandArg::value("user", username),
                    CommandArg::switch("password-stdin"),
                ],
                password,
            ),
            Credentials::AccessToken(token) => {
                (vec![CommandArg::switch("access-token-stdin")], token)
            }
        };
        let command = CommandSpec::new(self.settings.cli_path().as_str())
            .keywords("config add")
            .arg(CommandArg::positional(server_id.as_str()))
            .arg(CommandArg::value("artifactory-url", connection.url()))
            .arg(CommandArg::value("interactive", "false"))
            .args(credential_args);
        CliInvocation::new(command, context.working_directory()).with_stdin(secret.as_str())
    }
}
