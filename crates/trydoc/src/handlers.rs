//! Capability seams the dispatcher calls into.
//!
//! Parameter names are part of the contract: each one matches the argument
//! name declared for it in [`crate::commands`], which is what lets the
//! binder find it.

use std::{io::Write, path::Path};

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::options::StartOptions;

/// Where handlers write their text results.
pub type Output<'a> = &'a mut (dyn Write + Send);

/// Ambient state of one invocation.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Names from the root to the selected command, e.g. `["trydoc", "hosted"]`.
    pub command_path: Vec<String>,
    /// Fired when the process is asked to stop. Handlers may ignore it.
    pub cancellation: CancellationToken,
}

impl InvocationContext {
    pub fn is_hosted(&self) -> bool {
        self.command_path.last().is_some_and(|it| it == "hosted")
    }
}

#[async_trait]
pub trait StartServer: Send + Sync {
    /// Runs the server. Expected to keep going until it is cancelled.
    async fn start(&self, options: StartOptions, ctx: InvocationContext) -> anyhow::Result<()>;
}

#[async_trait]
pub trait TryGithub: Send + Sync {
    async fn try_github(&self, repo: &str, out: Output<'_>) -> anyhow::Result<()>;
}

#[async_trait]
pub trait Pack: Send + Sync {
    async fn pack(&self, pack_target: &Path, out: Output<'_>) -> anyhow::Result<()>;
}

#[async_trait]
pub trait Install: Send + Sync {
    async fn install(
        &self,
        package_name: &str,
        add_source: Option<&Path>,
        out: Output<'_>,
    ) -> anyhow::Result<()>;
}

#[async_trait]
pub trait Verify: Send + Sync {
    /// Returns the process exit code.
    async fn verify(&self, root_directory: &Path, out: Output<'_>) -> anyhow::Result<i32>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub package_name: String,
}

pub trait PackageRegistry: Send + Sync {
    /// One pending descriptor per package, in registry order.
    fn packages(&self) -> Vec<BoxFuture<'_, anyhow::Result<Package>>>;
}
