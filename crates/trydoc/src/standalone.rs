//! Handlers wired in when `trydoc` runs on its own, without a host that
//! provides the real server, packaging and verification services.

use std::path::Path;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::{
    dispatch::Handlers,
    handlers::{
        Install, InvocationContext, Output, Pack, Package, PackageRegistry, StartServer, TryGithub, Verify,
    },
    options::StartOptions,
};

pub fn handlers() -> Handlers {
    Handlers {
        start: Box::new(IdleServer),
        github: Box::new(Unavailable),
        pack: Box::new(Unavailable),
        install: Box::new(Unavailable),
        verify: Box::new(Unavailable),
        registry: Box::new(EmptyRegistry),
    }
}

/// Accepts the start options and waits for cancellation.
struct IdleServer;

#[async_trait]
impl StartServer for IdleServer {
    async fn start(&self, options: StartOptions, ctx: InvocationContext) -> anyhow::Result<()> {
        tracing::info!(hosted = ctx.is_hosted(), ?options, "server started, waiting for shutdown");
        ctx.cancellation.cancelled().await;
        tracing::info!("server stopped");
        Ok(())
    }
}

struct Unavailable;

fn unavailable(operation: &str) -> anyhow::Error {
    anyhow::anyhow!("`{operation}` is not available in this build")
}

#[async_trait]
impl TryGithub for Unavailable {
    async fn try_github(&self, _repo: &str, _out: Output<'_>) -> anyhow::Result<()> {
        Err(unavailable("github"))
    }
}

#[async_trait]
impl Pack for Unavailable {
    async fn pack(&self, _pack_target: &Path, _out: Output<'_>) -> anyhow::Result<()> {
        Err(unavailable("pack"))
    }
}

#[async_trait]
impl Install for Unavailable {
    async fn install(
        &self,
        _package_name: &str,
        _add_source: Option<&Path>,
        _out: Output<'_>,
    ) -> anyhow::Result<()> {
        Err(unavailable("install"))
    }
}

#[async_trait]
impl Verify for Unavailable {
    async fn verify(&self, _root_directory: &Path, _out: Output<'_>) -> anyhow::Result<i32> {
        Err(unavailable("verify"))
    }
}

struct EmptyRegistry;

impl PackageRegistry for EmptyRegistry {
    fn packages(&self) -> Vec<BoxFuture<'_, anyhow::Result<Package>>> {
        Vec::new()
    }
}
