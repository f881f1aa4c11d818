//! Routes one parsed invocation to exactly one handler.

use std::{ffi::OsString, io::Write};

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use trydoc_flags::{bind, Cmd, Values};

use crate::{
    commands::{command_tree, Command},
    handlers::{Install, InvocationContext, Output, Pack, PackageRegistry, StartServer, TryGithub, Verify},
    options::{GithubArgs, InstallArgs, PackArgs, StartOptions, VerifyArgs},
};

/// The handler implementations, injected once at start-up.
pub struct Handlers {
    pub start: Box<dyn StartServer>,
    pub github: Box<dyn TryGithub>,
    pub pack: Box<dyn Pack>,
    pub install: Box<dyn Install>,
    pub verify: Box<dyn Verify>,
    pub registry: Box<dyn PackageRegistry>,
}

/// How an invocation ended.
#[derive(Debug)]
pub enum Outcome {
    /// The handler returned; carries the exit code it asked for.
    Completed(i32),
    /// Parsing or binding failed, or help was requested. No handler ran.
    ParseFailed(trydoc_flags::Error),
    HandlerFailed(anyhow::Error),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed(code) => *code,
            Outcome::ParseFailed(err) => err.exit_code(),
            Outcome::HandlerFailed(_) => 1,
        }
    }
}

/// A command bound to its typed arguments, ready to be dispatched.
#[derive(Debug)]
enum Call {
    Start(StartOptions),
    ListPackages,
    Github(GithubArgs),
    Pack(PackArgs),
    Install(InstallArgs),
    Verify(VerifyArgs),
}

pub struct Dispatcher {
    tree: Cmd<Command>,
    handlers: Handlers,
}

impl Dispatcher {
    pub fn new(handlers: Handlers) -> Dispatcher {
        Dispatcher { tree: command_tree(), handlers }
    }

    /// Parses `args` (without the program name), binds them and awaits the
    /// selected handler.
    pub async fn run(
        &self,
        args: Vec<OsString>,
        out: Output<'_>,
        cancellation: CancellationToken,
    ) -> Outcome {
        let invocation = match trydoc_flags::parse(&self.tree, args) {
            Ok(it) => it,
            Err(err) => return Outcome::ParseFailed(err),
        };
        let call = match bind_call(invocation.handler, &invocation.values) {
            Ok(it) => it,
            Err(err) => return Outcome::ParseFailed(err),
        };

        let command = invocation.path.join(" ");
        tracing::info!(%command, "dispatching");
        let ctx = InvocationContext { command_path: invocation.path, cancellation };
        match self.call(call, ctx, out).await {
            Ok(code) => Outcome::Completed(code),
            Err(err) => {
                tracing::warn!(%command, error = %format!("{err:#}"), "handler failed");
                Outcome::HandlerFailed(err)
            }
        }
    }

    async fn call(&self, call: Call, ctx: InvocationContext, out: Output<'_>) -> anyhow::Result<i32> {
        match call {
            Call::Start(options) => self.handlers.start.start(options, ctx).await?,
            Call::ListPackages => self.list_packages(out).await?,
            Call::Github(args) => self.handlers.github.try_github(&args.repo, out).await?,
            Call::Pack(args) => self.handlers.pack.pack(&args.pack_target, out).await?,
            Call::Install(args) => {
                self.handlers.install.install(&args.package_name, args.add_source.as_deref(), out).await?
            }
            Call::Verify(args) => return self.handlers.verify.verify(&args.root_directory, out).await,
        }
        Ok(0)
    }

    /// Writes one line per registry entry, awaiting each entry before the
    /// next one is polled.
    async fn list_packages(&self, out: Output<'_>) -> anyhow::Result<()> {
        for entry in self.handlers.registry.packages() {
            let package = entry.await?;
            writeln!(out, "{}", package.package_name).context("failed to write package name")?;
        }
        Ok(())
    }
}

fn bind_call(command: Command, values: &Values) -> trydoc_flags::Result<Call> {
    let res = match command {
        Command::Start => Call::Start(bind(values)?),
        Command::ListPackages => Call::ListPackages,
        Command::Github => Call::Github(bind(values)?),
        Command::Pack => Call::Pack(bind(values)?),
        Command::Install => Call::Install(bind(values)?),
        Command::Verify => Call::Verify(bind(values)?),
    };
    Ok(res)
}
