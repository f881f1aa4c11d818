use std::{
    path::Path,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use futures_util::{future::BoxFuture, FutureExt};
use trydoc::{
    handlers::{Install, Output, Pack, Package, PackageRegistry, StartServer, TryGithub, Verify},
    Handlers, InvocationContext, StartOptions,
};

/// Records every handler call as a line of text.
#[derive(Clone, Default)]
pub struct Recorder {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub verify_code: i32,
    pub fail: bool,
    pub started: Arc<Mutex<Vec<(StartOptions, Vec<String>)>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn handlers(&self, registry: impl PackageRegistry + 'static) -> Handlers {
        Handlers {
            start: Box::new(self.clone()),
            github: Box::new(self.clone()),
            pack: Box::new(self.clone()),
            install: Box::new(self.clone()),
            verify: Box::new(self.clone()),
            registry: Box::new(registry),
        }
    }

    fn record(&self, call: String) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            anyhow::bail!("boom");
        }
        Ok(())
    }
}

#[async_trait]
impl StartServer for Recorder {
    async fn start(&self, options: StartOptions, ctx: InvocationContext) -> anyhow::Result<()> {
        self.started.lock().unwrap().push((options, ctx.command_path));
        self.record("start".to_string())
    }
}

#[async_trait]
impl TryGithub for Recorder {
    async fn try_github(&self, repo: &str, out: Output<'_>) -> anyhow::Result<()> {
        writeln!(out, "trying {repo}")?;
        self.record(format!("github {repo}"))
    }
}

#[async_trait]
impl Pack for Recorder {
    async fn pack(&self, pack_target: &Path, _out: Output<'_>) -> anyhow::Result<()> {
        self.record(format!("pack {}", pack_target.display()))
    }
}

#[async_trait]
impl Install for Recorder {
    async fn install(&self, package_name: &str, add_source: Option<&Path>, _out: Output<'_>) -> anyhow::Result<()> {
        self.record(format!("install {package_name} {:?}", add_source))
    }
}

#[async_trait]
impl Verify for Recorder {
    async fn verify(&self, root_directory: &Path, _out: Output<'_>) -> anyhow::Result<i32> {
        self.record(format!("verify {}", root_directory.display()))?;
        Ok(self.verify_code)
    }
}

/// A registry whose entries resolve after a delay and log when they are
/// polled and when they finish.
#[derive(Clone, Default)]
pub struct SlowRegistry {
    pub entries: Vec<(&'static str, u64)>,
    pub broken: Option<usize>,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl SlowRegistry {
    pub fn new(entries: &[(&'static str, u64)]) -> SlowRegistry {
        SlowRegistry { entries: entries.to_vec(), ..SlowRegistry::default() }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl PackageRegistry for SlowRegistry {
    fn packages(&self) -> Vec<BoxFuture<'_, anyhow::Result<Package>>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, &(name, delay_ms))| {
                let log = Arc::clone(&self.log);
                let broken = self.broken == Some(idx);
                async move {
                    log.lock().unwrap().push(format!("begin {name}"));
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    log.lock().unwrap().push(format!("end {name}"));
                    if broken {
                        anyhow::bail!("registry entry `{name}` is corrupt");
                    }
                    Ok(Package { package_name: name.to_string() })
                }
                .boxed()
            })
            .collect()
    }
}
