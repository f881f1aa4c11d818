use std::{env, process::Command};

/// Network name of the local machine, used as the default `--id` of
/// `hosted`.
///
/// `TRYDOC_MACHINE_ID` wins over the platform variables, then the `hostname`
/// command is asked. Never fails: `localhost` is the last resort.
pub fn machine_id() -> String {
    detect(|name| env::var(name).ok(), run_hostname)
}

fn detect(var: impl Fn(&str) -> Option<String>, hostname: impl FnOnce() -> Option<String>) -> String {
    let from_env = ["TRYDOC_MACHINE_ID", "HOSTNAME", "COMPUTERNAME"]
        .into_iter()
        .filter_map(|name| var(name))
        .map(|it| it.trim().to_string())
        .find(|it| !it.is_empty());
    if let Some(id) = from_env {
        return id;
    }

    match hostname().map(|it| it.trim().to_string()) {
        Some(id) if !id.is_empty() => id,
        _ => "localhost".to_string(),
    }
}

fn run_hostname() -> Option<String> {
    let out = Command::new("hostname").output().ok()?;
    if !out.status.success() {
        tracing::debug!(status = %out.status, "`hostname` failed");
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).into_owned())
}
