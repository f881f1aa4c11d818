mod fakes;

use std::ffi::OsString;

use tokio_util::sync::CancellationToken;
use trydoc::{Dispatcher, Handlers, Outcome};

fn args(line: &str) -> Vec<OsString> {
    line.split_ascii_whitespace().map(OsString::from).collect()
}

/// Runs `line` and returns the outcome together with what was written.
async fn run(handlers: Handlers, line: &str) -> (Outcome, String) {
    let dispatcher = Dispatcher::new(handlers);
    let mut out = Vec::new();
    let outcome = dispatcher.run(args(line), &mut out, CancellationToken::new()).await;
    (outcome, String::from_utf8(out).unwrap())
}
