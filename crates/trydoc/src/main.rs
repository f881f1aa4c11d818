use std::io::{self, Write};

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use trydoc::{standalone, Dispatcher, Outcome};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env("TRYDOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cancellation = CancellationToken::new();
    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupted");
                cancellation.cancel();
            }
        }
    });

    let dispatcher = Dispatcher::new(standalone::handlers());
    let args = std::env::args_os().skip(1).collect();
    let mut stdout = io::stdout();
    let outcome = dispatcher.run(args, &mut stdout, cancellation).await;

    match &outcome {
        Outcome::Completed(_) => (),
        Outcome::ParseFailed(err) if err.is_help() => print!("{err}"),
        Outcome::ParseFailed(err) => eprintln!("{}", err.usage()),
        Outcome::HandlerFailed(err) => eprintln!("error: {err:#}"),
    }
    let _ = stdout.flush();
    std::process::exit(outcome.exit_code())
}
