use std::env;

use trydoc_flags::{Arg, Cmd, Flag, Ty, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Start,
    ListPackages,
    Github,
    Pack,
    Install,
    Verify,
}

pub fn tree() -> Cmd<Handler> {
    Cmd::root("trydoc")
        .doc("Try out documentation.")
        .arg(
            Arg::new("root_directory", Ty::Dir)
                .doc("Directory to serve.")
                .default_value(Value::Path(".".into()))
                .must_exist(),
        )
        .flag(Flag::new(&["--add-source"], Ty::Dir).doc("Extra package source.").must_exist())
        .flag(Flag::new(&["--uri"], Ty::Uri).doc("Uri to open."))
        .handler(Handler::Start)
        .subcommand(
            Cmd::new("hosted")
                .hidden()
                .flag(Flag::new(&["--id"], Ty::String).default_value(Value::String("test-machine".into())))
                .flag(Flag::switch(&["--production"]))
                .flag(Flag::switch(&["--language-service"]))
                .flag(Flag::new(&["-k", "--key"], Ty::String))
                .flag(Flag::new(&["--ai-key", "--application-insights-key"], Ty::String))
                .flag(Flag::new(&["--region-id"], Ty::String))
                .flag(Flag::switch(&["--log-to-file"]))
                .handler(Handler::Start),
        )
        .subcommand(Cmd::new("list-packages").doc("List installed packages.").handler(Handler::ListPackages))
        .subcommand(Cmd::new("github").arg(Arg::new("repo", Ty::String)).handler(Handler::Github))
        .subcommand(
            Cmd::new("pack")
                .doc("Create a package.")
                .arg(Arg::new("pack_target", Ty::Dir).doc("Directory to pack.").must_exist())
                .handler(Handler::Pack),
        )
        .subcommand(
            Cmd::new("install")
                .arg(Arg::new("package_name", Ty::String))
                .flag(Flag::new(&["--add-source"], Ty::Dir).must_exist())
                .handler(Handler::Install),
        )
        .subcommand(
            Cmd::new("verify")
                .arg(Arg::new("root_directory", Ty::Dir).default_factory(cwd).must_exist())
                .handler(Handler::Verify),
        )
        .subcommand(Cmd::new("registry").doc("Registry maintenance.").subcommand(
            Cmd::new("prune").handler(Handler::ListPackages),
        ))
}

fn cwd() -> std::io::Result<Value> {
    env::current_dir().map(Value::Path)
}
