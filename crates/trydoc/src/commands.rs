//! The command tree of `trydoc`.

use std::{env, io};

use trydoc_flags::{Arg, Cmd, Flag, Ty, Value};

use crate::machine;

/// Handler tag of a command node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Root ("try mode") and `hosted`.
    Start,
    ListPackages,
    Github,
    Pack,
    Install,
    Verify,
}

/// Builds the full tree. Panics if two descriptors of one command collide.
pub fn command_tree() -> Cmd<Command> {
    Cmd::root("trydoc")
        .doc("Try out a project's documentation interactively.")
        .arg(
            Arg::new("root_directory", Ty::Dir)
                .doc("Directory containing the documentation to run. Defaults to the current directory.")
                .default_factory(current_dir)
                .must_exist(),
        )
        .flag(Flag::new(&["--add-source"], Ty::Dir).doc("Additional package source directory.").must_exist())
        .flag(Flag::new(&["--uri"], Ty::Uri).doc("Document to open once the server is up."))
        .handler(Command::Start)
        .subcommand(hosted())
        .subcommand(
            Cmd::new("list-packages").doc("Lists the installed packages.").handler(Command::ListPackages),
        )
        .subcommand(
            Cmd::new("github")
                .doc("Try a GitHub repository.")
                .arg(Arg::new("repo", Ty::String).doc("Repository, as `owner/name`."))
                .handler(Command::Github),
        )
        .subcommand(
            Cmd::new("pack")
                .doc("Create a package.")
                .arg(Arg::new("pack_target", Ty::Dir).doc("Directory to pack.").must_exist())
                .handler(Command::Pack),
        )
        .subcommand(
            Cmd::new("install")
                .doc("Install a package.")
                .arg(Arg::new("package_name", Ty::String).doc("Name of the package to install."))
                .flag(Flag::new(&["--add-source"], Ty::Dir).doc("Additional package source directory.").must_exist())
                .handler(Command::Install),
        )
        .subcommand(
            Cmd::new("verify")
                .doc("Verify the documentation in a directory and its children.")
                .arg(
                    Arg::new("root_directory", Ty::Dir)
                        .doc("Directory to verify. Defaults to the current directory.")
                        .default_factory(current_dir)
                        .must_exist(),
                )
                .handler(Command::Verify),
        )
}

fn hosted() -> Cmd<Command> {
    Cmd::new("hosted")
        .doc("Run as a hosted agent.")
        .hidden()
        .flag(Flag::new(&["--id"], Ty::String).doc("Agent id.").default_factory(machine_id))
        .flag(Flag::switch(&["--production"]).doc("Run in production mode."))
        .flag(Flag::switch(&["--language-service"]).doc("Run only the language service."))
        .flag(Flag::new(&["-k", "--key"], Ty::String).doc("Signing key."))
        .flag(Flag::new(&["--ai-key", "--application-insights-key"], Ty::String).doc("Telemetry key."))
        .flag(Flag::new(&["--region-id"], Ty::String).doc("Region the agent serves."))
        .flag(Flag::switch(&["--log-to-file"]).doc("Write logs to a file."))
        .handler(Command::Start)
}

fn current_dir() -> io::Result<Value> {
    env::current_dir().map(Value::Path)
}

fn machine_id() -> io::Result<Value> {
    Ok(Value::String(machine::machine_id()))
}
