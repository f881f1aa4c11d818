//! Command tree, argument parser and binder behind the `trydoc` CLI.
//!
//! A tree of [`Cmd`] nodes is declared once with builder methods. [`parse`]
//! walks it for one argument vector and yields an [`Invocation`]: the
//! selected command path, its handler tag and one resolved [`Value`] per
//! declared argument. [`bind`] then turns those values into a typed
//! [`Bind`] target by plain name lookup.
//!
//! ```
//! use trydoc_flags::{Arg, Bind, Bound, Cmd, Param, Ty};
//!
//! #[derive(Debug)]
//! struct Github {
//!     repo: String,
//! }
//!
//! impl Bind for Github {
//!     const PARAMS: &'static [Param] = &[Param::required("repo")];
//!
//!     fn bind(args: &Bound<'_>) -> trydoc_flags::Result<Github> {
//!         Ok(Github { repo: args.required("repo")? })
//!     }
//! }
//!
//! let tree = Cmd::root("trydoc").subcommand(
//!     Cmd::new("github").arg(Arg::new("repo", Ty::String)).handler("github"),
//! );
//! let invocation = trydoc_flags::parse(&tree, vec!["github".into(), "octo/repo".into()]).unwrap();
//! assert_eq!(invocation.handler, "github");
//! let github = trydoc_flags::bind::<Github>(&invocation.values).unwrap();
//! assert_eq!(github.repo, "octo/repo");
//! ```

mod ast;
mod bind;
mod help;
mod parse;
mod rt;

use std::path::PathBuf;

pub use crate::{
    ast::{Arg, Cmd, DefaultValue, Factory, Flag, Ty, Validation, Value},
    bind::{bind, Bind, Bound, FromValue, Param},
    help::render as help,
    parse::{parse, Invocation, Values},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between raw arguments and a bound target.
///
/// All variants are usage errors: they are reported once and never retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown flag: `{flag}`. Valid flags: {}", valid.join(", "))]
    UnknownOption { flag: String, valid: Vec<String> },

    #[error("expected a value for `{name}`")]
    MissingValue { name: String },

    #[error("Can't parse `{name}`, {reason}")]
    TypeMismatch { name: String, reason: String },

    #[error("Path does not exist: `{}` (for `{name}`)", path.display())]
    PathNotFound { name: String, path: PathBuf },

    #[error("Parameter is not bound: `{name}`")]
    UnboundParameter { name: String },

    #[error("A subcommand is required after `{path}`. Use `help` for more information")]
    NoHandler { path: String },

    #[error("Flag specified more than once: `{flag}`")]
    RepeatedOption { flag: String },

    #[error("Unknown command: `{arg}`. Use `help` for more information")]
    UnexpectedArgument { arg: String },

    #[error("{0}")]
    Help(String),
}

impl Error {
    /// Whether this is a help request rather than a failure.
    pub fn is_help(&self) -> bool {
        matches!(self, Error::Help(_))
    }

    /// The message shown to the user, ending with a pointer to `help`.
    pub fn usage(&self) -> String {
        const HINT: &str = "Use `help` for more information";
        let msg = self.to_string();
        if self.is_help() || msg.ends_with(HINT) {
            msg
        } else {
            format!("{msg}. {HINT}")
        }
    }

    /// `0` for help, `2` for every usage error.
    pub fn exit_code(&self) -> i32 {
        if self.is_help() {
            0
        } else {
            2
        }
    }
}
