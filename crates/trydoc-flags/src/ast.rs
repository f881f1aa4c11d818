//! Static descriptors of the command tree.
//!
//! A tree is assembled once, before any input is looked at, and is read-only
//! afterwards. Descriptor collisions are programming errors, so the builder
//! methods panic on them instead of returning a `Result`.

use std::{fmt, io, path::PathBuf};

use url::Url;

/// Aliases every command answers to without declaring them.
pub(crate) const HELP_ALIASES: [&str; 2] = ["-h", "--help"];

/// A node of the command tree.
///
/// `H` is the handler tag the dispatcher hands back once this node is
/// selected, usually a small `Copy` enum owned by the application.
pub struct Cmd<H> {
    pub(crate) name: String,
    pub(crate) doc: Option<String>,
    pub(crate) hidden: bool,
    pub(crate) arg: Option<Arg>,
    pub(crate) flags: Vec<Flag>,
    pub(crate) subcommands: Vec<Cmd<H>>,
    pub(crate) handler: Option<H>,
}

/// A positional argument, or the value part of a [`Flag`].
pub struct Arg {
    pub(crate) name: String,
    pub(crate) doc: Option<String>,
    pub(crate) ty: Ty,
    pub(crate) default: DefaultValue,
    pub(crate) validation: Validation,
}

/// A named option.
pub struct Flag {
    pub(crate) aliases: Vec<String>,
    pub(crate) doc: Option<String>,
    pub(crate) arg: Arg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty {
    String,
    Bool,
    Dir,
    Uri,
}

/// Computes a default when the command line is parsed, not when the tree is
/// built.
pub type Factory = fn() -> io::Result<Value>;

pub enum DefaultValue {
    None,
    Value(Value),
    Factory(Factory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    None,
    MustExist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Bool(bool),
    Path(PathBuf),
    Uri(Url),
}

impl<H> Cmd<H> {
    /// The root of a tree. It is addressed by the binary name, so no token
    /// ever has to match it.
    pub fn root(name: impl Into<String>) -> Cmd<H> {
        Cmd::new(name)
    }

    pub fn new(name: impl Into<String>) -> Cmd<H> {
        Cmd {
            name: name.into(),
            doc: None,
            hidden: false,
            arg: None,
            flags: Vec::new(),
            subcommands: Vec::new(),
            handler: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Cmd<H> {
        self.doc = Some(doc.into());
        self
    }

    /// Keeps the command dispatchable but leaves it out of help output.
    pub fn hidden(mut self) -> Cmd<H> {
        self.hidden = true;
        self
    }

    pub fn handler(mut self, handler: H) -> Cmd<H> {
        self.handler = Some(handler);
        self
    }

    pub fn arg(mut self, arg: Arg) -> Cmd<H> {
        assert!(self.arg.is_none(), "`{}` already declares a positional argument", self.name);
        self.assert_unique_name(&arg.name);
        self.arg = Some(arg);
        self
    }

    pub fn flag(mut self, flag: Flag) -> Cmd<H> {
        for alias in &flag.aliases {
            assert!(
                !HELP_ALIASES.contains(&alias.as_str()),
                "`{alias}` is reserved for help (declared on `{}`)",
                self.name
            );
            assert!(
                self.find_flag(alias).is_none(),
                "duplicate option `{alias}` on `{}`",
                self.name
            );
        }
        self.assert_unique_name(&flag.arg.name);
        self.flags.push(flag);
        self
    }

    pub fn subcommand(mut self, cmd: Cmd<H>) -> Cmd<H> {
        assert!(
            self.find_subcommand(&cmd.name).is_none(),
            "duplicate subcommand `{}` on `{}`",
            cmd.name,
            self.name
        );
        self.subcommands.push(cmd);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn find_flag(&self, alias: &str) -> Option<&Flag> {
        self.flags.iter().find(|it| it.aliases.iter().any(|a| a == alias))
    }

    pub(crate) fn find_subcommand(&self, name: &str) -> Option<&Cmd<H>> {
        self.subcommands.iter().find(|it| it.name == name)
    }

    pub(crate) fn visible_subcommands(&self) -> impl Iterator<Item = &Cmd<H>> {
        self.subcommands.iter().filter(|it| !it.hidden)
    }

    /// Every alias accepted on this node, help included.
    pub(crate) fn valid_flags(&self) -> Vec<String> {
        let mut res = self.flags.iter().flat_map(|it| it.aliases.iter().cloned()).collect::<Vec<_>>();
        res.extend(HELP_ALIASES.iter().map(|it| it.to_string()));
        res
    }

    fn assert_unique_name(&self, name: &str) {
        let taken = self.arg.iter().map(|it| it.name.as_str()).chain(self.flags.iter().map(Flag::name));
        for other in taken {
            assert!(other != name, "duplicate argument name `{name}` on `{}`", self.name);
        }
    }
}

impl Arg {
    pub fn new(name: impl Into<String>, ty: Ty) -> Arg {
        Arg { name: name.into(), doc: None, ty, default: DefaultValue::None, validation: Validation::None }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Arg {
        self.doc = Some(doc.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Arg {
        assert_eq!(value.ty(), self.ty, "default of `{}` has the wrong type", self.name);
        self.default = DefaultValue::Value(value);
        self
    }

    pub fn default_factory(mut self, factory: Factory) -> Arg {
        self.default = DefaultValue::Factory(factory);
        self
    }

    pub fn must_exist(mut self) -> Arg {
        assert!(self.ty == Ty::Dir, "only paths can be checked for existence (`{}`)", self.name);
        self.validation = Validation::MustExist;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Ty {
        self.ty
    }

    pub(crate) fn is_required(&self) -> bool {
        matches!(self.default, DefaultValue::None)
    }
}

impl Flag {
    /// Declares an option answering to every alias in `aliases`.
    ///
    /// The bound name is derived from the longest alias: `--ai-key` and
    /// `--application-insights-key` both bind `application_insights_key`.
    pub fn new(aliases: &[&str], ty: Ty) -> Flag {
        assert!(!aliases.is_empty(), "an option needs at least one alias");
        for alias in aliases {
            assert!(alias.starts_with('-') && alias.len() > 1, "malformed alias `{alias}`");
        }
        let longest = aliases.iter().copied().max_by_key(|it| it.len()).unwrap_or_default();
        let name = snake(longest.trim_start_matches('-'));
        Flag {
            aliases: aliases.iter().map(|it| it.to_string()).collect(),
            doc: None,
            arg: Arg::new(name, ty),
        }
    }

    /// A boolean switch, `false` unless given.
    pub fn switch(aliases: &[&str]) -> Flag {
        Flag::new(aliases, Ty::Bool).default_value(Value::Bool(false))
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Flag {
        self.doc = Some(doc.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Flag {
        self.arg = self.arg.default_value(value);
        self
    }

    pub fn default_factory(mut self, factory: Factory) -> Flag {
        self.arg = self.arg.default_factory(factory);
        self
    }

    pub fn must_exist(mut self) -> Flag {
        self.arg = self.arg.must_exist();
        self
    }

    pub fn name(&self) -> &str {
        &self.arg.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The alias used in messages and help, the longest one.
    pub(crate) fn display_alias(&self) -> &str {
        self.aliases.iter().max_by_key(|it| it.len()).map(String::as_str).unwrap_or_default()
    }
}

impl Value {
    pub fn ty(&self) -> Ty {
        match self {
            Value::String(_) => Ty::String,
            Value::Bool(_) => Ty::Bool,
            Value::Path(_) => Ty::Dir,
            Value::Uri(_) => Ty::Uri,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ty::String => "string",
            Ty::Bool => "bool",
            Ty::Dir => "directory",
            Ty::Uri => "uri",
        };
        f.write_str(s)
    }
}

fn snake(s: &str) -> String {
    s.replace('-', "_")
}
