//! The dispatcher: raw arguments in, selected command and resolved values out.

use std::{collections::BTreeMap, ffi::OsString, fmt, io, path::PathBuf};

use url::Url;

use crate::{
    ast::{Arg, Cmd, DefaultValue, Flag, Ty, Validation, Value},
    help,
    rt::{Parser, Token},
    Error, Result,
};

/// The outcome of a successful parse.
#[derive(Debug)]
pub struct Invocation<H> {
    /// Names from the root to the selected command.
    pub path: Vec<String>,
    pub handler: H,
    pub values: Values,
}

/// One entry per argument and option of the selected command.
///
/// An entry is `None` only for an option that was neither given nor has a
/// default.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Values {
    map: BTreeMap<String, Option<Value>>,
}

impl Values {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` is declared on the selected command.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.map.iter().map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn insert(&mut self, name: &str, value: Option<Value>) {
        self.map.insert(name.to_string(), value);
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

/// Parses `args` (without the program name) against the tree rooted at
/// `root`.
///
/// A child command is entered when its name is the first token seen on the
/// current command. Options are looked up on the current command only:
/// options of the root are not visible from its children.
pub fn parse<H: Clone>(root: &Cmd<H>, args: Vec<OsString>) -> Result<Invocation<H>> {
    let mut p = Parser::new(args);
    let mut cmd = root;
    let mut path = vec![root.name.clone()];
    let mut positional: Option<OsString> = None;
    let mut explicit: Vec<(&Flag, Value)> = Vec::new();

    while let Some(token) = p.pop() {
        match token {
            Token::Help => {
                let path = path.iter().skip(1).map(String::as_str).collect::<Vec<_>>();
                return Err(Error::Help(help::render(root, &path)));
            }
            Token::Flag(flag) => {
                let decl = match cmd.find_flag(&flag) {
                    Some(it) => it,
                    None => return Err(Error::UnknownOption { flag, valid: cmd.valid_flags() }),
                };
                if explicit.iter().any(|(it, _)| it.name() == decl.name()) {
                    return Err(Error::RepeatedOption { flag: decl.display_alias().to_string() });
                }
                let value = match decl.arg.ty {
                    Ty::Bool => {
                        let positional_open = cmd.arg.is_some() && positional.is_none();
                        switch_value(&mut p, &flag, positional_open)?
                    }
                    _ => {
                        let raw = p.next_value(&flag)?;
                        coerce(&decl.arg, &flag, raw)?
                    }
                };
                explicit.push((decl, value));
            }
            Token::Positional(arg) => {
                if positional.is_none() && explicit.is_empty() {
                    if let Some(sub) = arg.to_str().and_then(|it| cmd.find_subcommand(it)) {
                        cmd = sub;
                        path.push(sub.name.clone());
                        continue;
                    }
                }
                if cmd.arg.is_some() && positional.is_none() {
                    positional = Some(arg);
                    continue;
                }
                // `OsString`'s debug output escapes non-utf8 bytes instead of
                // replacing them.
                let dbg = format!("{arg:?}");
                return Err(Error::UnexpectedArgument { arg: dbg.trim_matches('"').to_string() });
            }
        }
    }

    let handler = cmd.handler.clone().ok_or_else(|| Error::NoHandler { path: path.join(" ") })?;
    tracing::debug!(command = %path.join(" "), "selected command");

    let mut values = Values::default();
    if let Some(arg) = &cmd.arg {
        let value = match positional {
            Some(raw) => Some(coerce(arg, &arg.name, raw)?),
            None => default_of(arg)?,
        };
        if value.is_none() && arg.is_required() {
            return Err(Error::MissingValue { name: arg.name.clone() });
        }
        validate(arg, value.as_ref())?;
        values.insert(&arg.name, value);
    }
    for flag in &cmd.flags {
        let value = match explicit.iter().position(|(it, _)| it.name() == flag.name()) {
            Some(idx) => Some(explicit.swap_remove(idx).1),
            None => default_of(&flag.arg)?,
        };
        validate(&flag.arg, value.as_ref())?;
        values.insert(flag.name(), value);
    }

    Ok(Invocation { path, handler, values })
}

/// A boolean option is `true` when given bare. A following `true`/`false`
/// is taken as its value, and so is any other word the command would have
/// no use for, except `help`.
fn switch_value(p: &mut Parser, flag: &str, positional_open: bool) -> Result<Value> {
    let (parsed, is_help) = match p.peek_value() {
        Some(next) => (parse_bool(next), next == "help"),
        None => return Ok(Value::Bool(true)),
    };
    match parsed {
        Some(it) => {
            p.next_value(flag)?;
            Ok(Value::Bool(it))
        }
        None if positional_open || is_help => Ok(Value::Bool(true)),
        None => {
            let raw = p.next_value(flag)?;
            Err(Error::TypeMismatch {
                name: flag.to_string(),
                reason: format!("expected `true` or `false`, got {raw:?}"),
            })
        }
    }
}

fn coerce(arg: &Arg, name: &str, raw: OsString) -> Result<Value> {
    let res = match arg.ty {
        Ty::Dir => Value::Path(PathBuf::from(raw)),
        Ty::String => Value::String(utf8(name, raw)?),
        Ty::Bool => match parse_bool(&raw) {
            Some(it) => Value::Bool(it),
            None => {
                return Err(Error::TypeMismatch {
                    name: name.to_string(),
                    reason: format!("expected `true` or `false`, got {raw:?}"),
                })
            }
        },
        Ty::Uri => {
            let text = utf8(name, raw)?;
            let uri = Url::parse(&text).map_err(|err| Error::TypeMismatch {
                name: name.to_string(),
                reason: format!("`{text}` is not a valid uri: {err}"),
            })?;
            Value::Uri(uri)
        }
    };
    Ok(res)
}

fn utf8(name: &str, raw: OsString) -> Result<String> {
    raw.into_string().map_err(|it| Error::TypeMismatch {
        name: name.to_string(),
        reason: format!("invalid utf8: {it:?}"),
    })
}

fn parse_bool(raw: &OsString) -> Option<bool> {
    let text = raw.to_str()?;
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn default_of(arg: &Arg) -> Result<Option<Value>> {
    match &arg.default {
        DefaultValue::None => Ok(None),
        DefaultValue::Value(value) => Ok(Some(value.clone())),
        DefaultValue::Factory(factory) => match factory() {
            Ok(value) => Ok(Some(value)),
            // A deleted working directory.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::PathNotFound { name: arg.name.clone(), path: PathBuf::from(".") })
            }
            Err(err) => Err(Error::TypeMismatch {
                name: arg.name.clone(),
                reason: format!("can't compute the default value, {err}"),
            }),
        },
    }
}

fn validate(arg: &Arg, value: Option<&Value>) -> Result<()> {
    if arg.validation != Validation::MustExist {
        return Ok(());
    }
    match value {
        Some(Value::Path(path)) if !path.exists() => {
            Err(Error::PathNotFound { name: arg.name.clone(), path: path.clone() })
        }
        _ => Ok(()),
    }
}
