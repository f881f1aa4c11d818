use std::{ffi::OsString, mem};

use crate::{Error, Result};

/// A token cursor over the raw argument vector.
///
/// Arguments are stored reversed so that taking the next one is a `pop`.
pub(crate) struct Parser {
    after_double_dash: bool,
    help_requested: bool,
    rargs: Vec<OsString>,
}

/// One token, classified.
pub(crate) enum Token {
    Flag(String),
    Help,
    Positional(OsString),
}

impl Parser {
    pub(crate) fn new(mut args: Vec<OsString>) -> Parser {
        args.reverse();
        Parser { after_double_dash: false, help_requested: false, rargs: args }
    }

    /// A bare `help` word is reported once every other token is consumed,
    /// so that `help pack` and `pack help` both reach the `pack` node before
    /// printing anything. Values of options and tokens after `--` are never
    /// help requests.
    pub(crate) fn pop(&mut self) -> Option<Token> {
        let arg = match self.next() {
            Some(it) => it,
            None if mem::take(&mut self.help_requested) => return Some(Token::Help),
            None => return None,
        };
        if self.after_double_dash {
            return Some(Token::Positional(arg));
        }
        let arg_str = arg.to_str().unwrap_or_default();
        if arg_str == "--" {
            self.after_double_dash = true;
            return self.pop();
        }
        if arg_str == "-h" || arg_str == "--help" {
            return Some(Token::Help);
        }
        if arg_str == "help" {
            self.help_requested = true;
            return self.pop();
        }
        if arg_str.starts_with('-') && arg_str.len() > 1 {
            return Some(Token::Flag(arg_str.to_string()));
        }
        Some(Token::Positional(arg))
    }

    /// Looks at the next token without consuming it, if it can be a value.
    pub(crate) fn peek_value(&self) -> Option<&OsString> {
        if self.after_double_dash {
            return None;
        }
        let arg = self.rargs.last()?;
        let is_flag = arg.to_str().is_some_and(|it| it.starts_with('-') && it.len() > 1);
        if is_flag {
            None
        } else {
            Some(arg)
        }
    }

    pub(crate) fn next_value(&mut self, flag: &str) -> Result<OsString> {
        if self.peek_value().is_none() {
            return Err(Error::MissingValue { name: flag.to_string() });
        }
        self.next().ok_or_else(|| Error::MissingValue { name: flag.to_string() })
    }

    fn next(&mut self) -> Option<OsString> {
        self.rargs.pop()
    }
}
