//! Maps resolved values onto typed handler arguments.
//!
//! A target lists the names it expects in [`Bind::PARAMS`], next to the
//! command that produces them. Matching is exact and case-sensitive.

use std::path::PathBuf;

use url::Url;

use crate::{ast::Value, parse::Values, Error, Result};

/// One expected name of a binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub required: bool,
}

impl Param {
    pub const fn required(name: &'static str) -> Param {
        Param { name, required: true }
    }

    /// A parameter that falls back to its own default when no value is
    /// available.
    pub const fn optional(name: &'static str) -> Param {
        Param { name, required: false }
    }
}

/// A type that can be built from the values of one invocation.
pub trait Bind: Sized {
    const PARAMS: &'static [Param];

    fn bind(args: &Bound<'_>) -> Result<Self>;
}

/// The values of one invocation, seen through a target's schema.
pub struct Bound<'a> {
    params: &'static [Param],
    values: &'a Values,
}

/// Builds `T` from `values`, failing with [`Error::UnboundParameter`] for the
/// first required parameter that has no value.
pub fn bind<T: Bind>(values: &Values) -> Result<T> {
    if let Some(param) = T::PARAMS.iter().find(|it| it.required && values.get(it.name).is_none()) {
        return Err(Error::UnboundParameter { name: param.name.to_string() });
    }
    T::bind(&Bound { params: T::PARAMS, values })
}

impl Bound<'_> {
    pub fn required<T: FromValue>(&self, name: &str) -> Result<T> {
        match self.lookup(name)? {
            Some(value) => T::from_value(name, value),
            None => Err(Error::UnboundParameter { name: name.to_string() }),
        }
    }

    pub fn optional<T: FromValue>(&self, name: &str) -> Result<Option<T>> {
        self.lookup(name)?.map(|value| T::from_value(name, value)).transpose()
    }

    pub fn or_default<T: FromValue + Default>(&self, name: &str) -> Result<T> {
        Ok(self.optional(name)?.unwrap_or_default())
    }

    fn lookup(&self, name: &str) -> Result<Option<&Value>> {
        if !self.params.iter().any(|it| it.name == name) {
            return Err(Error::UnboundParameter { name: name.to_string() });
        }
        Ok(self.values.get(name))
    }
}

pub trait FromValue: Sized {
    fn from_value(name: &str, value: &Value) -> Result<Self>;
}

macro_rules! from_value {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl FromValue for $ty {
            fn from_value(name: &str, value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(it) => Ok(it.clone()),
                    other => Err(Error::TypeMismatch {
                        name: name.to_string(),
                        reason: format!("expected {}, got {}", $expected, other.ty()),
                    }),
                }
            }
        }
    };
}

from_value!(String, String, "string");
from_value!(bool, Bool, "bool");
from_value!(PathBuf, Path, "directory");
from_value!(Url, Uri, "uri");
