//! The `trydoc` command line: command tree, binding targets and the
//! dispatcher that routes a parsed invocation to one handler.
//!
//! The handlers themselves live behind the traits in [`handlers`] and are
//! supplied by whoever builds the [`Dispatcher`].

pub mod commands;
pub mod dispatch;
pub mod handlers;
pub mod machine;
pub mod options;
pub mod standalone;

pub use crate::{
    commands::{command_tree, Command},
    dispatch::{Dispatcher, Handlers, Outcome},
    handlers::InvocationContext,
    options::StartOptions,
};
