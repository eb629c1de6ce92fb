pub mod builtins;
pub mod cli;
pub mod config;
pub mod executor;
pub mod formatter;
pub mod sampler;
pub mod shell;

pub use parley_common::{Builtin, CanonicalCommand, CommandResult, history};
pub use parley_parser::translator;
