pub mod translator;

pub use translator::{PhrasePattern, patterns, translate};

use parley_common::CanonicalCommand;

/// Translate a raw line and split the result into verb and arguments.
pub fn process(input: &str) -> Option<CanonicalCommand> {
    CanonicalCommand::parse(&translate(input))
}
