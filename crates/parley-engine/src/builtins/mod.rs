//! Built-in command handlers.
//!
//! Handlers report user mistakes (missing operands, wrong file type) as
//! ordinary output. Only unexpected I/O failures come back as
//! [`HandlerError`], which the executor renders as `Error: ...`.

pub mod fs;
pub mod system;
pub mod text;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{verb}: '{}': {source}", .path.display())]
    Path {
        verb: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{verb}: '{}' -> '{}': {source}", .from.display(), .to.display())]
    Transfer {
        verb: &'static str,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cp: '{}' already exists", .0.display())]
    DestinationExists(PathBuf),
    #[error("cp: cannot copy '{}' into itself", .0.display())]
    CopyIntoSelf(PathBuf),
}

impl HandlerError {
    fn path(verb: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| HandlerError::Path { verb, path, source }
    }
}
