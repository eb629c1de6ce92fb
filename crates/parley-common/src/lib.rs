pub mod command;
pub mod history;
pub mod path;

pub use command::{Builtin, CanonicalCommand, CommandResult};
pub use history::{FileSink, HistoryEntry, HistorySink, HistoryStore, NullSink};
pub use path::normalize_path;
