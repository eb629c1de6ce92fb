//! Append-only command history with a durable sink.
//!
//! The in-memory log is authoritative for the running session; the sink is a
//! best-effort mirror. Sink failures are logged and never surface to callers.

use chrono::{Local, NaiveDateTime, SubsecRound};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Timestamp layout used both for display and for the sink file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    timestamp: NaiveDateTime,
    raw_text: String,
}

impl HistoryEntry {
    pub fn new(timestamp: NaiveDateTime, raw_text: impl Into<String>) -> Self {
        Self {
            timestamp,
            raw_text: raw_text.into(),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Parse a `[YYYY-MM-DD HH:MM:SS] text` record as written by [`to_record`].
    ///
    /// [`to_record`]: HistoryEntry::to_record
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (stamp, text) = rest.split_once("] ")?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self::new(timestamp, unescape(text)))
    }

    /// Single-line form for the sink. Line breaks and backslashes in the
    /// text are escaped so every entry occupies exactly one line.
    pub fn to_record(&self) -> String {
        format!(
            "[{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            escape(&self.raw_text)
        )
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Inverse of [`escape`]. Unknown escapes are kept verbatim.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.raw_text
        )
    }
}

/// Durable storage behind the history log.
pub trait HistorySink: Send + Sync {
    /// Read every stored record, oldest first.
    fn load(&self) -> io::Result<Vec<String>>;

    /// Append one record.
    fn append(&self, line: &str) -> io::Result<()>;

    /// Drop every stored record.
    fn clear(&self) -> io::Result<()>;
}

/// Lets several stores (e.g. one per request handler) share a single sink.
impl<T: HistorySink + ?Sized> HistorySink for Arc<T> {
    fn load(&self) -> io::Result<Vec<String>> {
        (**self).load()
    }

    fn append(&self, line: &str) -> io::Result<()> {
        (**self).append(line)
    }

    fn clear(&self) -> io::Result<()> {
        (**self).clear()
    }
}

/// Plain text file, one record per line.
///
/// Each record goes out in a single append-mode write while holding the
/// sink's lock, so writers sharing one `FileSink` never interleave records.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for FileSink {
    fn load(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');
        file.write_all(record.as_bytes())
    }

    fn clear(&self) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        File::create(&self.path).map(|_| ())
    }
}

/// Sink that stores nothing. Used when persistence is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl HistorySink for NullSink {
    fn load(&self) -> io::Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn append(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        Ok(())
    }
}

pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    sink: Box<dyn HistorySink>,
}

impl HistoryStore {
    /// Create a store backed by `sink`, loading whatever it already holds.
    ///
    /// A sink that cannot be read yields an empty log.
    pub fn open(sink: Box<dyn HistorySink>) -> Self {
        let entries = match sink.load() {
            Ok(lines) => lines
                .iter()
                .filter_map(|line| {
                    let entry = HistoryEntry::parse_line(line);
                    if entry.is_none() {
                        tracing::debug!("Skipping unreadable history record: {:?}", line);
                    }
                    entry
                })
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to load history: {}", e);
                Vec::new()
            }
        };
        Self { entries, sink }
    }

    /// Store without persistence.
    pub fn in_memory() -> Self {
        Self::open(Box::new(NullSink))
    }

    /// Record `raw_text` with the current local time.
    pub fn append(&mut self, raw_text: &str) {
        let mut timestamp = Local::now().naive_local().trunc_subsecs(0);
        // Keep the log ordered even if the wall clock steps backwards.
        if let Some(last) = self.entries.last()
            && timestamp < last.timestamp
        {
            timestamp = last.timestamp;
        }

        let entry = HistoryEntry::new(timestamp, raw_text);
        if let Err(e) = self.sink.append(&entry.to_record()) {
            tracing::warn!("Failed to save history: {}", e);
        }
        self.entries.push(entry);
    }

    /// The last `n` entries in insertion order, rendered as `[timestamp] text`.
    pub fn recent(&self, n: usize) -> Vec<String> {
        let start = self.entries.len().saturating_sub(n);
        self.entries[start..].iter().map(ToString::to_string).collect()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty both the in-memory log and the sink.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.sink.clear() {
            tracing::warn!("Failed to clear history file: {}", e);
        }
    }
}
