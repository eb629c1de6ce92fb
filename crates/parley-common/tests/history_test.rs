use chrono::NaiveDate;
use parley_common::history::{FileSink, HistoryEntry, HistorySink, HistoryStore};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Default, Clone)]
struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl HistorySink for RecordingSink {
    fn load(&self) -> io::Result<Vec<String>> {
        Ok(self.lines.lock().unwrap().clone())
    }
    fn append(&self, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
    fn clear(&self) -> io::Result<()> {
        self.lines.lock().unwrap().clear();
        Ok(())
    }
}

struct BrokenSink;

impl HistorySink for BrokenSink {
    fn load(&self) -> io::Result<Vec<String>> {
        Err(io::Error::other("disk on fire"))
    }
    fn append(&self, _line: &str) -> io::Result<()> {
        Err(io::Error::other("disk on fire"))
    }
    fn clear(&self) -> io::Result<()> {
        Err(io::Error::other("disk on fire"))
    }
}

#[test]
fn test_entry_line_format() {
    let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(7, 5, 0)
        .unwrap();
    let entry = HistoryEntry::new(ts, "ls -la");
    assert_eq!(entry.to_string(), "[2024-03-09 07:05:00] ls -la");

    let parsed = HistoryEntry::parse_line("[2024-03-09 07:05:00] ls -la").unwrap();
    assert_eq!(parsed, entry);
}

#[test]
fn test_parse_line_rejects_garbage() {
    assert!(HistoryEntry::parse_line("ls -la").is_none());
    assert!(HistoryEntry::parse_line("[yesterday] ls").is_none());
    assert!(HistoryEntry::parse_line("[2024-03-09 07:05:00]").is_none());
}

#[test]
fn test_append_mirrors_to_sink() {
    let sink = RecordingSink::default();
    let mut store = HistoryStore::open(Box::new(sink.clone()));

    store.append("create file notes.txt");
    store.append("pwd");

    assert_eq!(store.len(), 2);
    assert_eq!(store.entries()[0].raw_text(), "create file notes.txt");
    let lines = sink.lines.lock().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with("] pwd"));
    assert!(store.entries()[0].timestamp() <= store.entries()[1].timestamp());
}

#[test]
fn test_recent_returns_tail_in_order() {
    let mut store = HistoryStore::in_memory();
    for i in 0..5 {
        store.append(&format!("echo {}", i));
    }

    let recent = store.recent(2);
    assert_eq!(recent.len(), 2);
    assert!(recent[0].ends_with("echo 3"));
    assert!(recent[1].ends_with("echo 4"));

    assert_eq!(store.recent(50).len(), 5);
}

#[test]
fn test_clear_empties_memory_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");
    let mut store = HistoryStore::open(Box::new(FileSink::new(&path)));

    store.append("ls");
    store.append("pwd");
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);

    store.clear();
    assert!(store.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_reload_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");
    std::fs::write(
        &path,
        "[2024-01-01 10:00:00] ls\nnot a record\n[2024-01-01 10:00:05] cd src\n",
    )
    .unwrap();

    let store = HistoryStore::open(Box::new(FileSink::new(&path)));
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.recent(10),
        vec![
            "[2024-01-01 10:00:00] ls".to_string(),
            "[2024-01-01 10:00:05] cd src".to_string(),
        ]
    );
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::open(Box::new(FileSink::new(dir.path().join("absent.txt"))));
    assert!(store.is_empty());
}

#[test]
fn test_sink_failures_are_swallowed() {
    let mut store = HistoryStore::open(Box::new(BrokenSink));
    assert!(store.is_empty());

    store.append("ls");
    assert_eq!(store.len(), 1);

    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_timestamps_never_decrease_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");
    // A record from the future, e.g. written by a machine with a skewed clock.
    std::fs::write(&path, "[2999-01-01 00:00:00] ls\n").unwrap();

    let mut store = HistoryStore::open(Box::new(FileSink::new(&path)));
    store.append("pwd");

    let entries = store.entries();
    assert_eq!(entries[1].timestamp(), entries[0].timestamp());
}

#[test]
fn test_shared_file_sink_from_threads() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(FileSink::new(dir.path().join("history.txt")));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let sink = Arc::clone(&sink);
            std::thread::spawn(move || {
                let mut store = HistoryStore::open(Box::new(sink));
                for i in 0..25 {
                    store.append(&format!("worker {} command {}", worker, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = sink.load().unwrap();
    assert_eq!(lines.len(), 100);
    assert!(lines.iter().all(|l| HistoryEntry::parse_line(l).is_some()));
}

#[test]
fn test_multiline_text_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");

    let mut store = HistoryStore::open(Box::new(FileSink::new(&path)));
    store.append("echo a\nsecond line");
    store.append(r"cat C:\new\file.txt");
    store.append("pwd\r");

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);

    let reloaded = HistoryStore::open(Box::new(FileSink::new(&path)));
    let texts: Vec<&str> = reloaded.entries().iter().map(|e| e.raw_text()).collect();
    assert_eq!(texts, vec!["echo a\nsecond line", r"cat C:\new\file.txt", "pwd\r"]);
}

#[test]
fn test_record_escapes_line_breaks() {
    let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(7, 5, 0)
        .unwrap();
    let entry = HistoryEntry::new(ts, "echo a\nb \\ c");
    assert_eq!(entry.to_record(), r"[2024-03-09 07:05:00] echo a\nb \\ c");
    assert_eq!(HistoryEntry::parse_line(&entry.to_record()).unwrap(), entry);
}
