//! Rewrites a fixed set of English phrasings into canonical commands.
//!
//! Patterns are tried in declaration order and the first one matching the
//! start of the input wins. Overlapping phrasings are resolved by that order
//! alone, so new entries must be placed with care.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A phrasing and the canonical command it rewrites to.
///
/// `template` refers to capture groups positionally as `{0}`, `{1}`, ...
#[derive(Debug)]
pub struct PhrasePattern {
    pub phrase: &'static str,
    regex: Regex,
    pub template: &'static str,
}

impl PhrasePattern {
    fn new(expr: &str, phrase: &'static str, template: &'static str) -> Self {
        // Anchored at the start, case-insensitive. A literal trailing word
        // must end on a word boundary so `exiting` is not read as `exit`.
        let regex = Regex::new(&format!(r"(?i)^{}", expr)).expect("phrase pattern is valid");
        Self {
            phrase,
            regex,
            template,
        }
    }

    /// Rewrite `input` if this pattern matches its start.
    pub fn apply(&self, input: &str) -> Option<String> {
        self.regex
            .captures(input)
            .map(|caps| fill_template(self.template, &caps))
    }
}

fn fill_template(template: &str, caps: &Captures<'_>) -> String {
    static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\d+)\}").unwrap());

    // Single pass, so captured text that looks like a placeholder stays literal.
    PLACEHOLDER
        .replace_all(template, |slot: &Captures<'_>| {
            slot[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| caps.get(index + 1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

/// Phrase table in priority order.
///
/// Bare phrasings (`exit`, `quit`, `help`, `clear screen`, ...) must end on a
/// word boundary: `exiting` or `helpful` fall through to the shell instead of
/// ending the session or printing help.
static PATTERNS: LazyLock<Vec<PhrasePattern>> = LazyLock::new(|| {
    vec![
        PhrasePattern::new(r"create\s+file\s+(\S+)", "create file <name>", "touch {0}"),
        PhrasePattern::new(r"create\s+folder\s+(\S+)", "create folder <name>", "mkdir {0}"),
        PhrasePattern::new(r"delete\s+file\s+(\S+)", "delete file <name>", "rm {0}"),
        PhrasePattern::new(r"remove\s+file\s+(\S+)", "remove file <name>", "rm {0}"),
        PhrasePattern::new(
            r"rename\s+file\s+(\S+)\s+to\s+(\S+)",
            "rename file <old> to <new>",
            "mv {0} {1}",
        ),
        PhrasePattern::new(r"move\s+(\S+)\s+to\s+(\S+)", "move <src> to <dst>", "mv {0} {1}"),
        PhrasePattern::new(r"copy\s+(\S+)\s+to\s+(\S+)", "copy <src> to <dst>", "cp {0} {1}"),
        PhrasePattern::new(
            r"show\s+contents\s+of\s+(\S+)",
            "show contents of <file>",
            "cat {0}",
        ),
        PhrasePattern::new(r"list\s+directory\s+(\S+)", "list directory <path>", "ls {0}"),
        PhrasePattern::new(r"list\s+directory\b", "list directory", "ls"),
        PhrasePattern::new(r"go\s+to\s+directory\s+(\S+)", "go to directory <path>", "cd {0}"),
        PhrasePattern::new(r"current\s+directory\b", "current directory", "pwd"),
        PhrasePattern::new(r"clear\s+screen\b", "clear screen", "clear"),
        PhrasePattern::new(r"exit\b", "exit", "exit"),
        PhrasePattern::new(r"quit\b", "quit", "quit"),
        PhrasePattern::new(r"help\b", "help", "help"),
    ]
});

/// The pattern table in priority order.
pub fn patterns() -> &'static [PhrasePattern] {
    &PATTERNS
}

/// Rewrite `input` with the first matching phrase pattern.
///
/// Unmatched input comes back unchanged, including its casing and spacing.
pub fn translate(input: &str) -> String {
    let trimmed = input.trim();
    for pattern in PATTERNS.iter() {
        if let Some(rewritten) = pattern.apply(trimmed) {
            tracing::debug!("Translated {:?} -> {:?}", input, rewritten);
            return rewritten;
        }
    }
    input.to_string()
}
