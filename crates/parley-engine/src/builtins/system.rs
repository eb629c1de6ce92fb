use crate::formatter;
use crate::sampler::ResourceSampler;
use parley_common::Builtin;
use parley_parser::translator;
use std::io::{self, Write};

/// ANSI erase-display plus cursor-home.
const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[H";

pub fn clear_screen() -> String {
    let mut stdout = io::stdout();
    if let Err(e) = stdout
        .write_all(CLEAR_SEQUENCE.as_bytes())
        .and_then(|_| stdout.flush())
    {
        tracing::debug!("Failed to clear screen: {}", e);
    }
    String::new()
}

pub fn cpu(sampler: &dyn ResourceSampler) -> String {
    match sampler.cpu() {
        Ok(usages) => formatter::format_cpu(&usages),
        Err(e) => e.to_string(),
    }
}

pub fn memory(sampler: &dyn ResourceSampler) -> String {
    match sampler.memory() {
        Ok(sample) => formatter::format_memory(&sample),
        Err(e) => e.to_string(),
    }
}

pub fn processes(sampler: &dyn ResourceSampler, limit: usize, name_width: usize) -> String {
    match sampler.processes(limit) {
        Ok(mut samples) => {
            samples.truncate(limit);
            formatter::format_processes(&samples, name_width)
        }
        Err(e) => e.to_string(),
    }
}

pub fn help() -> String {
    let mut lines = vec!["Built-in commands:".to_string()];
    lines.extend(Builtin::ALL.iter().map(|b| format!("  {}", b.usage())));
    lines.push(String::new());
    lines.push("Phrases:".to_string());
    lines.extend(
        translator::patterns()
            .iter()
            .map(|p| format!("  {:<28} -> {}", p.phrase, p.template)),
    );
    lines.push(String::new());
    lines.push("Anything else runs in the system shell.".to_string());
    lines.join("\n")
}
