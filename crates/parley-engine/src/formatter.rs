use crate::sampler::{MemorySample, ProcessSample};
use crate::shell::ShellOutput;

const MB: u64 = 1024 * 1024;

pub fn format_cpu(usages: &[f32]) -> String {
    usages
        .iter()
        .enumerate()
        .map(|(i, usage)| format!("CPU {}: {:.1}%", i, usage))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_memory(sample: &MemorySample) -> String {
    format!(
        "Total: {} MB\nUsed: {} MB\nFree: {} MB\nPercentage: {:.1}%",
        sample.total_bytes / MB,
        sample.used_bytes / MB,
        sample.available_bytes / MB,
        sample.percent
    )
}

/// One process per line: right-aligned pid, name cut and padded to
/// `name_width` characters, then the owner.
pub fn format_processes(processes: &[ProcessSample], name_width: usize) -> String {
    processes
        .iter()
        .map(|p| {
            let name: String = p.name.chars().take(name_width).collect();
            let owner = p.owner.as_deref().unwrap_or("-");
            format!("{:>5} {:<width$} {}", p.pid, name, owner, width = name_width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trimmed stdout, then trimmed stderr on its own line.
///
/// When stdout is empty, stderr is returned alone with no leading line break.
pub fn format_shell_output(output: &ShellOutput) -> String {
    let stdout = output.stdout.trim();
    let stderr = output.stderr.trim();
    match (stdout.is_empty(), stderr.is_empty()) {
        (_, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{}\n{}", stdout, stderr),
    }
}
