use super::HandlerError;
use parley_common::normalize_path;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Contents of each file, joined by newlines. Missing files are reported
/// inline and do not stop the rest of the batch.
pub fn cat(cwd: &Path, args: &[String]) -> Result<String, HandlerError> {
    if args.is_empty() {
        return Ok("cat: missing file operand".to_string());
    }

    let mut output = Vec::with_capacity(args.len());
    for arg in args {
        let path = normalize_path(arg, cwd);
        if path.is_file() {
            let bytes = fs::read(&path).map_err(HandlerError::path("cat", &path))?;
            output.push(String::from_utf8_lossy(&bytes).into_owned());
        } else {
            output.push(format!("cat: '{}' not found", path.display()));
        }
    }
    Ok(output.join("\n"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redirect {
    Append,
    Overwrite,
}

/// Split `line` on the first `>>`, or failing that the first `>`.
///
/// This is purely textual: a `>` inside quotes is still taken as a redirect.
/// The target is the text up to the next occurrence of the same operator.
fn split_redirect(line: &str) -> Option<(&str, &str, Redirect)> {
    let (operator, mode) = if line.contains(">>") {
        (">>", Redirect::Append)
    } else if line.contains('>') {
        (">", Redirect::Overwrite)
    } else {
        return None;
    };

    let mut parts = line.split(operator);
    let content = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    Some((content.trim(), target.trim(), mode))
}

pub fn echo(cwd: &Path, args: &[String]) -> Result<String, HandlerError> {
    let line = args.join(" ");
    let Some((content, target, mode)) = split_redirect(&line) else {
        return Ok(line);
    };
    if target.is_empty() {
        return Ok("echo: missing redirect target".to_string());
    }

    let path = normalize_path(target, cwd);
    let mut file = match mode {
        Redirect::Append => File::options().create(true).append(true).open(&path),
        Redirect::Overwrite => File::create(&path),
    }
    .map_err(HandlerError::path("echo", &path))?;
    writeln!(file, "{}", content).map_err(HandlerError::path("echo", &path))?;

    Ok(match mode {
        Redirect::Append => format!("Text appended to '{}' successfully", path.display()),
        Redirect::Overwrite => format!("Text written to '{}' successfully", path.display()),
    })
}
