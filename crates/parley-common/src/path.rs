use std::path::{Component, Path, PathBuf};

/// Resolve a user-supplied path against `base`.
///
/// A leading `~` is expanded to the home directory, relative paths are joined
/// onto `base`, and `.`/`..` components are collapsed lexically. The path does
/// not need to exist and nothing is read from disk.
pub fn normalize_path(input: &str, base: &Path) -> PathBuf {
    let expanded = expand_home(input);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    collapse(&joined)
}

fn expand_home(input: &str) -> PathBuf {
    let Some(rest) = input.strip_prefix('~') else {
        return PathBuf::from(input);
    };

    // `~user` forms are not expanded.
    let rest = if rest.is_empty() {
        rest
    } else if let Some(stripped) = rest.strip_prefix(['/', std::path::MAIN_SEPARATOR]) {
        stripped
    } else {
        return PathBuf::from(input);
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(input),
    }
}

fn collapse(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root leaves the root in place.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
