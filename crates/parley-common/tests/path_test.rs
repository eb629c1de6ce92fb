use parley_common::normalize_path;
use std::path::{Path, PathBuf};

#[test]
fn test_relative_joins_base() {
    let base = Path::new("/work/project");
    assert_eq!(
        normalize_path("src/main.rs", base),
        PathBuf::from("/work/project/src/main.rs")
    );
}

#[test]
fn test_absolute_ignores_base() {
    let base = Path::new("/work/project");
    assert_eq!(normalize_path("/etc/hosts", base), PathBuf::from("/etc/hosts"));
}

#[test]
fn test_dot_components_collapse() {
    let base = Path::new("/work/project");
    assert_eq!(normalize_path("./a/../b/.", base), PathBuf::from("/work/project/b"));
    assert_eq!(normalize_path("../../../..", base), PathBuf::from("/"));
}

#[test]
fn test_empty_is_base() {
    let base = Path::new("/work/project");
    assert_eq!(normalize_path("", base), PathBuf::from("/work/project"));
}

#[test]
fn test_home_expansion() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let base = Path::new("/elsewhere");
    assert_eq!(normalize_path("~", base), home);
    assert_eq!(normalize_path("~/notes.txt", base), home.join("notes.txt"));
}

#[test]
fn test_tilde_user_is_literal() {
    let base = Path::new("/work");
    assert_eq!(normalize_path("~bob/x", base), PathBuf::from("/work/~bob/x"));
}

#[test]
fn test_nonexistent_path_is_fine() {
    let base = Path::new("/definitely/not/here");
    assert_eq!(
        normalize_path("nested/file.txt", base),
        PathBuf::from("/definitely/not/here/nested/file.txt")
    );
}
