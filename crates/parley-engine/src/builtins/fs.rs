use super::HandlerError;
use parley_common::normalize_path;
use std::fs::{self, File, FileTimes, Metadata};
use std::io;
use std::path::{Path, PathBuf};

pub fn list(cwd: &Path, args: &[String]) -> String {
    let path = match args.first() {
        Some(arg) => normalize_path(arg, cwd),
        None => cwd.to_path_buf(),
    };

    match sorted_names(&path) {
        Ok(names) if names.is_empty() => "(empty)".to_string(),
        Ok(names) => names.join("\n"),
        Err(e) => format!("ls error: cannot access '{}': {}", path.display(), e),
    }
}

fn sorted_names(path: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

pub fn print_working_dir(cwd: &Path) -> String {
    cwd.display().to_string()
}

/// Validate the target and move `cwd` to it. `cwd` is untouched on failure.
pub fn change_dir(cwd: &mut PathBuf, args: &[String]) -> String {
    let Some(target) = args.first() else {
        return "cd: missing argument".to_string();
    };
    let path = normalize_path(target, cwd);

    match fs::metadata(&path) {
        Err(_) => format!("cd: '{}' does not exist", path.display()),
        Ok(meta) if !meta.is_dir() => format!("cd: '{}' is not a directory", path.display()),
        Ok(_) => {
            let message = format!("Changed directory to '{}'", path.display());
            *cwd = path;
            message
        }
    }
}

pub fn make_dir(cwd: &Path, args: &[String]) -> Result<String, HandlerError> {
    if args.is_empty() {
        return Ok("mkdir: missing argument".to_string());
    }

    let mut output = Vec::with_capacity(args.len());
    for arg in args {
        let path = normalize_path(arg, cwd);
        fs::create_dir_all(&path).map_err(HandlerError::path("mkdir", &path))?;
        output.push(format!("Directory '{}' created successfully", path.display()));
    }
    Ok(output.join("\n"))
}

pub fn remove_dir(cwd: &Path, args: &[String]) -> String {
    if args.is_empty() {
        return "rmdir: missing argument".to_string();
    }

    args.iter()
        .map(|arg| {
            let path = normalize_path(arg, cwd);
            if !path.is_dir() {
                return format!("rmdir: '{}' not a directory", path.display());
            }
            match fs::remove_dir(&path) {
                Ok(()) => format!("Directory '{}' removed successfully", path.display()),
                Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => {
                    format!("rmdir: '{}' not empty", path.display())
                }
                Err(e) => format!("rmdir: '{}': {}", path.display(), e),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn remove_file(cwd: &Path, args: &[String]) -> Result<String, HandlerError> {
    if args.is_empty() {
        return Ok("rm: missing operand".to_string());
    }

    let mut output = Vec::with_capacity(args.len());
    for arg in args {
        let path = normalize_path(arg, cwd);
        if path.is_file() {
            fs::remove_file(&path).map_err(HandlerError::path("rm", &path))?;
            output.push(format!("File '{}' removed successfully", path.display()));
        } else if path.is_dir() {
            output.push(format!("rm: '{}' is a directory (use rmdir)", path.display()));
        } else {
            output.push(format!("rm: '{}' not found", path.display()));
        }
    }
    Ok(output.join("\n"))
}

/// Create each file if missing. Existing files keep their contents.
pub fn touch(cwd: &Path, args: &[String]) -> Result<String, HandlerError> {
    if args.is_empty() {
        return Ok("touch: missing file operand".to_string());
    }

    let mut output = Vec::with_capacity(args.len());
    for arg in args {
        let path = normalize_path(arg, cwd);
        File::options()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(HandlerError::path("touch", &path))?;
        output.push(format!("File '{}' created successfully", path.display()));
    }
    Ok(output.join("\n"))
}

/// Resolve exactly two operands, or explain what is wrong with them.
fn source_and_destination(
    verb: &str,
    cwd: &Path,
    args: &[String],
) -> Result<(PathBuf, PathBuf), String> {
    match args {
        [src, dest] => Ok((normalize_path(src, cwd), normalize_path(dest, cwd))),
        [] | [_] => Err(format!("{}: missing source/destination", verb)),
        _ => Err(format!("{}: too many arguments", verb)),
    }
}

pub fn move_path(cwd: &Path, args: &[String]) -> Result<String, HandlerError> {
    let (src, dest) = match source_and_destination("mv", cwd, args) {
        Ok(pair) => pair,
        Err(usage) => return Ok(usage),
    };

    fs::rename(&src, &dest).map_err(|source| HandlerError::Transfer {
        verb: "mv",
        from: src.clone(),
        to: dest.clone(),
        source,
    })?;
    Ok(format!(
        "'{}' renamed/moved to '{}' successfully",
        src.display(),
        dest.display()
    ))
}

pub fn copy_path(cwd: &Path, args: &[String]) -> Result<String, HandlerError> {
    let (src, dest) = match source_and_destination("cp", cwd, args) {
        Ok(pair) => pair,
        Err(usage) => return Ok(usage),
    };
    let transfer = |source: io::Error| HandlerError::Transfer {
        verb: "cp",
        from: src.clone(),
        to: dest.clone(),
        source,
    };

    if src.is_dir() {
        if dest.exists() {
            return Err(HandlerError::DestinationExists(dest.clone()));
        }
        if dest.starts_with(&src) {
            return Err(HandlerError::CopyIntoSelf(src.clone()));
        }
        copy_tree(&src, &dest).map_err(transfer)?;
        return Ok(format!(
            "Directory '{}' copied to '{}' successfully",
            src.display(),
            dest.display()
        ));
    }

    // Copying a file onto a directory places it inside, under the same name.
    let target = match src.file_name() {
        Some(name) if dest.is_dir() => dest.join(name),
        _ => dest.clone(),
    };
    copy_file(&src, &target).map_err(transfer)?;
    Ok(format!(
        "File '{}' copied to '{}' successfully",
        src.display(),
        dest.display()
    ))
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if from.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            copy_file(&from, &to)?;
        }
    }
    preserve_times(&fs::metadata(src)?, dest);
    Ok(())
}

/// Copy contents and permissions, then carry over access and modification times.
fn copy_file(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest)?;
    preserve_times(&fs::metadata(src)?, dest);
    Ok(())
}

fn preserve_times(meta: &Metadata, dest: &Path) {
    let result = (|| -> io::Result<()> {
        let times = FileTimes::new()
            .set_accessed(meta.accessed()?)
            .set_modified(meta.modified()?);
        File::open(dest)?.set_times(times)
    })();
    if let Err(e) = result {
        tracing::debug!("Could not preserve timestamps on {}: {}", dest.display(), e);
    }
}
