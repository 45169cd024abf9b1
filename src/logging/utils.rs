//! Shared helpers for console and file log output.

use std::path::PathBuf;

/// Return the log file path under `$XDG_CACHE_HOME/dfm/` (default
/// `~/.cache/dfm/`), creating the directory if needed.
///
/// Returns `None` when no cache location can be determined or created.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))?;
    let dir = cache_dir.join("dfm");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current local time as `HH:MM:SS` for per-line log timestamps.
pub(super) fn format_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Current local date and time as `YYYY-MM-DD HH:MM:SS` for run headers.
pub(super) fn format_datetime() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Strip ANSI SGR escape sequences from a string.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of SGR sequence)
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
