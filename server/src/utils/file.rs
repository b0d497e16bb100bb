//! File utility functions

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Expand `~` and make relative paths absolute against the working directory
///
/// ```text
/// expand_path("~/.labelsql/labelsql.json") // -> /home/user/.labelsql/labelsql.json
/// expand_path("labelsql.json")             // -> /current/dir/labelsql.json
/// expand_path("/etc/labelsql.json")        // -> /etc/labelsql.json
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = match path {
        "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        },
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

/// Read a whole input file, or stdin when `path` is `None` or `-`
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let expanded = expand_path(&p.to_string_lossy());
            std::fs::read(&expanded)
                .with_context(|| format!("Failed to read input file: {}", expanded.display()))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read filter from stdin")?;
            Ok(buf)
        }
    }
}
