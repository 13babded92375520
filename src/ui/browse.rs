use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::{error, input, menu, Accent, MenuRow, Ui};

/// Directory browser. One directory level per screen; hidden directories
/// are reachable through the "type a path" row. Returns the chosen
/// directory, or `None` on cancel.
pub fn browse_dir(ui: &mut Ui, title: &str, start: &Path) -> Result<Option<PathBuf>> {
    let mut current = if start.is_dir() {
        start.to_path_buf()
    } else {
        PathBuf::from("/")
    };

    loop {
        let subdirs = match list_subdirs(&current) {
            Ok(subdirs) => subdirs,
            Err(e) => {
                error(ui, "Browse", &format!("cannot read {}: {e}", current.display()))?;
                match current.parent() {
                    Some(parent) => {
                        current = parent.to_path_buf();
                        continue;
                    }
                    None => return Ok(None),
                }
            }
        };

        let mut rows = vec![
            MenuRow::new(["[ use this directory ]"]).accent(Accent::Action),
            MenuRow::new(["[ type a path ]"]).accent(Accent::Action),
        ];
        let has_parent = current.parent().is_some();
        if has_parent {
            rows.push(MenuRow::new([".."]));
        }
        for d in &subdirs {
            rows.push(MenuRow::new([format!("{d}/")]));
        }

        let context = current.display().to_string();
        let Some(choice) = menu(ui, title, &context, &rows)? else {
            return Ok(None);
        };

        match choice {
            0 => return Ok(Some(current)),
            1 => {
                let Some(typed) = input(ui, title, "Path", &context)? else {
                    continue;
                };
                let typed = typed.trim().to_string();
                if typed.is_empty() {
                    continue;
                }
                let path = PathBuf::from(typed);
                if path.is_dir() {
                    current = path;
                } else {
                    error(ui, "Browse", &format!("not a directory: {}", path.display()))?;
                }
            }
            2 if has_parent => {
                if let Some(parent) = current.parent() {
                    current = parent.to_path_buf();
                }
            }
            i => {
                let offset = if has_parent { 3 } else { 2 };
                if let Some(name) = subdirs.get(i - offset) {
                    current = current.join(name);
                }
            }
        }
    }
}

fn list_subdirs(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut subdirs: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let name = entry.file_name().to_str()?.to_string();
            if name.starts_with('.') {
                return None;
            }
            entry.file_type().ok()?.is_dir().then_some(name)
        })
        .collect();

    subdirs.sort();
    Ok(subdirs)
}
