// Repository selection: the list screen the program starts on, plus the
// management screen behind it. Classification of stored paths is a pure
// pass returning both the renderable entries and the prune set, so the
// self-healing policy stays separate from the store mutation.

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::git::{query, GitRunner};
use crate::repolist::RepoStore;
use crate::session::Session;
use crate::ui::{self, Accent, MenuRow, Ui};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// Usable working tree; carries the branch label shown next to it.
    Open { branch: String },
    /// Directory no longer exists.
    MissingPath,
    /// Directory exists but git does not consider it a working tree.
    NotARepo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub path: PathBuf,
    pub state: EntryState,
}

impl RepoEntry {
    pub fn removable(&self) -> bool {
        !matches!(self.state, EntryState::Open { .. })
    }
}

/// Classify every stored path and collect the ones to prune. Does not
/// touch the store.
pub fn reconcile(git: &GitRunner, stored: &[PathBuf]) -> (Vec<RepoEntry>, Vec<PathBuf>) {
    let mut entries = Vec::with_capacity(stored.len());
    let mut prune = Vec::new();

    for path in stored {
        let state = classify(git, path);
        if !matches!(state, EntryState::Open { .. }) {
            prune.push(path.clone());
        }
        entries.push(RepoEntry {
            path: path.clone(),
            state,
        });
    }

    (entries, prune)
}

fn classify(git: &GitRunner, path: &Path) -> EntryState {
    if !path.is_dir() {
        return EntryState::MissingPath;
    }
    if !query::is_work_tree(git, path) {
        return EntryState::NotARepo;
    }
    EntryState::Open {
        branch: query::current_branch(git, path),
    }
}

/// The selector loop. Resolves to a session, or `None` when the user
/// quits the program.
pub fn select(ui: &mut Ui, store: &RepoStore, git: &GitRunner) -> Result<Option<Session>> {
    loop {
        let stored = store.load()?;
        let (entries, prune) = reconcile(git, &stored);

        if !prune.is_empty() {
            info!(count = prune.len(), "pruning dead repository entries");
            store.remove_many(&prune.iter().cloned().collect::<HashSet<_>>())?;
        }

        let mut rows: Vec<MenuRow> = entries
            .iter()
            .map(|entry| {
                let path = entry.path.display().to_string();
                match &entry.state {
                    EntryState::Open { branch } => {
                        MenuRow::new([path, format!("[{branch}]")]).accent(Accent::Good)
                    }
                    EntryState::MissingPath => {
                        MenuRow::new([path, "remove: path missing".to_string()])
                            .accent(Accent::Warn)
                    }
                    EntryState::NotARepo => {
                        MenuRow::new([path, "remove: not a git repository".to_string()])
                            .accent(Accent::Warn)
                    }
                }
            })
            .collect();

        rows.push(MenuRow::new(["[ browse for repository ]"]).accent(Accent::Action));
        rows.push(MenuRow::new(["[ manage list ]"]).accent(Accent::Action));
        rows.push(MenuRow::new(["[ quit ]"]).accent(Accent::Action));

        let browse_row = entries.len();
        let manage_row = entries.len() + 1;

        let Some(choice) = ui::menu(ui, "Repositories", "select a repository", &rows)? else {
            return Ok(None);
        };

        if choice < entries.len() {
            match &entries[choice].state {
                EntryState::Open { .. } => {
                    return Ok(Some(Session::open(git, &entries[choice].path)));
                }
                // Already pruned above; re-render without it.
                _ => continue,
            }
        } else if choice == browse_row {
            if let Some(path) = browse_and_add(ui, store, git)? {
                return Ok(Some(Session::open(git, &path)));
            }
        } else if choice == manage_row {
            manage(ui, store, git)?;
        } else {
            return Ok(None);
        }
    }
}

/// Browse for a directory, validate it, and add it to the list. Returns
/// the path when a usable repository was picked.
fn browse_and_add(ui: &mut Ui, store: &RepoStore, git: &GitRunner) -> Result<Option<PathBuf>> {
    let start = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));

    let Some(path) = ui::browse_dir(ui, "Add repository", &start)? else {
        return Ok(None);
    };

    if !query::is_work_tree(git, &path) {
        ui::error(
            ui,
            "Add repository",
            &format!("{} is not a git working tree", path.display()),
        )?;
        return Ok(None);
    }

    store.add(&path)?;
    Ok(Some(path))
}

fn manage(ui: &mut Ui, store: &RepoStore, git: &GitRunner) -> Result<()> {
    loop {
        let rows = vec![
            MenuRow::new(["Add repository"]),
            MenuRow::new(["Remove entries"]),
            MenuRow::new(["Clear list"]).accent(Accent::Warn),
            MenuRow::new(["Show list"]),
            MenuRow::new(["Back"]).accent(Accent::Action),
        ];

        let Some(choice) = ui::menu(ui, "Manage repositories", "", &rows)? else {
            return Ok(());
        };

        match choice {
            0 => {
                if let Some(path) = browse_and_add(ui, store, git)? {
                    ui::notice(ui, "Manage repositories", &format!("added {}", path.display()))?;
                }
            }
            1 => remove_entries(ui, store)?,
            2 => {
                if ui::confirm(
                    ui,
                    "Clear list",
                    "Remove every stored repository path?\nThe repositories themselves are untouched.",
                )? {
                    store.clear()?;
                    ui::notice(ui, "Manage repositories", "list cleared")?;
                }
            }
            3 => {
                let stored = store.load()?;
                let text = if stored.is_empty() {
                    "(empty)".to_string()
                } else {
                    stored
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                ui::view(ui, "Stored repositories", "", &text)?;
            }
            _ => return Ok(()),
        }
    }
}

fn remove_entries(ui: &mut Ui, store: &RepoStore) -> Result<()> {
    let stored = store.load()?;
    if stored.is_empty() {
        ui::error(ui, "Remove entries", "the repository list is empty")?;
        return Ok(());
    }

    let rows: Vec<MenuRow> = stored
        .iter()
        .map(|p| MenuRow::new([p.display().to_string()]))
        .collect();

    let Some(picked) = ui::checklist(ui, "Remove entries", "mark paths to remove", &rows)? else {
        return Ok(());
    };

    if picked.is_empty() {
        return Ok(());
    }

    let doomed: HashSet<PathBuf> = picked.into_iter().map(|i| stored[i].clone()).collect();
    let count = doomed.len();
    store.remove_many(&doomed)?;
    ui::notice(
        ui,
        "Remove entries",
        &format!("removed {count} entr{}", if count == 1 { "y" } else { "ies" }),
    )?;

    Ok(())
}
