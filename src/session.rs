use std::path::{Path, PathBuf};

use crate::git::{query, GitRunner};

/// The repository the dispatcher is currently working against, threaded
/// explicitly through every operation handler.
#[derive(Debug, Clone)]
pub struct Session {
    pub root: PathBuf,
    pub branch: String,
}

impl Session {
    pub fn open(git: &GitRunner, root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            branch: query::current_branch(git, root),
        }
    }

    /// Re-read the branch label; operations like checkout change it.
    pub fn refresh(&mut self, git: &GitRunner) {
        self.branch = query::current_branch(git, &self.root);
    }

    pub fn display_name(&self) -> String {
        self.root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("repository")
            .to_string()
    }
}
