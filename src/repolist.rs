// Persistent list of repositories the user has opened before.
//
// One absolute path per line, UTF-8, insertion order preserved. Every
// mutation rewrites the whole file through a temp file in the same
// directory so a crash can't leave a truncated list behind. Paths are
// compared by exact string equality; nothing is normalized.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config;

pub struct RepoStore {
    path: PathBuf,
}

impl RepoStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the standard per-user location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(config::repolist_path()?))
    }

    pub fn backing_path(&self) -> &Path {
        &self.path
    }

    /// All stored paths in insertion order. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<PathBuf>> {
        Ok(self.read_lines()?.into_iter().map(PathBuf::from).collect())
    }

    /// Append `repo` unless an identical entry already exists. Returns
    /// whether the list changed.
    pub fn add(&self, repo: &Path) -> Result<bool> {
        let entry = repo.to_string_lossy().into_owned();
        let mut lines = self.read_lines()?;

        if lines.iter().any(|l| *l == entry) {
            return Ok(false);
        }

        lines.push(entry);
        self.write_lines(&lines)?;
        Ok(true)
    }

    /// Drop every entry found in `doomed`, keeping survivors in their
    /// original relative order. Unknown paths are ignored.
    pub fn remove_many(&self, doomed: &HashSet<PathBuf>) -> Result<()> {
        if doomed.is_empty() {
            return Ok(());
        }

        let lines: Vec<String> = self
            .read_lines()?
            .into_iter()
            .filter(|l| !doomed.contains(Path::new(l)))
            .collect();

        self.write_lines(&lines)
    }

    /// Truncate the list to empty.
    pub fn clear(&self) -> Result<()> {
        self.write_lines(&[])
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        Ok(text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_owned)
            .collect())
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .context("repository list file has no parent directory")?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;

        for line in lines {
            writeln!(tmp, "{line}")?;
        }

        tmp.persist(&self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> RepoStore {
        RepoStore::new(dir.path().join("repositories"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn add_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.add(Path::new("/repo")).unwrap());
        assert!(!store.add(Path::new("/repo")).unwrap());

        assert_eq!(store.load().unwrap(), vec![PathBuf::from("/repo")]);
    }

    #[test]
    fn order_is_preserved_across_removal() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for p in ["/a", "/b", "/c"] {
            store.add(Path::new(p)).unwrap();
        }

        let doomed: HashSet<PathBuf> = [PathBuf::from("/b")].into_iter().collect();
        store.remove_many(&doomed).unwrap();

        assert_eq!(
            store.load().unwrap(),
            vec![PathBuf::from("/a"), PathBuf::from("/c")]
        );
    }

    #[test]
    fn clear_then_load_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.add(Path::new("/a")).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_empty());
    }
}
