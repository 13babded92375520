use std::collections::HashSet;
use std::path::{Path, PathBuf};

use gitdeck::repolist::RepoStore;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> RepoStore {
    RepoStore::new(dir.path().join("repositories"))
}

#[test]
fn adding_same_path_twice_keeps_one_entry() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.add(Path::new("/repo")).unwrap());
    assert!(!store.add(Path::new("/repo")).unwrap());

    assert_eq!(store.load().unwrap(), vec![PathBuf::from("/repo")]);
}

#[test]
fn remove_many_with_empty_set_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for p in ["/a", "/b"] {
        store.add(Path::new(p)).unwrap();
    }

    store.remove_many(&HashSet::new()).unwrap();

    assert_eq!(
        store.load().unwrap(),
        vec![PathBuf::from("/a"), PathBuf::from("/b")]
    );
}

#[test]
fn remove_many_with_full_set_empties_the_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for p in ["/a", "/b", "/c"] {
        store.add(Path::new(p)).unwrap();
    }

    let all: HashSet<PathBuf> = store.load().unwrap().into_iter().collect();
    store.remove_many(&all).unwrap();

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn remove_many_subset_preserves_survivor_order() {
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
fn removing_an_unknown_path_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.add(Path::new("/a")).unwrap();

    let doomed: HashSet<PathBuf> = [PathBuf::from("/nope")].into_iter().collect();
    store.remove_many(&doomed).unwrap();

    assert_eq!(store.load().unwrap(), vec![PathBuf::from("/a")]);
}

#[test]
fn clear_then_load_returns_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for p in ["/a", "/b"] {
        store.add(Path::new(p)).unwrap();
    }

    store.clear().unwrap();

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn missing_backing_file_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.load().unwrap().is_empty());
}
