use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::process::Command;

use gitdeck::git::GitRunner;
use gitdeck::repolist::RepoStore;
use gitdeck::selector::{reconcile, EntryState};
use gitdeck::session::Session;
use tempfile::TempDir;

fn init_test_repo(path: &Path) {
    Command::new("git")
        .args(["init", "-q", "-b", "main"])
        .current_dir(path)
        .output()
        .unwrap();
    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(path)
        .output()
        .unwrap();
    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(path)
        .output()
        .unwrap();
}

#[test]
fn reconcile_distinguishes_open_missing_and_invalid() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();

    let repo = dir.path().join("repo");
    fs::create_dir(&repo).unwrap();
    init_test_repo(&repo);

    let plain = dir.path().join("plain");
    fs::create_dir(&plain).unwrap();

    let gone = dir.path().join("gone");

    let stored = vec![repo.clone(), plain.clone(), gone.clone()];
    let (entries, prune) = reconcile(&git, &stored);

    assert_eq!(entries.len(), 3);
    assert!(matches!(entries[0].state, EntryState::Open { .. }));
    assert_eq!(entries[1].state, EntryState::NotARepo);
    assert_eq!(entries[2].state, EntryState::MissingPath);

    // the prune set is exactly the two dead entries
    assert_eq!(prune, vec![plain, gone]);
}

#[test]
fn pruning_removes_dead_entries_from_the_store() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();

    let repo = dir.path().join("repo");
    fs::create_dir(&repo).unwrap();
    init_test_repo(&repo);

    let gone = dir.path().join("gone");

    let store = RepoStore::new(dir.path().join("repositories"));
    store.add(&repo).unwrap();
    store.add(&gone).unwrap();

    // what the list screen does when it renders
    let stored = store.load().unwrap();
    let (_, prune) = reconcile(&git, &stored);
    store
        .remove_many(&prune.into_iter().collect::<HashSet<_>>())
        .unwrap();

    assert_eq!(store.load().unwrap(), vec![repo]);
}

#[test]
fn open_entry_carries_the_branch_label() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();

    let repo = dir.path().join("repo");
    fs::create_dir(&repo).unwrap();
    init_test_repo(&repo);

    let (entries, prune) = reconcile(&git, &[repo]);

    assert!(prune.is_empty());
    match &entries[0].state {
        EntryState::Open { branch } => assert_eq!(branch, "main"),
        other => panic!("expected Open, got {other:?}"),
    }
}

#[test]
fn fresh_list_to_session_end_to_end() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();

    let repo = dir.path().join("repo");
    fs::create_dir(&repo).unwrap();
    init_test_repo(&repo);

    let store = RepoStore::new(dir.path().join("repositories"));
    assert!(store.load().unwrap().is_empty());

    // browsing to a valid repository adds it and opens a session
    store.add(&repo).unwrap();
    let session = Session::open(&git, &repo);

    assert_eq!(store.load().unwrap(), vec![repo.clone()]);
    assert_eq!(session.root, repo);
    assert_eq!(session.branch, "main");
    assert_eq!(session.display_name(), "repo");
}
