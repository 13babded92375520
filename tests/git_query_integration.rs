use std::fs;
use std::path::Path;
use std::process::Command;

use gitdeck::git::{query, GitRunner};
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

fn commit_file(path: &Path, name: &str, content: &str, message: &str) {
    fs::write(path.join(name), content).unwrap();
    Command::new("git")
        .args(["add", name])
        .current_dir(path)
        .output()
        .unwrap();
    Command::new("git")
        .args(["commit", "-q", "-m", message])
        .current_dir(path)
        .output()
        .unwrap();
}

#[test]
fn work_tree_detection() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();

    let repo = dir.path().join("repo");
    fs::create_dir(&repo).unwrap();
    init_test_repo(&repo);

    let plain = dir.path().join("plain");
    fs::create_dir(&plain).unwrap();

    assert!(query::is_work_tree(&git, &repo));
    assert!(!query::is_work_tree(&git, &plain));
    assert!(!query::is_work_tree(&git, &dir.path().join("missing")));
}

#[test]
fn dirty_tracking_follows_working_tree_changes() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();
    init_test_repo(dir.path());

    commit_file(dir.path(), "a.txt", "one", "first");
    assert!(!query::is_dirty(&git, dir.path()).unwrap());

    fs::write(dir.path().join("a.txt"), "two").unwrap();
    assert!(query::is_dirty(&git, dir.path()).unwrap());
}

#[test]
fn staged_files_lists_the_index() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();
    init_test_repo(dir.path());

    commit_file(dir.path(), "a.txt", "one", "first");

    fs::write(dir.path().join("b.txt"), "new").unwrap();
    Command::new("git")
        .args(["add", "b.txt"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    let staged = query::staged_files(&git, dir.path()).unwrap();
    assert_eq!(staged, vec!["b.txt".to_string()]);
}

#[test]
fn branch_label_reflects_head_state() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();
    init_test_repo(dir.path());

    assert_eq!(query::current_branch(&git, dir.path()), "main");

    commit_file(dir.path(), "a.txt", "one", "first");
    Command::new("git")
        .args(["checkout", "-q", "--detach"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(query::current_branch(&git, dir.path()), "detached HEAD");
}

#[test]
fn recent_commits_come_back_newest_first() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();
    init_test_repo(dir.path());

    commit_file(dir.path(), "a.txt", "one", "first commit");
    commit_file(dir.path(), "b.txt", "two", "second commit");

    let commits = query::recent_commits(&git, dir.path(), 10).unwrap();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].subject, "second commit");
    assert_eq!(commits[1].subject, "first commit");
    assert!(!commits[0].hash.is_empty());
    assert_eq!(commits[0].author, "Test User");
}

#[test]
fn empty_history_yields_no_commit_lines() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();
    init_test_repo(dir.path());

    // `git log` fails on an unborn branch; the query surfaces that
    assert!(query::recent_commits(&git, dir.path(), 10).is_err());
}

#[test]
fn branch_listing_includes_local_heads() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();
    init_test_repo(dir.path());

    commit_file(dir.path(), "a.txt", "one", "first");
    Command::new("git")
        .args(["branch", "feature"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    let branches =
        query::branches(&git, dir.path(), gitdeck::git::query::BranchScope::Local).unwrap();
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();

    assert!(names.contains(&"main"));
    assert!(names.contains(&"feature"));
    assert!(branches.iter().all(|b| !b.hash.is_empty()));
}

#[test]
fn failed_commands_keep_their_output() {
    let git = GitRunner::discover().unwrap();
    let dir = TempDir::new().unwrap();
    init_test_repo(dir.path());

    let out = git
        .run(dir.path(), ["checkout", "no-such-branch"])
        .unwrap();

    assert!(!out.success);
    assert!(!out.text.is_empty());
}
