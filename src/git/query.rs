// Read-only queries against a repository. These never mutate anything;
// pruning and other policy stays with the callers.

use anyhow::{bail, Result};
use std::path::Path;

use super::GitRunner;

/// A path is usable when it is a directory and git agrees it is inside a
/// working tree.
pub fn is_work_tree(git: &GitRunner, path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }

    match git.run(path, ["rev-parse", "--is-inside-work-tree"]) {
        Ok(out) => out.success && out.trimmed() == "true",
        Err(_) => false,
    }
}

/// Short symbolic branch name, or the "detached HEAD" label when HEAD
/// doesn't point at a branch.
pub fn current_branch(git: &GitRunner, repo: &Path) -> String {
    match git.run(repo, ["symbolic-ref", "--short", "-q", "HEAD"]) {
        Ok(out) if out.success && !out.trimmed().is_empty() => out.trimmed().to_string(),
        _ => "detached HEAD".to_string(),
    }
}

/// Whether the working tree or index has uncommitted changes.
pub fn is_dirty(git: &GitRunner, repo: &Path) -> Result<bool> {
    let out = git.run(repo, ["status", "--porcelain"])?;
    if !out.success {
        bail!("git status failed: {}", out.trimmed());
    }
    Ok(!out.trimmed().is_empty())
}

/// One entry of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Two-character XY status code.
    pub code: String,
    pub path: String,
}

pub fn changed_files(git: &GitRunner, repo: &Path) -> Result<Vec<StatusLine>> {
    let out = git.run(repo, ["status", "--porcelain"])?;
    if !out.success {
        bail!("git status failed: {}", out.trimmed());
    }
    Ok(parse_status_lines(&out.text))
}

pub fn staged_files(git: &GitRunner, repo: &Path) -> Result<Vec<String>> {
    let out = git.run(repo, ["diff", "--cached", "--name-only"])?;
    if !out.success {
        bail!("git diff --cached failed: {}", out.trimmed());
    }
    Ok(nonempty_lines(&out.text))
}

pub fn remotes(git: &GitRunner, repo: &Path) -> Result<Vec<String>> {
    let out = git.run(repo, ["remote"])?;
    if !out.success {
        bail!("git remote failed: {}", out.trimmed());
    }
    Ok(nonempty_lines(&out.text))
}

pub fn tags(git: &GitRunner, repo: &Path) -> Result<Vec<String>> {
    let out = git.run(repo, ["tag", "--list"])?;
    if !out.success {
        bail!("git tag failed: {}", out.trimmed());
    }
    Ok(nonempty_lines(&out.text))
}

/// One line of recent history, as listed by the commit pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLine {
    pub hash: String,
    pub when: String,
    pub author: String,
    pub subject: String,
}

pub fn recent_commits(git: &GitRunner, repo: &Path, limit: usize) -> Result<Vec<CommitLine>> {
    let limit = limit.to_string();
    let out = git.run(repo, ["log", "--format=%h|%cr|%an|%s", "-n", limit.as_str()])?;
    if !out.success {
        bail!("git log failed: {}", out.trimmed());
    }
    Ok(parse_commit_lines(&out.text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchScope {
    Local,
    LocalAndRemote,
}

/// One branch reference as listed by the branch picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchLine {
    pub name: String,
    pub hash: String,
    pub when: String,
}

pub fn branches(git: &GitRunner, repo: &Path, scope: BranchScope) -> Result<Vec<BranchLine>> {
    let format = "--format=%(refname:short)|%(objectname:short)|%(committerdate:relative)";
    let mut args = vec![
        "for-each-ref",
        "--sort=-committerdate",
        format,
        "refs/heads",
    ];
    if scope == BranchScope::LocalAndRemote {
        args.push("refs/remotes");
    }

    let out = git.run(repo, args)?;
    if !out.success {
        bail!("git for-each-ref failed: {}", out.trimmed());
    }
    Ok(parse_branch_lines(&out.text))
}

/// One stash entry: reflog selector plus description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashLine {
    pub id: String,
    pub summary: String,
}

pub fn stash_entries(git: &GitRunner, repo: &Path) -> Result<Vec<StashLine>> {
    let out = git.run(repo, ["stash", "list", "--format=%gd|%gs"])?;
    if !out.success {
        bail!("git stash list failed: {}", out.trimmed());
    }
    Ok(parse_stash_lines(&out.text))
}

fn nonempty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_status_lines(text: &str) -> Vec<StatusLine> {
    text.lines()
        .filter(|l| l.len() > 3)
        .map(|l| StatusLine {
            code: l[..2].to_string(),
            path: l[3..].to_string(),
        })
        .collect()
}

// Subject comes last in the log format so embedded pipes survive.
fn parse_commit_lines(text: &str) -> Vec<CommitLine> {
    text.lines()
        .filter_map(|l| {
            let mut parts = l.splitn(4, '|');
            Some(CommitLine {
                hash: parts.next()?.to_string(),
                when: parts.next()?.to_string(),
                author: parts.next()?.to_string(),
                subject: parts.next().unwrap_or("").to_string(),
            })
        })
        .collect()
}

fn parse_branch_lines(text: &str) -> Vec<BranchLine> {
    text.lines()
        .filter_map(|l| {
            let mut parts = l.splitn(3, '|');
            Some(BranchLine {
                name: parts.next()?.to_string(),
                hash: parts.next()?.to_string(),
                when: parts.next().unwrap_or("").to_string(),
            })
        })
        .collect()
}

fn parse_stash_lines(text: &str) -> Vec<StashLine> {
    text.lines()
        .filter_map(|l| {
            let mut parts = l.splitn(2, '|');
            Some(StashLine {
                id: parts.next()?.to_string(),
                summary: parts.next().unwrap_or("").to_string(),
            })
        })
        .filter(|s| !s.id.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_lines_keep_pipes_in_subject() {
        let lines =
            parse_commit_lines("abc1234|2 days ago|Ada|fix: parse a|b correctly\n");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].hash, "abc1234");
        assert_eq!(lines[0].when, "2 days ago");
        assert_eq!(lines[0].author, "Ada");
        assert_eq!(lines[0].subject, "fix: parse a|b correctly");
    }

    #[test]
    fn branch_lines_parse_all_fields() {
        let lines = parse_branch_lines("main|abc1234|3 hours ago\nfeature/x|def5678|5 weeks ago\n");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "main");
        assert_eq!(lines[1].hash, "def5678");
        assert_eq!(lines[1].when, "5 weeks ago");
    }

    #[test]
    fn status_lines_split_code_and_path() {
        let lines = parse_status_lines(" M src/lib.rs\n?? notes.txt\n");

        assert_eq!(
            lines,
            vec![
                StatusLine {
                    code: " M".to_string(),
                    path: "src/lib.rs".to_string()
                },
                StatusLine {
                    code: "??".to_string(),
                    path: "notes.txt".to_string()
                },
            ]
        );
    }

    #[test]
    fn stash_lines_parse_selector_and_summary() {
        let lines = parse_stash_lines("stash@{0}|WIP on main: abc1234 subject\n");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "stash@{0}");
        assert!(lines[0].summary.starts_with("WIP on main"));
    }

    #[test]
    fn empty_output_parses_to_empty_lists() {
        assert!(parse_commit_lines("").is_empty());
        assert!(parse_branch_lines("").is_empty());
        assert!(parse_stash_lines("").is_empty());
    }
}
