// Selection helpers shared by every handler that needs a commit, branch,
// remote or stash entry. Each one fails loudly when the underlying
// listing is empty instead of presenting a blank screen.

use anyhow::Result;

use crate::git::query::{self, BranchLine, BranchScope, CommitLine, StashLine};
use crate::git::GitRunner;
use crate::session::Session;
use crate::ui::{self, MenuRow, Ui};

fn commit_rows(commits: &[CommitLine]) -> Vec<MenuRow> {
    commits
        .iter()
        .map(|c| {
            MenuRow::new([
                c.hash.clone(),
                c.subject.clone(),
                c.when.clone(),
                c.author.clone(),
            ])
        })
        .collect()
}

/// Single commit from recent history.
pub fn pick_commit(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    limit: usize,
    title: &str,
) -> Result<Option<CommitLine>> {
    let commits = query::recent_commits(git, &session.root, limit)?;
    if commits.is_empty() {
        ui::error(ui, title, "no commits in history")?;
        return Ok(None);
    }

    let rows = commit_rows(&commits);
    Ok(ui::menu(ui, title, &session.branch, &rows)?.map(|i| commits[i].clone()))
}

/// One or more commits from recent history. An empty confirmation
/// re-prompts rather than silently selecting nothing.
pub fn pick_commits(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    limit: usize,
    title: &str,
) -> Result<Option<Vec<CommitLine>>> {
    let commits = query::recent_commits(git, &session.root, limit)?;
    if commits.is_empty() {
        ui::error(ui, title, "no commits in history")?;
        return Ok(None);
    }

    let rows = commit_rows(&commits);
    loop {
        let Some(picked) = ui::checklist(ui, title, &session.branch, &rows)? else {
            return Ok(None);
        };
        if picked.is_empty() {
            ui::error(ui, title, "select at least one commit")?;
            continue;
        }
        return Ok(Some(picked.into_iter().map(|i| commits[i].clone()).collect()));
    }
}

/// Exactly two commits, for a commit-to-commit diff. Any other count
/// re-prompts.
pub fn pick_two_commits(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    limit: usize,
    title: &str,
) -> Result<Option<(CommitLine, CommitLine)>> {
    let commits = query::recent_commits(git, &session.root, limit)?;
    if commits.is_empty() {
        ui::error(ui, title, "no commits in history")?;
        return Ok(None);
    }

    let rows = commit_rows(&commits);
    loop {
        let Some(picked) = ui::checklist(ui, title, "mark exactly two commits", &rows)? else {
            return Ok(None);
        };
        if picked.len() != 2 {
            ui::error(ui, title, "select exactly two commits")?;
            continue;
        }
        return Ok(Some((commits[picked[0]].clone(), commits[picked[1]].clone())));
    }
}

/// Single branch reference: name, short hash, relative last update.
pub fn pick_branch(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    scope: BranchScope,
    title: &str,
) -> Result<Option<BranchLine>> {
    let branches = query::branches(git, &session.root, scope)?;
    if branches.is_empty() {
        ui::error(ui, title, "no branches found")?;
        return Ok(None);
    }

    let rows: Vec<MenuRow> = branches
        .iter()
        .map(|b| MenuRow::new([b.name.clone(), b.hash.clone(), b.when.clone()]))
        .collect();

    Ok(ui::menu(ui, title, &session.branch, &rows)?.map(|i| branches[i].clone()))
}

/// Single configured remote name.
pub fn pick_remote(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    title: &str,
) -> Result<Option<String>> {
    let remotes = query::remotes(git, &session.root)?;
    if remotes.is_empty() {
        ui::error(ui, title, "no remotes configured")?;
        return Ok(None);
    }

    let rows: Vec<MenuRow> = remotes.iter().map(|r| MenuRow::new([r.clone()])).collect();
    Ok(ui::menu(ui, title, "", &rows)?.map(|i| remotes[i].clone()))
}

/// Single stash entry.
pub fn pick_stash(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    title: &str,
) -> Result<Option<StashLine>> {
    let stashes = query::stash_entries(git, &session.root)?;
    if stashes.is_empty() {
        ui::error(ui, title, "no stash entries")?;
        return Ok(None);
    }

    let rows: Vec<MenuRow> = stashes
        .iter()
        .map(|s| MenuRow::new([s.id.clone(), s.summary.clone()]))
        .collect();

    Ok(ui::menu(ui, title, "", &rows)?.map(|i| stashes[i].clone()))
}
