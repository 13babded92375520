// Working-tree operations: status, staging, commit, clean, rollback.

use anyhow::{Context, Result};
use std::io::Write;
use tempfile::NamedTempFile;

use super::guard::dirty_tree_guard;
use super::pick::pick_commit;
use super::{run_and_notify, run_and_view};
use crate::config::Config;
use crate::git::{query, GitRunner};
use crate::session::Session;
use crate::ui::{self, Field, MenuRow, Ui};

pub fn status(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    run_and_view(ui, git, session, "Status", ["status", "-sb"])
}

pub fn stage(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let changed: Vec<_> = query::changed_files(git, &session.root)?
        .into_iter()
        .filter(|s| s.code == "??" || !s.code.ends_with(' '))
        .collect();

    if changed.is_empty() {
        ui::notice(ui, "Stage files", "nothing to stage")?;
        return Ok(());
    }

    let rows: Vec<MenuRow> = changed
        .iter()
        .map(|s| MenuRow::new([s.code.clone(), s.path.clone()]))
        .collect();

    let Some(picked) = ui::checklist(ui, "Stage files", &session.branch, &rows)? else {
        return Ok(());
    };
    if picked.is_empty() {
        ui::error(ui, "Stage files", "no files selected")?;
        return Ok(());
    }

    let mut args = vec!["add".to_string(), "--".to_string()];
    args.extend(picked.into_iter().map(|i| changed[i].path.clone()));

    run_and_notify(ui, git, session, "Stage files", &args, "files staged")
}

pub fn unstage(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let staged = query::staged_files(git, &session.root)?;
    if staged.is_empty() {
        ui::notice(ui, "Unstage files", "nothing is staged")?;
        return Ok(());
    }

    let rows: Vec<MenuRow> = staged.iter().map(|p| MenuRow::new([p.clone()])).collect();

    let Some(picked) = ui::checklist(ui, "Unstage files", &session.branch, &rows)? else {
        return Ok(());
    };
    if picked.is_empty() {
        ui::error(ui, "Unstage files", "no files selected")?;
        return Ok(());
    }

    let mut args = vec!["reset".to_string(), "-q".to_string(), "--".to_string()];
    args.extend(picked.into_iter().map(|i| staged[i].clone()));

    run_and_notify(ui, git, session, "Unstage files", &args, "files unstaged")
}

/// A commit needs a non-empty subject before anything else happens.
pub(crate) fn validate_commit_subject(subject: &str) -> std::result::Result<(), &'static str> {
    if subject.trim().is_empty() {
        Err("empty subject: a commit message is required")
    } else {
        Ok(())
    }
}

pub(crate) fn compose_message(subject: &str, body: &str) -> String {
    let subject = subject.trim();
    let body = body.trim();

    if body.is_empty() {
        format!("{subject}\n")
    } else {
        format!("{subject}\n\n{body}\n")
    }
}

pub fn commit(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let staged = query::staged_files(git, &session.root)?;

    // -am shortcut when nothing is staged yet
    let stage_all = if staged.is_empty() {
        if !ui::confirm(
            ui,
            "Commit",
            "Nothing is staged.\nCommit all modified tracked files instead (-a)?",
        )? {
            return Ok(());
        }
        true
    } else {
        false
    };

    let Some(values) = ui::form(
        ui,
        "Commit",
        &session.branch,
        vec![Field::new("Subject"), Field::new("Body (optional)")],
    )?
    else {
        return Ok(());
    };

    if let Err(msg) = validate_commit_subject(&values[0]) {
        ui::error(ui, "Commit", msg)?;
        return Ok(());
    }

    // Message goes through a temp file; the drop guard removes it on
    // every exit path.
    let mut msg_file = NamedTempFile::new().context("failed to create message file")?;
    msg_file
        .write_all(compose_message(&values[0], &values[1]).as_bytes())
        .context("failed to write message file")?;
    msg_file.flush()?;

    let mut args = vec!["commit".to_string()];
    if stage_all {
        args.push("-a".to_string());
    }
    args.push("-F".to_string());
    args.push(msg_file.path().to_string_lossy().into_owned());

    run_and_notify(ui, git, session, "Commit", &args, "commit created")
}

pub fn clean(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let dry = git.run(&session.root, ["clean", "-nd"])?;
    if !dry.success {
        ui::error(ui, "Clean working tree", dry.trimmed())?;
        return Ok(());
    }
    if dry.trimmed().is_empty() {
        ui::notice(ui, "Clean working tree", "nothing to clean")?;
        return Ok(());
    }

    ui::view(ui, "Clean working tree", "dry run", dry.trimmed())?;

    if !ui::confirm(
        ui,
        "Clean working tree",
        "Delete the untracked files and directories listed above?",
    )? {
        return Ok(());
    }

    run_and_notify(
        ui,
        git,
        session,
        "Clean working tree",
        ["clean", "-fd"],
        "working tree cleaned",
    )
}

/// Restore individual paths from an arbitrary commit.
pub fn rollback(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let Some(commit) = pick_commit(ui, git, session, cfg.history_limit, "Roll back files")? else {
        return Ok(());
    };

    let Some(path) = ui::input(
        ui,
        "Roll back files",
        "Path to restore",
        "",
    )?
    else {
        return Ok(());
    };
    let path = path.trim().to_string();
    if path.is_empty() {
        ui::error(ui, "Roll back files", "a path is required")?;
        return Ok(());
    }

    if !dirty_tree_guard(ui, git, session, "Rolling back files")? {
        return Ok(());
    }

    run_and_notify(
        ui,
        git,
        session,
        "Roll back files",
        ["checkout", commit.hash.as_str(), "--", path.as_str()],
        &format!("restored {path} from {}", commit.hash),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_subject_is_rejected() {
        assert!(validate_commit_subject("").is_err());
        assert!(validate_commit_subject("   ").is_err());
        assert!(validate_commit_subject("fix: parser").is_ok());
    }

    #[test]
    fn message_layout() {
        assert_eq!(compose_message("subject", ""), "subject\n");
        assert_eq!(
            compose_message(" subject ", "body line"),
            "subject\n\nbody line\n"
        );
    }
}
