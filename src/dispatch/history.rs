// History operations: log, diff, reset, revert, cherry-pick, tags, notes.

use anyhow::{Context, Result};
use std::io::Write;
use tempfile::NamedTempFile;

use super::guard::dirty_tree_guard;
use super::pick::{pick_commit, pick_commits, pick_two_commits};
use super::{run_and_notify, run_and_view};
use crate::config::Config;
use crate::git::{query, GitRunner, RawArgs};
use crate::session::Session;
use crate::ui::{self, Field, MenuRow, Ui};

pub fn log(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let Some(values) = ui::form(
        ui,
        "Log",
        &session.branch,
        vec![
            Field::with_value("Max entries", &cfg.log_limit.to_string()),
            Field::new("Author filter (optional)"),
            Field::new("Message filter (optional)"),
        ],
    )?
    else {
        return Ok(());
    };

    let Ok(limit) = values[0].trim().parse::<usize>() else {
        ui::error(ui, "Log", "max entries must be a number")?;
        return Ok(());
    };

    let mut args: Vec<String> = vec![
        "log".into(),
        "--graph".into(),
        "--oneline".into(),
        "--decorate".into(),
        "-n".into(),
        limit.to_string(),
    ];
    let author = values[1].trim();
    if !author.is_empty() {
        args.push(format!("--author={author}"));
    }
    let grep = values[2].trim();
    if !grep.is_empty() {
        args.push(format!("--grep={grep}"));
    }

    run_and_view(ui, git, session, "Log", &args)
}

pub fn diff(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let rows = vec![
        MenuRow::new(["Working tree"]),
        MenuRow::new(["Staged changes"]),
        MenuRow::new(["Between two commits"]),
        MenuRow::new(["A single path"]),
    ];

    let Some(choice) = ui::menu(ui, "Diff", &session.branch, &rows)? else {
        return Ok(());
    };

    match choice {
        0 => run_and_view(ui, git, session, "Diff", ["diff"]),
        1 => run_and_view(ui, git, session, "Diff (staged)", ["diff", "--cached"]),
        2 => {
            let Some((a, b)) = pick_two_commits(ui, git, session, cfg.history_limit, "Diff")?
            else {
                return Ok(());
            };
            run_and_view(
                ui,
                git,
                session,
                "Diff",
                ["diff", a.hash.as_str(), b.hash.as_str()],
            )
        }
        _ => {
            let Some(path) = ui::input(ui, "Diff", "Path", "")? else {
                return Ok(());
            };
            let path = path.trim().to_string();
            if path.is_empty() {
                ui::error(ui, "Diff", "a path is required")?;
                return Ok(());
            }
            run_and_view(ui, git, session, "Diff", ["diff", "--", path.as_str()])
        }
    }
}

pub fn reset(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let rows = vec![
        MenuRow::new(["--soft", "keep index and working tree"]),
        MenuRow::new(["--mixed", "keep working tree, reset index"]),
        MenuRow::new(["--hard", "discard everything"]).accent(ui::Accent::Warn),
    ];

    let Some(mode_idx) = ui::menu(ui, "Reset", &session.branch, &rows)? else {
        return Ok(());
    };
    let mode = ["--soft", "--mixed", "--hard"][mode_idx];

    let Some(target) = pick_commit(ui, git, session, cfg.history_limit, "Reset")? else {
        return Ok(());
    };

    if mode == "--hard" && !dirty_tree_guard(ui, git, session, "A hard reset")? {
        return Ok(());
    }

    run_and_notify(
        ui,
        git,
        session,
        "Reset",
        ["reset", mode, target.hash.as_str()],
        &format!("reset {mode} to {}", target.hash),
    )
}

pub fn revert(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let Some(commits) = pick_commits(ui, git, session, cfg.history_limit, "Revert")? else {
        return Ok(());
    };

    let Some(extra) = ui::input(ui, "Revert", "Extra options (optional)", "")? else {
        return Ok(());
    };

    let no_commit = ui::confirm(
        ui,
        "Revert",
        "Apply with --no-commit (leave the changes staged)?",
    )?;

    let mut args: Vec<String> = vec!["revert".into()];
    if no_commit {
        args.push("--no-commit".into());
    }
    args.extend(RawArgs::parse(&extra).as_slice().iter().cloned());
    args.extend(commits.iter().map(|c| c.hash.clone()));

    run_and_notify(
        ui,
        git,
        session,
        "Revert",
        &args,
        &format!("reverted {} commit(s)", commits.len()),
    )
}

pub fn cherry_pick(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let Some(commits) = pick_commits(ui, git, session, cfg.history_limit, "Cherry-pick")? else {
        return Ok(());
    };

    let Some(extra) = ui::input(ui, "Cherry-pick", "Extra options (optional)", "")? else {
        return Ok(());
    };

    let mut args: Vec<String> = vec!["cherry-pick".into()];
    args.extend(RawArgs::parse(&extra).as_slice().iter().cloned());
    args.extend(commits.iter().map(|c| c.hash.clone()));

    run_and_notify(
        ui,
        git,
        session,
        "Cherry-pick",
        &args,
        &format!("cherry-picked {} commit(s)", commits.len()),
    )
}

pub fn tag_create(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let Some(values) = ui::form(
        ui,
        "Create tag",
        &session.branch,
        vec![Field::new("Name"), Field::new("Message")],
    )?
    else {
        return Ok(());
    };

    let name = values[0].trim().to_string();
    if name.is_empty() {
        ui::error(ui, "Create tag", "a tag name is required")?;
        return Ok(());
    }
    let message = values[1].trim().to_string();
    if message.is_empty() {
        ui::error(ui, "Create tag", "a tag message is required")?;
        return Ok(());
    }

    // Optional target; default is HEAD.
    let target = if ui::confirm(ui, "Create tag", "Tag a specific commit instead of HEAD?")? {
        match pick_commit(ui, git, session, cfg.history_limit, "Create tag")? {
            Some(commit) => Some(commit.hash),
            None => return Ok(()),
        }
    } else {
        None
    };

    let mut msg_file = NamedTempFile::new().context("failed to create message file")?;
    msg_file.write_all(message.as_bytes())?;
    msg_file.flush()?;

    let mut args: Vec<String> = vec!["tag".into(), "-a".into(), name.clone()];
    if let Some(hash) = target {
        args.push(hash);
    }
    args.push("-F".into());
    args.push(msg_file.path().to_string_lossy().into_owned());

    run_and_notify(
        ui,
        git,
        session,
        "Create tag",
        &args,
        &format!("created tag {name}"),
    )
}

pub fn tag_delete(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let tags = query::tags(git, &session.root)?;
    if tags.is_empty() {
        ui::error(ui, "Delete tags", "no tags exist")?;
        return Ok(());
    }

    let rows: Vec<MenuRow> = tags.iter().map(|t| MenuRow::new([t.clone()])).collect();
    let Some(picked) = ui::checklist(ui, "Delete tags", "mark tags to delete", &rows)? else {
        return Ok(());
    };
    if picked.is_empty() {
        ui::error(ui, "Delete tags", "no tags selected")?;
        return Ok(());
    }

    let mut args: Vec<String> = vec!["tag".into(), "-d".into()];
    args.extend(picked.iter().map(|i| tags[*i].clone()));

    run_and_notify(
        ui,
        git,
        session,
        "Delete tags",
        &args,
        &format!("deleted {} tag(s)", picked.len()),
    )
}

pub fn notes(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    loop {
        let rows = vec![
            MenuRow::new(["Show"]),
            MenuRow::new(["Add"]),
            MenuRow::new(["Remove"]),
            MenuRow::new(["Back"]),
        ];

        let Some(choice) = ui::menu(ui, "Notes", &session.branch, &rows)? else {
            return Ok(());
        };

        match choice {
            0 => run_and_view(ui, git, session, "Notes", ["notes", "list"])?,
            1 => {
                let Some(commit) = pick_commit(ui, git, session, cfg.history_limit, "Add note")?
                else {
                    continue;
                };
                let Some(message) = ui::input(ui, "Add note", "Note text", "")? else {
                    continue;
                };
                let message = message.trim().to_string();
                if message.is_empty() {
                    ui::error(ui, "Add note", "a note text is required")?;
                    continue;
                }
                run_and_notify(
                    ui,
                    git,
                    session,
                    "Add note",
                    ["notes", "add", "-m", message.as_str(), commit.hash.as_str()],
                    &format!("note added to {}", commit.hash),
                )?;
            }
            2 => {
                let Some(commit) =
                    pick_commit(ui, git, session, cfg.history_limit, "Remove note")?
                else {
                    continue;
                };
                run_and_notify(
                    ui,
                    git,
                    session,
                    "Remove note",
                    ["notes", "remove", commit.hash.as_str()],
                    &format!("note removed from {}", commit.hash),
                )?;
            }
            _ => return Ok(()),
        }
    }
}
