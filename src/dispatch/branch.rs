// Branch-level operations: checkout, branch creation, merge, rebase.

use anyhow::Result;

use super::guard::dirty_tree_guard;
use super::pick::{pick_branch, pick_commit};
use super::run_and_notify;
use crate::config::Config;
use crate::git::query::BranchScope;
use crate::git::{GitRunner, RawArgs};
use crate::session::Session;
use crate::ui::{self, Field, MenuRow, Ui};

pub fn checkout(ui: &mut Ui, git: &GitRunner, cfg: &Config, session: &Session) -> Result<()> {
    let rows = vec![
        MenuRow::new(["A branch"]),
        MenuRow::new(["A commit (detached HEAD)"]),
    ];
    let Some(kind) = ui::menu(ui, "Checkout", &session.branch, &rows)? else {
        return Ok(());
    };

    let target = match kind {
        0 => {
            let Some(branch) =
                pick_branch(ui, git, session, BranchScope::LocalAndRemote, "Checkout")?
            else {
                return Ok(());
            };
            branch.name
        }
        _ => {
            let Some(commit) = pick_commit(ui, git, session, cfg.history_limit, "Checkout")? else {
                return Ok(());
            };
            commit.hash
        }
    };

    if !dirty_tree_guard(ui, git, session, "Checkout")? {
        return Ok(());
    }

    run_and_notify(
        ui,
        git,
        session,
        "Checkout",
        ["checkout", target.as_str()],
        &format!("checked out {target}"),
    )
}

pub fn new_branch(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(values) = ui::form(
        ui,
        "New branch",
        &session.branch,
        vec![Field::new("Name"), Field::new("Start point (optional)")],
    )?
    else {
        return Ok(());
    };

    let name = values[0].trim().to_string();
    if name.is_empty() {
        ui::error(ui, "New branch", "a branch name is required")?;
        return Ok(());
    }
    let base = values[1].trim().to_string();

    let switch = ui::confirm(ui, "New branch", &format!("Switch to {name} after creating it?"))?;

    let mut args: Vec<String> = if switch {
        vec!["checkout".into(), "-b".into(), name.clone()]
    } else {
        vec!["branch".into(), name.clone()]
    };
    if !base.is_empty() {
        args.push(base);
    }

    run_and_notify(
        ui,
        git,
        session,
        "New branch",
        &args,
        &format!("created branch {name}"),
    )
}

pub fn merge(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(target) = pick_branch(ui, git, session, BranchScope::LocalAndRemote, "Merge")? else {
        return Ok(());
    };

    let Some(values) = ui::form(
        ui,
        "Merge",
        &format!("{} into {}", target.name, session.branch),
        vec![
            Field::new("Strategy (optional)"),
            Field::new("Extra options (optional)"),
        ],
    )?
    else {
        return Ok(());
    };

    if !dirty_tree_guard(ui, git, session, "Merge")? {
        return Ok(());
    }

    let mut args: Vec<String> = vec!["merge".into()];
    let strategy = values[0].trim();
    if !strategy.is_empty() {
        args.push(format!("--strategy={strategy}"));
    }
    args.extend(RawArgs::parse(&values[1]).as_slice().iter().cloned());
    args.push(target.name.clone());

    run_and_notify(
        ui,
        git,
        session,
        "Merge",
        &args,
        &format!("merged {}", target.name),
    )
}

pub fn rebase(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(target) = pick_branch(ui, git, session, BranchScope::LocalAndRemote, "Rebase")? else {
        return Ok(());
    };

    let Some(extra) = ui::input(ui, "Rebase", "Extra options (optional)", "")? else {
        return Ok(());
    };

    if !dirty_tree_guard(ui, git, session, "Rebase")? {
        return Ok(());
    }

    let mut args: Vec<String> = vec!["rebase".into()];
    args.extend(RawArgs::parse(&extra).as_slice().iter().cloned());
    args.push(target.name.clone());

    run_and_notify(
        ui,
        git,
        session,
        "Rebase",
        &args,
        &format!("rebased onto {}", target.name),
    )
}
