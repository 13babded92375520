// Remote operations: pull, fetch, push, remote management.

use anyhow::Result;

use super::guard::dirty_tree_guard;
use super::pick::pick_remote;
use super::{run_and_notify, run_and_view};
use crate::git::{GitRunner, RawArgs};
use crate::session::Session;
use crate::ui::{self, Field, MenuRow, Ui};

pub fn pull(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(values) = ui::form(
        ui,
        "Pull",
        &session.branch,
        vec![
            Field::with_value("Remote", "origin"),
            Field::with_value("Branch", &session.branch),
            Field::new("Extra options (optional)"),
        ],
    )?
    else {
        return Ok(());
    };

    let remote = values[0].trim().to_string();
    let branch = values[1].trim().to_string();
    if remote.is_empty() || branch.is_empty() {
        ui::error(ui, "Pull", "remote and branch are required")?;
        return Ok(());
    }

    if !dirty_tree_guard(ui, git, session, "Pull")? {
        return Ok(());
    }

    let mut args: Vec<String> = vec!["pull".into()];
    args.extend(RawArgs::parse(&values[2]).as_slice().iter().cloned());
    args.push(remote.clone());
    args.push(branch.clone());

    run_and_notify(
        ui,
        git,
        session,
        "Pull",
        &args,
        &format!("pulled {branch} from {remote}"),
    )
}

pub fn fetch(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(remote) = pick_remote(ui, git, session, "Fetch")? else {
        return Ok(());
    };

    run_and_notify(
        ui,
        git,
        session,
        "Fetch",
        ["fetch", remote.as_str()],
        &format!("fetched {remote}"),
    )
}

pub fn push(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(values) = ui::form(
        ui,
        "Push",
        &session.branch,
        vec![
            Field::with_value("Remote", "origin"),
            Field::with_value("Branch", &session.branch),
            Field::new("Extra options (optional)"),
        ],
    )?
    else {
        return Ok(());
    };

    let remote = values[0].trim().to_string();
    let branch = values[1].trim().to_string();
    if remote.is_empty() || branch.is_empty() {
        ui::error(ui, "Push", "remote and branch are required")?;
        return Ok(());
    }

    let mut args: Vec<String> = vec!["push".into()];
    args.extend(RawArgs::parse(&values[2]).as_slice().iter().cloned());
    args.push(remote.clone());
    args.push(branch.clone());

    run_and_notify(
        ui,
        git,
        session,
        "Push",
        &args,
        &format!("pushed {branch} to {remote}"),
    )
}

pub fn remotes(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    loop {
        let rows = vec![
            MenuRow::new(["List"]),
            MenuRow::new(["Add"]),
            MenuRow::new(["Remove"]),
            MenuRow::new(["Set URL"]),
            MenuRow::new(["Back"]),
        ];

        let Some(choice) = ui::menu(ui, "Remotes", &session.display_name(), &rows)? else {
            return Ok(());
        };

        match choice {
            0 => run_and_view(ui, git, session, "Remotes", ["remote", "-v"])?,
            1 => {
                let Some(values) = ui::form(
                    ui,
                    "Add remote",
                    "",
                    vec![Field::new("Name"), Field::new("URL")],
                )?
                else {
                    continue;
                };
                let name = values[0].trim().to_string();
                let url = values[1].trim().to_string();
                if name.is_empty() || url.is_empty() {
                    ui::error(ui, "Add remote", "name and URL are required")?;
                    continue;
                }
                run_and_notify(
                    ui,
                    git,
                    session,
                    "Add remote",
                    ["remote", "add", name.as_str(), url.as_str()],
                    &format!("added remote {name}"),
                )?;
            }
            2 => {
                let Some(name) = pick_remote(ui, git, session, "Remove remote")? else {
                    continue;
                };
                if !ui::confirm(ui, "Remove remote", &format!("Remove remote {name}?"))? {
                    continue;
                }
                run_and_notify(
                    ui,
                    git,
                    session,
                    "Remove remote",
                    ["remote", "remove", name.as_str()],
                    &format!("removed remote {name}"),
                )?;
            }
            3 => {
                let Some(name) = pick_remote(ui, git, session, "Set remote URL")? else {
                    continue;
                };
                let Some(url) = ui::input(ui, "Set remote URL", "New URL", "")? else {
                    continue;
                };
                let url = url.trim().to_string();
                if url.is_empty() {
                    ui::error(ui, "Set remote URL", "a URL is required")?;
                    continue;
                }
                run_and_notify(
                    ui,
                    git,
                    session,
                    "Set remote URL",
                    ["remote", "set-url", name.as_str(), url.as_str()],
                    &format!("updated {name}"),
                )?;
            }
            _ => return Ok(()),
        }
    }
}
