// Stash operations.

use anyhow::Result;

use super::pick::pick_stash;
use super::{run_and_notify, run_and_view};
use crate::git::GitRunner;
use crate::session::Session;
use crate::ui::{self, MenuRow, Ui};

pub fn save(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(message) = ui::input(ui, "Stash save", "Message (optional)", "")? else {
        return Ok(());
    };
    let message = message.trim().to_string();

    let mut args: Vec<String> = vec!["stash".into(), "push".into()];
    if !message.is_empty() {
        args.push("-m".into());
        args.push(message);
    }

    run_and_notify(ui, git, session, "Stash save", &args, "changes stashed")
}

pub fn list(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    run_and_view(ui, git, session, "Stash list", ["stash", "list"])
}

/// Apply, pop or drop one stash entry.
pub fn apply(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    let Some(entry) = pick_stash(ui, git, session, "Stash apply")? else {
        return Ok(());
    };

    let rows = vec![
        MenuRow::new(["Apply", "keep the stash entry"]),
        MenuRow::new(["Pop", "apply and drop the entry"]),
        MenuRow::new(["Drop", "delete without applying"]).accent(ui::Accent::Warn),
    ];
    let Some(choice) = ui::menu(ui, "Stash apply", &entry.id, &rows)? else {
        return Ok(());
    };

    let action = ["apply", "pop", "drop"][choice];

    if action == "drop"
        && !ui::confirm(
            ui,
            "Stash apply",
            &format!("Drop {} without applying it?", entry.id),
        )?
    {
        return Ok(());
    }

    run_and_notify(
        ui,
        git,
        session,
        "Stash apply",
        ["stash", action, entry.id.as_str()],
        &format!("{action} {}", entry.id),
    )
}
