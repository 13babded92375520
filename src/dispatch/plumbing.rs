// The remaining odds and ends: submodules, bisect, configuration, and
// launching a shell in the repository.

use anyhow::Result;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use super::{run_and_notify, run_and_view};
use crate::config::Config;
use crate::git::GitRunner;
use crate::session::Session;
use crate::ui::{self, Field, MenuRow, Ui};

pub fn submodules(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    loop {
        let rows = vec![
            MenuRow::new(["Status"]),
            MenuRow::new(["Init"]),
            MenuRow::new(["Update"]),
            MenuRow::new(["Sync"]),
            MenuRow::new(["Back"]),
        ];

        let Some(choice) = ui::menu(ui, "Submodules", &session.display_name(), &rows)? else {
            return Ok(());
        };

        match choice {
            0 => run_and_view(ui, git, session, "Submodules", ["submodule", "status"])?,
            1 => run_and_notify(
                ui,
                git,
                session,
                "Submodules",
                ["submodule", "init"],
                "submodules initialized",
            )?,
            2 => run_and_notify(
                ui,
                git,
                session,
                "Submodules",
                ["submodule", "update", "--init", "--recursive"],
                "submodules updated",
            )?,
            3 => run_and_notify(
                ui,
                git,
                session,
                "Submodules",
                ["submodule", "sync"],
                "submodule URLs synchronized",
            )?,
            _ => return Ok(()),
        }
    }
}

pub fn bisect(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    loop {
        let rows = vec![
            MenuRow::new(["Start"]),
            MenuRow::new(["Mark current as good"]),
            MenuRow::new(["Mark current as bad"]),
            MenuRow::new(["Skip current"]),
            MenuRow::new(["Show log"]),
            MenuRow::new(["Reset (end session)"]),
            MenuRow::new(["Back"]),
        ];

        let Some(choice) = ui::menu(ui, "Bisect", &session.branch, &rows)? else {
            return Ok(());
        };

        match choice {
            0 => {
                let Some(values) = ui::form(
                    ui,
                    "Bisect start",
                    "",
                    vec![
                        Field::new("Bad ref (optional, default HEAD)"),
                        Field::new("Good ref (optional)"),
                    ],
                )?
                else {
                    continue;
                };

                let mut args: Vec<String> = vec!["bisect".into(), "start".into()];
                let bad = values[0].trim();
                let good = values[1].trim();
                if !bad.is_empty() {
                    args.push(bad.to_string());
                }
                if !good.is_empty() {
                    if bad.is_empty() {
                        // git's syntax is `bisect start <bad> <good>`
                        args.push("HEAD".to_string());
                    }
                    args.push(good.to_string());
                }

                run_and_notify(ui, git, session, "Bisect", &args, "bisect session started")?;
            }
            1 => run_and_notify(ui, git, session, "Bisect", ["bisect", "good"], "marked good")?,
            2 => run_and_notify(ui, git, session, "Bisect", ["bisect", "bad"], "marked bad")?,
            3 => run_and_notify(ui, git, session, "Bisect", ["bisect", "skip"], "skipped")?,
            4 => run_and_view(ui, git, session, "Bisect log", ["bisect", "log"])?,
            5 => run_and_notify(
                ui,
                git,
                session,
                "Bisect",
                ["bisect", "reset"],
                "bisect session ended",
            )?,
            _ => return Ok(()),
        }
    }
}

pub fn config(ui: &mut Ui, git: &GitRunner, session: &Session) -> Result<()> {
    loop {
        let rows = vec![
            MenuRow::new(["List"]),
            MenuRow::new(["Set value"]),
            MenuRow::new(["Unset value"]),
            MenuRow::new(["Back"]),
        ];

        let Some(choice) = ui::menu(ui, "Configuration", &session.display_name(), &rows)? else {
            return Ok(());
        };

        match choice {
            0 => run_and_view(ui, git, session, "Configuration", ["config", "--list"])?,
            1 => {
                let Some(values) = ui::form(
                    ui,
                    "Set value",
                    "",
                    vec![Field::new("Key"), Field::new("Value")],
                )?
                else {
                    continue;
                };
                let key = values[0].trim().to_string();
                let value = values[1].trim().to_string();
                if key.is_empty() || value.is_empty() {
                    ui::error(ui, "Set value", "key and value are required")?;
                    continue;
                }
                run_and_notify(
                    ui,
                    git,
                    session,
                    "Set value",
                    ["config", key.as_str(), value.as_str()],
                    &format!("set {key}"),
                )?;
            }
            2 => {
                let Some(key) = ui::input(ui, "Unset value", "Key", "")? else {
                    continue;
                };
                let key = key.trim().to_string();
                if key.is_empty() {
                    ui::error(ui, "Unset value", "a key is required")?;
                    continue;
                }
                run_and_notify(
                    ui,
                    git,
                    session,
                    "Unset value",
                    ["config", "--unset", key.as_str()],
                    &format!("unset {key}"),
                )?;
            }
            _ => return Ok(()),
        }
    }
}

/// Launch a terminal emulator in the repository directory. Best effort:
/// the configured command, then `$TERMINAL`, then a list of common
/// emulators probed on PATH.
pub fn open_shell(ui: &mut Ui, cfg: &Config, session: &Session) -> Result<()> {
    let Some(command) = terminal_command(cfg) else {
        ui::error(
            ui,
            "Open shell",
            "no terminal emulator found\nset `terminal` in config.toml",
        )?;
        return Ok(());
    };

    let Some((program, args)) = command.split_first() else {
        return Ok(());
    };

    debug!(program = %program, "launching terminal emulator");

    match Command::new(program)
        .args(args)
        .current_dir(&session.root)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => ui::notice(ui, "Open shell", &format!("launched {program}")),
        Err(e) => {
            warn!(program = %program, error = %e, "terminal emulator failed to start");
            ui::error(ui, "Open shell", &format!("failed to launch {program}: {e}"))
        }
    }
}

fn terminal_command(cfg: &Config) -> Option<Vec<String>> {
    if let Some(configured) = &cfg.terminal {
        let parts: Vec<String> = configured.split_whitespace().map(str::to_owned).collect();
        if !parts.is_empty() {
            return Some(parts);
        }
    }

    if let Ok(term) = std::env::var("TERMINAL") {
        if !term.trim().is_empty() {
            return Some(vec![term]);
        }
    }

    const CANDIDATES: [&str; 6] = [
        "x-terminal-emulator",
        "gnome-terminal",
        "konsole",
        "alacritty",
        "kitty",
        "xterm",
    ];

    CANDIDATES
        .iter()
        .find(|c| which::which(c).is_ok())
        .map(|c| vec![c.to_string()])
}
