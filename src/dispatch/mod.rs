// The operation menu. Each variant is one leaf handler; handlers share
// nothing beyond the session and the generic collect → guard → build →
// execute → display template.

pub mod guard;
pub mod pick;

mod branch;
mod history;
mod plumbing;
mod remote;
mod stash;
mod worktree;

use anyhow::Result;
use std::ffi::OsStr;
use tracing::debug;

use crate::config::Config;
use crate::git::GitRunner;
use crate::session::Session;
use crate::ui::{self, MenuRow, Ui};

/// Why the dispatcher loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ChangeRepository,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Status,
    Stage,
    Unstage,
    Commit,
    Pull,
    Fetch,
    Push,
    Checkout,
    NewBranch,
    Merge,
    Rebase,
    Log,
    Diff,
    TagCreate,
    TagDelete,
    StashSave,
    StashApply,
    StashList,
    Reset,
    Revert,
    CherryPick,
    Rollback,
    Submodules,
    Bisect,
    ConfigEdit,
    Clean,
    Remotes,
    Notes,
    OpenShell,
    ChangeRepository,
    Quit,
}

impl Op {
    pub const ALL: [Op; 31] = [
        Op::Status,
        Op::Stage,
        Op::Unstage,
        Op::Commit,
        Op::Pull,
        Op::Fetch,
        Op::Push,
        Op::Checkout,
        Op::NewBranch,
        Op::Merge,
        Op::Rebase,
        Op::Log,
        Op::Diff,
        Op::TagCreate,
        Op::TagDelete,
        Op::StashSave,
        Op::StashApply,
        Op::StashList,
        Op::Reset,
        Op::Revert,
        Op::CherryPick,
        Op::Rollback,
        Op::Submodules,
        Op::Bisect,
        Op::ConfigEdit,
        Op::Clean,
        Op::Remotes,
        Op::Notes,
        Op::OpenShell,
        Op::ChangeRepository,
        Op::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Op::Status => "Status",
            Op::Stage => "Stage files",
            Op::Unstage => "Unstage files",
            Op::Commit => "Commit",
            Op::Pull => "Pull",
            Op::Fetch => "Fetch",
            Op::Push => "Push",
            Op::Checkout => "Checkout",
            Op::NewBranch => "New branch",
            Op::Merge => "Merge",
            Op::Rebase => "Rebase",
            Op::Log => "Log",
            Op::Diff => "Diff",
            Op::TagCreate => "Create tag",
            Op::TagDelete => "Delete tags",
            Op::StashSave => "Stash save",
            Op::StashApply => "Stash apply",
            Op::StashList => "Stash list",
            Op::Reset => "Reset",
            Op::Revert => "Revert",
            Op::CherryPick => "Cherry-pick",
            Op::Rollback => "Roll back files",
            Op::Submodules => "Submodules",
            Op::Bisect => "Bisect",
            Op::ConfigEdit => "Configuration",
            Op::Clean => "Clean working tree",
            Op::Remotes => "Remotes",
            Op::Notes => "Notes",
            Op::OpenShell => "Open shell",
            Op::ChangeRepository => "Change repository",
            Op::Quit => "Quit",
        }
    }
}

/// The dispatcher loop. Runs until the user quits or asks for another
/// repository. Operation failures are shown and the loop continues.
pub fn run(
    ui: &mut Ui,
    git: &GitRunner,
    cfg: &Config,
    session: &mut Session,
) -> Result<Outcome> {
    loop {
        session.refresh(git);

        let rows: Vec<MenuRow> = Op::ALL.iter().map(|op| MenuRow::new([op.label()])).collect();
        let context = format!("{} [{}]", session.root.display(), session.branch);

        let Some(choice) = ui::menu(ui, "gitdeck", &context, &rows)? else {
            return Ok(Outcome::Quit);
        };

        let op = Op::ALL[choice];
        debug!(op = op.label(), repo = %session.root.display(), "dispatching");

        let result = match op {
            Op::Status => worktree::status(ui, git, session),
            Op::Stage => worktree::stage(ui, git, session),
            Op::Unstage => worktree::unstage(ui, git, session),
            Op::Commit => worktree::commit(ui, git, session),
            Op::Pull => remote::pull(ui, git, session),
            Op::Fetch => remote::fetch(ui, git, session),
            Op::Push => remote::push(ui, git, session),
            Op::Checkout => branch::checkout(ui, git, cfg, session),
            Op::NewBranch => branch::new_branch(ui, git, session),
            Op::Merge => branch::merge(ui, git, session),
            Op::Rebase => branch::rebase(ui, git, session),
            Op::Log => history::log(ui, git, cfg, session),
            Op::Diff => history::diff(ui, git, cfg, session),
            Op::TagCreate => history::tag_create(ui, git, cfg, session),
            Op::TagDelete => history::tag_delete(ui, git, session),
            Op::StashSave => stash::save(ui, git, session),
            Op::StashApply => stash::apply(ui, git, session),
            Op::StashList => stash::list(ui, git, session),
            Op::Reset => history::reset(ui, git, cfg, session),
            Op::Revert => history::revert(ui, git, cfg, session),
            Op::CherryPick => history::cherry_pick(ui, git, cfg, session),
            Op::Rollback => worktree::rollback(ui, git, cfg, session),
            Op::Submodules => plumbing::submodules(ui, git, session),
            Op::Bisect => plumbing::bisect(ui, git, session),
            Op::ConfigEdit => plumbing::config(ui, git, session),
            Op::Clean => worktree::clean(ui, git, session),
            Op::Remotes => remote::remotes(ui, git, session),
            Op::Notes => history::notes(ui, git, cfg, session),
            Op::OpenShell => plumbing::open_shell(ui, cfg, session),
            Op::ChangeRepository => return Ok(Outcome::ChangeRepository),
            Op::Quit => return Ok(Outcome::Quit),
        };

        // Failures never leave the loop; they are shown and the menu
        // comes back.
        if let Err(e) = result {
            ui::error(ui, op.label(), &format!("{e:#}"))?;
        }
    }
}

/// Execute and report a state-changing operation: short notice on
/// success (or the captured output when it is small enough to matter),
/// error dialog with the captured output on failure.
pub(crate) fn run_and_notify<I, S>(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    title: &str,
    args: I,
    ok_msg: &str,
) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let out = git.run(&session.root, args)?;

    if !out.success {
        ui::error(ui, title, out.trimmed())?;
        return Ok(());
    }

    let text = out.trimmed();
    if text.is_empty() {
        ui::notice(ui, title, ok_msg)?;
    } else if text.lines().count() <= 20 {
        ui::notice(ui, title, text)?;
    } else {
        ui::view(ui, title, "", text)?;
    }

    Ok(())
}

/// Execute and report an inspection operation: scrollable viewer on
/// success, error dialog on failure.
pub(crate) fn run_and_view<I, S>(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    title: &str,
    args: I,
) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let out = git.run(&session.root, args)?;

    if !out.success {
        ui::error(ui, title, out.trimmed())?;
        return Ok(());
    }

    let text = if out.trimmed().is_empty() {
        "(no output)"
    } else {
        out.trimmed()
    };
    ui::view(ui, title, &session.display_name(), text)
}
