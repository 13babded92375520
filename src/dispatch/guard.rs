use anyhow::Result;

use crate::git::{query, GitRunner};
use crate::session::Session;
use crate::ui::{self, Ui};

/// Pre-check for operations that can overwrite or discard uncommitted
/// work (checkout, merge, rebase, pull, hard reset, clean, rollback).
/// Returns `true` when the operation may proceed. When it returns
/// `false` the caller must not run the guarded command.
pub fn dirty_tree_guard(
    ui: &mut Ui,
    git: &GitRunner,
    session: &Session,
    action: &str,
) -> Result<bool> {
    let dirty = query::is_dirty(git, &session.root)?;
    if !dirty {
        return Ok(true);
    }

    let confirmed = ui::confirm(
        ui,
        "Uncommitted changes",
        &format!(
            "The working tree or index has uncommitted changes.\n\
             {action} may overwrite or discard them.\n\
             Continue anyway?"
        ),
    )?;

    Ok(may_proceed(dirty, confirmed))
}

/// The guard decision on its own: a clean tree always proceeds, a dirty
/// one only with explicit confirmation.
pub fn may_proceed(dirty: bool, confirmed: bool) -> bool {
    !dirty || confirmed
}

#[cfg(test)]
mod tests {
    use super::may_proceed;

    #[test]
    fn clean_tree_always_proceeds() {
        assert!(may_proceed(false, false));
        assert!(may_proceed(false, true));
    }

    #[test]
    fn dirty_tree_needs_confirmation() {
        assert!(!may_proceed(true, false));
        assert!(may_proceed(true, true));
    }
}
