//! Staging buffer shared by the repository implementations.

use commander_core::types::DbId;

use crate::models::command::{Command, NewCommand};

/// Ticket for a staged insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCommand(usize);

/// A change waiting for `save_changes`.
#[derive(Debug, Clone)]
pub enum StagedChange {
    Insert { slot: usize, command: NewCommand },
    Update(Command),
    Delete(DbId),
}

/// Ordered staged changes plus the rows produced by committed inserts.
#[derive(Debug, Default)]
pub struct ChangeSet {
    staged: Vec<StagedChange>,
    created: Vec<Option<Command>>,
}

impl ChangeSet {
    pub fn stage_insert(&mut self, command: NewCommand) -> PendingCommand {
        let slot = self.created.len();
        self.created.push(None);
        self.staged.push(StagedChange::Insert { slot, command });
        PendingCommand(slot)
    }

    pub fn stage_update(&mut self, command: &Command) {
        self.staged.push(StagedChange::Update(command.clone()));
    }

    pub fn stage_delete(&mut self, command: &Command) {
        self.staged.push(StagedChange::Delete(command.id));
    }

    pub fn staged(&self) -> &[StagedChange] {
        &self.staged
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Record the rows returned by committed inserts and clear the stage.
    pub fn complete(&mut self, inserted: Vec<(usize, Command)>) {
        for (slot, command) in inserted {
            if let Some(entry) = self.created.get_mut(slot) {
                *entry = Some(command);
            }
        }
        self.staged.clear();
    }

    pub fn committed(&self, pending: PendingCommand) -> Option<Command> {
        self.created.get(pending.0).cloned().flatten()
    }
}
