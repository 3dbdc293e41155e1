//! In-memory command store.
//!
//! Honors the same staged-write contract as the PostgreSQL store. Used by
//! the API integration tests and anywhere a database is not wanted.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use commander_core::types::DbId;
use tokio::sync::Mutex;

use crate::models::command::{Command, NewCommand};
use crate::repositories::change_set::{ChangeSet, PendingCommand, StagedChange};
use crate::repositories::{CommandRepo, CommandStore, RepoError};

struct Table {
    rows: BTreeMap<DbId, Command>,
    /// `None` once the sequence is exhausted.
    next_id: Option<DbId>,
}

/// Cloneable handle to a shared in-memory table.
#[derive(Clone)]
pub struct InMemoryCommandStore {
    table: Arc<Mutex<Table>>,
}

impl Default for InMemoryCommandStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCommandStore {
    /// An empty store. Ids start at 1, like a BIGSERIAL column.
    pub fn new() -> Self {
        Self::with_commands(Vec::new())
    }

    /// A store pre-populated with `commands`, keeping their ids.
    pub fn with_commands(commands: impl IntoIterator<Item = Command>) -> Self {
        let rows: BTreeMap<DbId, Command> = commands.into_iter().map(|c| (c.id, c)).collect();
        let next_id = match rows.keys().next_back() {
            Some(max) => max.checked_add(1).map(|id| id.max(1)),
            None => Some(1),
        };
        Self {
            table: Arc::new(Mutex::new(Table { rows, next_id })),
        }
    }

    /// Copy of every stored row, ordered by id.
    pub async fn snapshot(&self) -> Vec<Command> {
        self.table.lock().await.rows.values().cloned().collect()
    }
}

#[async_trait]
impl CommandStore for InMemoryCommandStore {
    async fn begin(&self) -> Result<Box<dyn CommandRepo>, RepoError> {
        Ok(Box::new(InMemoryCommandRepo {
            table: Arc::clone(&self.table),
            changes: ChangeSet::default(),
        }))
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Unit of work over an [`InMemoryCommandStore`].
pub struct InMemoryCommandRepo {
    table: Arc<Mutex<Table>>,
    changes: ChangeSet,
}

#[async_trait]
impl CommandRepo for InMemoryCommandRepo {
    async fn get_all_commands(&self) -> Result<Vec<Command>, RepoError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn get_command_by_id(&self, id: DbId) -> Result<Option<Command>, RepoError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    fn create_command(&mut self, command: NewCommand) -> PendingCommand {
        self.changes.stage_insert(command)
    }

    fn update_command(&mut self, command: &Command) {
        self.changes.stage_update(command);
    }

    fn delete_command(&mut self, command: &Command) {
        self.changes.stage_delete(command);
    }

    async fn save_changes(&mut self) -> Result<bool, RepoError> {
        if self.changes.is_empty() {
            return Ok(false);
        }

        let mut table = self.table.lock().await;
        let mut rows = table.rows.clone();
        let mut next_id = table.next_id;
        let mut affected: u64 = 0;
        let mut inserted = Vec::new();

        for change in self.changes.staged() {
            match change {
                StagedChange::Insert { slot, command } => {
                    let id = next_id.ok_or(RepoError::IdsExhausted)?;
                    next_id = id.checked_add(1);
                    let row = Command {
                        id,
                        how_to: command.how_to.clone(),
                        platform: command.platform.clone(),
                        command_line: command.command_line.clone(),
                    };
                    rows.insert(row.id, row.clone());
                    affected += 1;
                    inserted.push((*slot, row));
                }
                StagedChange::Update(command) => {
                    if let Some(existing) = rows.get_mut(&command.id) {
                        *existing = command.clone();
                        affected += 1;
                    }
                }
                StagedChange::Delete(id) => {
                    if rows.remove(id).is_some() {
                        affected += 1;
                    }
                }
            }
        }

        table.rows = rows;
        table.next_id = next_id;
        drop(table);

        self.changes.complete(inserted);
        tracing::debug!(affected, "Committed staged command changes");
        Ok(affected > 0)
    }

    fn committed(&self, pending: PendingCommand) -> Option<Command> {
        self.changes.committed(pending)
    }
}
