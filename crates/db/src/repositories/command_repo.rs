//! PostgreSQL-backed repository for the `commands` table.

use async_trait::async_trait;
use commander_core::types::DbId;
use sqlx::PgPool;

use crate::models::command::{Command, NewCommand};
use crate::repositories::change_set::{ChangeSet, PendingCommand, StagedChange};
use crate::repositories::{CommandRepo, CommandStore, RepoError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, how_to, platform, command_line";

/// Store handle wrapping the connection pool.
#[derive(Clone)]
pub struct PgCommandStore {
    pool: PgPool,
}

impl PgCommandStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommandStore for PgCommandStore {
    async fn begin(&self) -> Result<Box<dyn CommandRepo>, RepoError> {
        Ok(Box::new(PgCommandRepo::new(self.pool.clone())))
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

/// Unit of work that buffers writes until `save_changes` runs them in one
/// transaction.
pub struct PgCommandRepo {
    pool: PgPool,
    changes: ChangeSet,
}

impl PgCommandRepo {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            changes: ChangeSet::default(),
        }
    }
}

#[async_trait]
impl CommandRepo for PgCommandRepo {
    async fn get_all_commands(&self) -> Result<Vec<Command>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM commands ORDER BY id");
        let commands = sqlx::query_as::<_, Command>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(commands)
    }

    async fn get_command_by_id(&self, id: DbId) -> Result<Option<Command>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM commands WHERE id = $1");
        let command = sqlx::query_as::<_, Command>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(command)
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

        let insert = format!(
            "INSERT INTO commands (how_to, platform, command_line)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;
        let mut affected: u64 = 0;
        let mut inserted = Vec::new();

        for change in self.changes.staged() {
            match change {
                StagedChange::Insert { slot, command } => {
                    let row = sqlx::query_as::<_, Command>(&insert)
                        .bind(&command.how_to)
                        .bind(&command.platform)
                        .bind(&command.command_line)
                        .fetch_one(&mut *tx)
                        .await?;
                    affected += 1;
                    inserted.push((*slot, row));
                }
                StagedChange::Update(command) => {
                    let result = sqlx::query(
                        "UPDATE commands SET
                            how_to = $2,
                            platform = $3,
                            command_line = $4
                         WHERE id = $1",
                    )
                    .bind(command.id)
                    .bind(&command.how_to)
                    .bind(&command.platform)
                    .bind(&command.command_line)
                    .execute(&mut *tx)
                    .await?;
                    affected += result.rows_affected();
                }
                StagedChange::Delete(id) => {
                    let result = sqlx::query("DELETE FROM commands WHERE id = $1")
                        .bind(*id)
                        .execute(&mut *tx)
                        .await?;
                    affected += result.rows_affected();
                }
            }
        }

        tx.commit().await?;
        self.changes.complete(inserted);
        tracing::debug!(affected, "Committed staged command changes");
        Ok(affected > 0)
    }

    fn committed(&self, pending: PendingCommand) -> Option<Command> {
        self.changes.committed(pending)
    }
}
