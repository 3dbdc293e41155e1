//! Repository layer.
//!
//! A [`CommandStore`] is shared across requests and hands out one
//! [`CommandRepo`] unit of work per request. Reads go straight to the
//! store; creates, updates and deletes are staged and only reach the store
//! when [`CommandRepo::save_changes`] commits them as a single unit.

pub mod change_set;
pub mod command_repo;
pub mod memory;

use async_trait::async_trait;
use commander_core::types::DbId;

use crate::models::command::{Command, NewCommand};

pub use change_set::PendingCommand;
pub use command_repo::{PgCommandRepo, PgCommandStore};
pub use memory::{InMemoryCommandRepo, InMemoryCommandStore};

/// Errors raised by a repository implementation.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The id sequence has no values left.
    #[error("No command ids left to assign")]
    IdsExhausted,
}

/// Shared handle to a command store.
#[async_trait]
pub trait CommandStore: Send + Sync {
    /// Open a unit of work scoped to one request.
    async fn begin(&self) -> Result<Box<dyn CommandRepo>, RepoError>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> Result<(), RepoError>;
}

/// A unit of work over the `commands` table.
#[async_trait]
pub trait CommandRepo: Send + Sync {
    /// Every stored command, ordered by id.
    async fn get_all_commands(&self) -> Result<Vec<Command>, RepoError>;

    /// The command with `id`, or `None` if there is none.
    async fn get_command_by_id(&self, id: DbId) -> Result<Option<Command>, RepoError>;

    /// Stage an insert. Resolve the returned ticket with [`Self::committed`]
    /// after [`Self::save_changes`] to obtain the assigned id.
    fn create_command(&mut self, command: NewCommand) -> PendingCommand;

    /// Stage a write of the mutable fields of `command`.
    fn update_command(&mut self, command: &Command);

    /// Stage removal of `command`.
    fn delete_command(&mut self, command: &Command);

    /// Commit every staged change atomically.
    ///
    /// Returns `true` if at least one row was affected. On error nothing is
    /// applied and the staged changes are kept.
    async fn save_changes(&mut self) -> Result<bool, RepoError>;

    /// The committed row for a staged insert, once saved.
    fn committed(&self, pending: PendingCommand) -> Option<Command>;
}
