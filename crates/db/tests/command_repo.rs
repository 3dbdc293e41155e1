//! Integration tests for the PostgreSQL command repository.
//!
//! These need a reachable PostgreSQL instance via `DATABASE_URL`; run them
//! with `cargo test -p commander-db -- --ignored`.

use commander_db::models::command::{Command, NewCommand};
use commander_db::repositories::{CommandRepo, CommandStore, PgCommandStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_command(how_to: &str) -> NewCommand {
    NewCommand {
        how_to: how_to.to_string(),
        platform: "Linux".to_string(),
        command_line: "ls -la".to_string(),
    }
}

async fn seed(store: &PgCommandStore, how_to: &str) -> Command {
    let mut repo = store.begin().await.unwrap();
    let pending = repo.create_command(new_command(how_to));
    assert!(repo.save_changes().await.unwrap());
    repo.committed(pending).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    commander_db::health_check(&pool).await.unwrap();
    PgCommandStore::new(pool).health_check().await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_assigns_id_on_save(pool: PgPool) {
    let store = PgCommandStore::new(pool);
    let mut repo = store.begin().await.unwrap();

    let pending = repo.create_command(new_command("List files"));
    assert!(repo.committed(pending).is_none());
    assert!(repo.get_all_commands().await.unwrap().is_empty());

    assert!(repo.save_changes().await.unwrap());
    let created = repo.committed(pending).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.how_to, "List files");

    let fetched = repo.get_command_by_id(created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_identical_creates_get_distinct_ids(pool: PgPool) {
    let store = PgCommandStore::new(pool);
    let a = seed(&store, "same").await;
    let b = seed(&store, "same").await;
    assert_ne!(a.id, b.id);

    let repo = store.begin().await.unwrap();
    let all = repo.get_all_commands().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].id < all[1].id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_missing_returns_none(pool: PgPool) {
    let store = PgCommandStore::new(pool);
    let repo = store.begin().await.unwrap();
    assert!(repo.get_command_by_id(999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_and_delete(pool: PgPool) {
    let store = PgCommandStore::new(pool);
    let mut command = seed(&store, "Original").await;

    let mut repo = store.begin().await.unwrap();
    command.how_to = "Updated".to_string();
    repo.update_command(&command);
    assert!(repo.save_changes().await.unwrap());

    let fetched = repo.get_command_by_id(command.id).await.unwrap().unwrap();
    assert_eq!(fetched.how_to, "Updated");

    repo.delete_command(&command);
    assert!(repo.save_changes().await.unwrap());
    assert!(repo.get_command_by_id(command.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_failed_commit_applies_nothing(pool: PgPool) {
    let store = PgCommandStore::new(pool);
    let mut repo = store.begin().await.unwrap();

    let ok = repo.create_command(new_command("ok"));
    // Exceeds VARCHAR(250), so the second insert fails and rolls back the first.
    repo.create_command(new_command(&"x".repeat(251)));
    assert!(repo.save_changes().await.is_err());

    assert!(repo.committed(ok).is_none());
    assert!(repo.get_all_commands().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_failed_commit_keeps_staged_changes(pool: PgPool) {
    let store = PgCommandStore::new(pool);
    let mut command = seed(&store, "Original").await;

    let mut repo = store.begin().await.unwrap();
    command.how_to = "x".repeat(251);
    repo.update_command(&command);
    assert!(repo.save_changes().await.is_err());

    // The bad update is still staged, so retrying fails again rather than
    // reporting an empty save.
    assert!(repo.save_changes().await.is_err());

    let stored = repo.get_command_by_id(command.id).await.unwrap().unwrap();
    assert_eq!(stored.how_to, "Original");
}
