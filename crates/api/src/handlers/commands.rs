//! Handlers for the `/commands` resource.
//!
//! Every handler opens one unit of work on the command store. Mutating
//! handlers look the record up first so a missing id is reported before
//! anything is staged.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use commander_core::error::CoreError;
use commander_core::types::DbId;
use commander_core::validation::{validate_input, FieldErrors};
use commander_db::models::command::{
    Command, CommandCreateDto, CommandReadDto, CommandUpdateDto, NewCommand,
};
use commander_db::repositories::CommandRepo;
use json_patch::Patch;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::CommandId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a command or fail with `NotFound`.
async fn ensure_command_exists(repo: &dyn CommandRepo, id: DbId) -> AppResult<Command> {
    repo.get_command_by_id(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Command",
            id,
        })
    })
}

fn location_of(id: DbId) -> String {
    format!("/api/commands/{id}")
}

// ---------------------------------------------------------------------------
// GET /api/commands
// ---------------------------------------------------------------------------

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CommandReadDto>>> {
    let repo = state.store.begin().await?;
    let commands: Vec<CommandReadDto> = repo
        .get_all_commands()
        .await?
        .into_iter()
        .map(CommandReadDto::from)
        .collect();
    tracing::debug!(count = commands.len(), "Listed commands");
    Ok(Json(commands))
}

// ---------------------------------------------------------------------------
// GET /api/commands/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    CommandId(id): CommandId,
) -> AppResult<Json<CommandReadDto>> {
    let repo = state.store.begin().await?;
    let command = ensure_command_exists(repo.as_ref(), id).await?;
    Ok(Json(CommandReadDto::from(command)))
}

// ---------------------------------------------------------------------------
// POST /api/commands
// ---------------------------------------------------------------------------

/// Create a command. Responds 201 with a `Location` header pointing at
/// the new record.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CommandCreateDto>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let mut repo = state.store.begin().await?;
    let pending = repo.create_command(NewCommand::from(input));
    repo.save_changes().await?;

    let created = repo.committed(pending).ok_or_else(|| {
        AppError::InternalError("Saved command was not assigned an id".to_string())
    })?;
    tracing::info!(id = created.id, how_to = %created.how_to, "Command created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location_of(created.id))],
        Json(CommandReadDto::from(created)),
    ))
}

// ---------------------------------------------------------------------------
// PUT /api/commands/{id}
// ---------------------------------------------------------------------------

/// Replace the mutable fields of a command.
pub async fn update(
    State(state): State<AppState>,
    CommandId(id): CommandId,
    Json(input): Json<CommandUpdateDto>,
) -> AppResult<StatusCode> {
    let mut repo = state.store.begin().await?;
    let mut command = ensure_command_exists(repo.as_ref(), id).await?;
    validate_input(&input)?;

    input.merge_into(&mut command);
    repo.update_command(&command);
    repo.save_changes().await?;

    tracing::info!(id, "Command updated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PATCH /api/commands/{id}
// ---------------------------------------------------------------------------

/// Apply a JSON Patch to a command.
///
/// The patch runs against the update-shaped projection of the stored
/// record. The candidate must deserialize and validate before anything is
/// staged; otherwise the request fails with 422 and the record is untouched.
pub async fn partial_update(
    State(state): State<AppState>,
    CommandId(id): CommandId,
    Json(patch): Json<Patch>,
) -> AppResult<StatusCode> {
    let mut repo = state.store.begin().await?;
    let mut command = ensure_command_exists(repo.as_ref(), id).await?;

    let mut document = serde_json::to_value(CommandUpdateDto::from(&command))
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    json_patch::patch(&mut document, &patch.0)?;

    let candidate: CommandUpdateDto =
        serde_json::from_value(document).map_err(|e| AppError::Unprocessable {
            message: format!("Patched command has an invalid shape: {e}"),
            errors: FieldErrors::new(),
        })?;
    candidate
        .validate()
        .map_err(|errors| AppError::invalid_candidate(&errors))?;

    candidate.merge_into(&mut command);
    repo.update_command(&command);
    repo.save_changes().await?;

    tracing::info!(id, operations = patch.0.len(), "Command patched");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// DELETE /api/commands/{id}
// ---------------------------------------------------------------------------

pub async fn delete(
    State(state): State<AppState>,
    CommandId(id): CommandId,
) -> AppResult<StatusCode> {
    let mut repo = state.store.begin().await?;
    let command = ensure_command_exists(repo.as_ref(), id).await?;

    repo.delete_command(&command);
    repo.save_changes().await?;

    tracing::info!(id, "Command deleted");
    Ok(StatusCode::NO_CONTENT)
}
