//! Command entity model and DTOs.

use commander_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Maximum length of `how_to`, matching the `VARCHAR(250)` column.
pub const MAX_HOW_TO_LEN: u64 = 250;

/// A row from the `commands` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Command {
    pub id: DbId,
    pub how_to: String,
    pub platform: String,
    pub command_line: String,
}

/// A command staged for insertion. The id is assigned on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    pub how_to: String,
    pub platform: String,
    pub command_line: String,
}

/// Read projection returned by every GET and by create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReadDto {
    pub id: DbId,
    pub how_to: String,
    pub platform: String,
    pub command_line: String,
}

/// DTO for creating a new command. Missing fields default to empty and
/// are then rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CommandCreateDto {
    #[validate(length(
        min = 1,
        max = MAX_HOW_TO_LEN,
        message = "must be between 1 and 250 characters"
    ))]
    pub how_to: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub platform: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub command_line: String,
}

/// DTO for replacing a command, also the document a JSON Patch is applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CommandUpdateDto {
    #[validate(length(
        min = 1,
        max = MAX_HOW_TO_LEN,
        message = "must be between 1 and 250 characters"
    ))]
    pub how_to: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub platform: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub command_line: String,
}
