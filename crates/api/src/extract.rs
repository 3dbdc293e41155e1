//! Path extractor for command ids.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use commander_core::types::DbId;

use crate::error::AppError;

/// The `{id}` segment of a command route.
///
/// A segment that does not parse as an integer names no command and is
/// answered with 404.
#[derive(Debug, Clone, Copy)]
pub struct CommandId(pub DbId);

impl<S> FromRequestParts<S> for CommandId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state).await?;
        Ok(CommandId(id))
    }
}
