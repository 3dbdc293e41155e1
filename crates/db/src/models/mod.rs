//! Entity and DTO shapes.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` read DTO
//! - `Deserialize` + `Validate` create and update DTOs

pub mod command;
