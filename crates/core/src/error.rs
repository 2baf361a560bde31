use crate::schema::ValidationError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A mutation targeted an id with no row. `entity` is the user-facing noun
    /// used in the response message (e.g. `"Rule"`).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}
