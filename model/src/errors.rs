use thiserror::Error;

/// Errors raised by the domain graph.
///
/// `GraphIntegrity` and `Parse` are fatal: the program description is broken and no
/// graph is built. `NotFound` indicates caller misuse (lookup of an id that was never
/// part of the graph) and is not retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("graph integrity violated by {entity}: {reason}")]
    GraphIntegrity { entity: String, reason: String },

    #[error("no {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("invalid program description: {0}")]
    Parse(String),
}

impl ModelError {
    pub fn integrity(entity: impl ToString, reason: impl ToString) -> ModelError {
        ModelError::GraphIntegrity {
            entity: entity.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(entity_type: &'static str, id: impl ToString) -> ModelError {
        ModelError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}
