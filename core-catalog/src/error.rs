//! Error types for the catalog surface

use core_rest::ApiError;
use thiserror::Error;

/// Catalog client errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The underlying translator call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A lookup or mutation expected a record the server did not return
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A mutation asked for its representation and got none back
    #[error("server returned no {entity} representation")]
    MissingRepresentation { entity: String },

    /// A successful response row did not decode into the expected model
    #[error("failed to decode {entity} row: {message}")]
    Decode { entity: String, message: String },
}

impl CatalogError {
    pub(crate) fn not_found(entity: &str, id: impl ToString) -> Self {
        CatalogError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn missing_representation(entity: &str) -> Self {
        CatalogError::MissingRepresentation {
            entity: entity.to_string(),
        }
    }

    pub(crate) fn decode(entity: &str, err: serde_json::Error) -> Self {
        CatalogError::Decode {
            entity: entity.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
