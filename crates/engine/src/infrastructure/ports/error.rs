//! Error types for port operations.

use charsheet_domain::ErrorKind;

/// Repository operation errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Storage operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Storage failures are surfaced unchanged and always discard the
    /// computed state.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = RepoError::not_found("Character", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Character not found: 42");

        let err = RepoError::database("commit", "disk full");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Database error in commit: disk full");
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
