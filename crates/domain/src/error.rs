//! Unified error types for the domain layer
//!
//! Every rejection carries a machine-distinguishable [`ErrorKind`] plus a
//! human-readable message. Callers map kinds to transport-level status.

use thiserror::Error;

use crate::value_objects::{Branch, FormulaError, Skill};

/// Coarse classification of every failure the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed request shape.
    Validation,
    /// Not enough experience or stamina.
    InsufficientResource,
    /// Branch, skill or level cap reached.
    LimitExceeded,
    /// Unknown branch/skill/effect name, missing inventory line.
    InvalidReference,
    /// Unparseable or semantically invalid dice expression.
    Formula,
    /// Surfaced unchanged from the persistence collaborator.
    Storage,
}

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not enough experience: level {next_level} requires {required} XP, have {current}")]
    InsufficientExperience {
        next_level: u8,
        required: u32,
        current: u32,
    },

    #[error("Not enough stamina: need {required}, have {available}")]
    InsufficientStamina { required: u32, available: i32 },

    #[error("Branch {0} is already at the maximum level")]
    BranchMaxed(Branch),

    #[error("Already at the maximum level {0}")]
    LevelCapReached(u8),

    #[error("Skill {skill} cannot exceed 10 (would be {value})")]
    SkillCapExceeded { skill: Skill, value: u32 },

    #[error("Exactly {expected} points must be distributed (got {spent})")]
    PointBudgetMismatch { expected: u32, spent: u32 },

    #[error("Unknown branch: {0}")]
    InvalidBranch(String),

    #[error("Unknown skill: {0}")]
    InvalidSkill(String),

    #[error("Ability slot {0} does not exist")]
    InvalidSlot(usize),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
}

impl DomainError {
    /// Creates a validation error for malformed requests.
    ///
    /// # Example
    /// ```ignore
    /// if dice == 0 {
    ///     return Err(DomainError::validation("at least one die must be spent"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidStateTransition(_) => ErrorKind::Validation,
            Self::InsufficientExperience { .. } | Self::InsufficientStamina { .. } => {
                ErrorKind::InsufficientResource
            }
            Self::BranchMaxed(_)
            | Self::LevelCapReached(_)
            | Self::SkillCapExceeded { .. }
            | Self::PointBudgetMismatch { .. } => ErrorKind::LimitExceeded,
            Self::InvalidBranch(_) | Self::InvalidSkill(_) | Self::InvalidSlot(_) => {
                ErrorKind::InvalidReference
            }
            Self::Formula(_) => ErrorKind::Formula,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("hp roll cannot be negative");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: hp roll cannot be negative"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_kinds_follow_taxonomy() {
        assert_eq!(
            DomainError::InsufficientStamina {
                required: 2,
                available: 1
            }
            .kind(),
            ErrorKind::InsufficientResource
        );
        assert_eq!(
            DomainError::BranchMaxed(Branch::Scout).kind(),
            ErrorKind::LimitExceeded
        );
        assert_eq!(
            DomainError::PointBudgetMismatch {
                expected: 3,
                spent: 4
            }
            .kind(),
            ErrorKind::LimitExceeded
        );
        assert_eq!(
            DomainError::InvalidSkill("x".into()).kind(),
            ErrorKind::InvalidReference
        );
    }

    #[test]
    fn test_from_formula_error() {
        let err: DomainError = FormulaError::Empty.into();
        assert_eq!(err.kind(), ErrorKind::Formula);
        assert!(err.to_string().contains("Empty dice formula"));
    }
}
