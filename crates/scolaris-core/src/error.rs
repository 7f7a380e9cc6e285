//! Engine error types.
//!
//! Domain errors are typed and surfaced to the caller; they identify the
//! missing precondition and are never retried. Transport-level concerns
//! live in `scolaris-advisory`.

use thiserror::Error;

use crate::model::{ClassroomId, EvaluationId, PersonId, SubjectId};

/// Errors raised by the evaluation and deliberation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No person with this id exists in the store.
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    /// The person exists but is not a student.
    #[error("person {0} is not a student")]
    NotAStudent(PersonId),

    /// The student has no classroom, so no transcript can be produced.
    #[error("student {0} has no classroom assigned")]
    NotEnrolled(PersonId),

    #[error("classroom not found: {0}")]
    ClassroomNotFound(ClassroomId),

    #[error("subject not found: {0}")]
    SubjectNotFound(SubjectId),

    #[error("evaluation not found: {0}")]
    EvaluationNotFound(EvaluationId),

    /// Coefficients weight averages and must be at least 1.
    #[error("coefficient must be at least 1")]
    InvalidCoefficient,
}
