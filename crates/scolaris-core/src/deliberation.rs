//! Jury deliberation state machine.
//!
//! Each student moves PENDING -> VALIDATED exactly once under normal
//! operation. Validation rewrites the status and decision at the data level
//! (idempotent overwrite); the classroom-level bulk operation skips
//! already-validated students unless explicitly forced, so re-running it
//! cannot clobber individual jury overrides.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{ClassroomId, PersonId, Transcript, ValidationStatus};
use crate::store::ScoreStore;
use crate::transcript::build_transcript;

/// Outcome of a classroom-level validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Students transitioned to VALIDATED in this run.
    pub validated: usize,
    /// Students left untouched because they were already VALIDATED.
    pub skipped: usize,
}

/// Transcripts for every student of a classroom, for the jury to review.
///
/// Read-only preview: no state transitions happen here.
pub fn jury_board(
    store: &dyn ScoreStore,
    classroom_id: ClassroomId,
) -> Result<Vec<Transcript>, EngineError> {
    store.classroom(classroom_id)?;
    store
        .students_in_classroom(classroom_id)
        .iter()
        .map(|s| build_transcript(store, s.id))
        .collect()
}

/// Record a jury decision and transition the student to VALIDATED.
///
/// The decision is free text: the jury may override the computed decision.
/// Re-validating an already-validated student rewrites the decision.
pub fn validate_student(
    store: &dyn ScoreStore,
    student_id: PersonId,
    decision: &str,
) -> Result<(), EngineError> {
    store.set_student_status(
        student_id,
        ValidationStatus::Validated,
        Some(decision.to_string()),
    )?;
    tracing::info!(student_id, decision, "student validated by jury");
    Ok(())
}

/// Validate every student of a classroom using each transcript's computed
/// decision.
///
/// Without `force`, students already VALIDATED are skipped. With `force`,
/// their decision is overwritten with the computed one.
pub fn validate_classroom(
    store: &dyn ScoreStore,
    classroom_id: ClassroomId,
    force: bool,
) -> Result<ValidationSummary, EngineError> {
    let board = jury_board(store, classroom_id)?;
    let mut summary = ValidationSummary::default();

    for transcript in &board {
        let person = store.person(transcript.student_id)?;
        let already_validated = person
            .student_data()
            .map(|d| d.academic_status == ValidationStatus::Validated)
            .unwrap_or(false);
        if already_validated && !force {
            tracing::debug!(
                student_id = transcript.student_id,
                "already validated, skipping"
            );
            summary.skipped += 1;
            continue;
        }
        validate_student(store, transcript.student_id, &transcript.final_decision)?;
        summary.validated += 1;
    }

    tracing::info!(
        classroom_id,
        validated = summary.validated,
        skipped = summary.skipped,
        "classroom deliberation complete"
    );
    Ok(summary)
}
