//! Grade aggregation and transcript building.
//!
//! Averages are coefficient-weighted: evaluation coefficients weight scores
//! into a subject average, subject coefficients weight subject averages into
//! the global average. A missing grade counts as a score of 0; that is an
//! invariant, not an error. All averages are rounded to 2 decimal places.

use std::cmp::Ordering;

use crate::error::EngineError;
use crate::model::{
    Appreciation, ClassroomId, PersonId, SubjectId, SubjectStat, Transcript, DECISION_ADMITTED,
    DECISION_FAILED,
};
use crate::store::ScoreStore;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Coefficient-weighted average of (value, coefficient) pairs, rounded to
/// 2 decimals. 0.0 when the coefficients sum to zero.
fn weighted_average(pairs: &[(f64, u32)]) -> f64 {
    let mut total = 0.0;
    let mut coeffs = 0.0;
    for (value, coefficient) in pairs {
        total += value * f64::from(*coefficient);
        coeffs += f64::from(*coefficient);
    }
    if coeffs == 0.0 {
        return 0.0;
    }
    round2(total / coeffs)
}

/// A student's average for one subject, weighted by evaluation coefficients.
///
/// A subject with no evaluations averages 0.0; this is a defined edge case,
/// not a failure.
pub fn subject_average(
    store: &dyn ScoreStore,
    student_id: PersonId,
    subject_id: SubjectId,
) -> f64 {
    let pairs: Vec<(f64, u32)> = store
        .evaluations_for_subject(subject_id)
        .iter()
        .map(|eval| {
            let score = store
                .grade(student_id, eval.id)
                .map(|g| g.score)
                .unwrap_or(0.0);
            (score, eval.coefficient)
        })
        .collect();
    weighted_average(&pairs)
}

/// A student's global average across their classroom's subjects, weighted
/// by subject coefficients. 0.0 when the classroom has no subjects.
pub fn global_average(
    store: &dyn ScoreStore,
    student_id: PersonId,
    classroom_id: ClassroomId,
) -> f64 {
    let pairs: Vec<(f64, u32)> = store
        .subjects_in_classroom(classroom_id)
        .iter()
        .map(|subject| (subject_average(store, student_id, subject.id), subject.coefficient))
        .collect();
    weighted_average(&pairs)
}

/// Build a student's transcript: per-subject stats, global average, and the
/// computed pass/fail decision.
///
/// Fails with [`EngineError::NotEnrolled`] when the student has no
/// classroom. The decision is advisory only until confirmed by
/// deliberation.
pub fn build_transcript(
    store: &dyn ScoreStore,
    student_id: PersonId,
) -> Result<Transcript, EngineError> {
    let person = store.person(student_id)?;
    let data = person
        .student_data()
        .ok_or(EngineError::NotAStudent(student_id))?;
    let classroom_id = data
        .classroom_id
        .ok_or(EngineError::NotEnrolled(student_id))?;
    let classroom = store.classroom(classroom_id)?;

    let mut subjects = Vec::new();
    let mut pairs = Vec::new();
    for subject in store.subjects_in_classroom(classroom_id) {
        let average = subject_average(store, student_id, subject.id);
        let teacher = store.person(subject.teacher_id)?;
        subjects.push(SubjectStat {
            subject_name: subject.name.clone(),
            teacher_name: teacher.last_name,
            coefficient: subject.coefficient,
            average,
            appreciation: Appreciation::from_average(average),
        });
        pairs.push((average, subject.coefficient));
    }

    let global_average = weighted_average(&pairs);
    let final_decision = if global_average >= 10.0 {
        DECISION_ADMITTED
    } else {
        DECISION_FAILED
    };

    Ok(Transcript {
        student_id,
        student_name: person.full_name(),
        class_name: classroom.name,
        academic_year: classroom.academic_year,
        subjects,
        global_average,
        final_decision: final_decision.to_string(),
    })
}

/// 1-based position of a student's global average within their classroom.
///
/// Descending by average; ties broken by ascending student id.
pub fn class_rank(store: &dyn ScoreStore, student_id: PersonId) -> Result<u32, EngineError> {
    let person = store.person(student_id)?;
    let data = person
        .student_data()
        .ok_or(EngineError::NotAStudent(student_id))?;
    let classroom_id = data
        .classroom_id
        .ok_or(EngineError::NotEnrolled(student_id))?;

    let mut standings: Vec<(PersonId, f64)> = store
        .students_in_classroom(classroom_id)
        .iter()
        .map(|s| (s.id, global_average(store, s.id, classroom_id)))
        .collect();
    standings.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    standings
        .iter()
        .position(|(id, _)| *id == student_id)
        .map(|pos| pos as u32 + 1)
        .ok_or(EngineError::PersonNotFound(student_id))
}
