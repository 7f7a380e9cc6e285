//! Grading operations: evaluation creation, bulk grade entry, attendance.
//!
//! Bulk grade entry enforces the deliberation guard: rows targeting a
//! VALIDATED student are silently skipped, never errors, so one locked
//! student does not abort a teacher's whole grading form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{
    AttendanceRecord, Evaluation, EvaluationId, PersonId, SessionStatus, SubjectId,
    ValidationStatus,
};
use crate::store::ScoreStore;

/// One row of a grading form: a student and an optional score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRow {
    pub student_id: PersonId,
    /// `None` means the teacher left the cell empty; the row is skipped.
    pub score: Option<f64>,
}

/// Outcome of a bulk grade save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkSaveOutcome {
    /// Grades created or updated.
    pub written: usize,
    /// Rows skipped because the student is already VALIDATED.
    pub skipped_validated: usize,
}

/// Create an evaluation under a subject. Coefficients must be >= 1.
pub fn create_evaluation(
    store: &dyn ScoreStore,
    subject_id: SubjectId,
    title: &str,
    coefficient: u32,
    max_score: f64,
) -> Result<EvaluationId, EngineError> {
    if coefficient == 0 {
        return Err(EngineError::InvalidCoefficient);
    }
    store.subject(subject_id)?;
    store.insert_evaluation(Evaluation {
        id: 0,
        subject_id,
        title: title.to_string(),
        coefficient,
        max_score,
    })
}

/// Save a grading form: upsert one grade per (student, evaluation) row.
///
/// Empty cells are skipped; VALIDATED students are skipped silently per
/// the deliberation guard. Rows are independent; each upsert is atomic
/// and a skip never affects other rows.
pub fn save_grades_bulk(
    store: &dyn ScoreStore,
    evaluation_id: EvaluationId,
    rows: &[GradeRow],
) -> Result<BulkSaveOutcome, EngineError> {
    let evaluation = store.evaluation(evaluation_id)?;
    let mut outcome = BulkSaveOutcome::default();

    for row in rows {
        let Some(score) = row.score else {
            continue;
        };
        let person = store.person(row.student_id)?;
        let data = person
            .student_data()
            .ok_or(EngineError::NotAStudent(row.student_id))?;
        if data.academic_status == ValidationStatus::Validated {
            tracing::debug!(
                student_id = row.student_id,
                "student validated, grade edit skipped"
            );
            outcome.skipped_validated += 1;
            continue;
        }
        store.upsert_grade(row.student_id, evaluation.id, score)?;
        outcome.written += 1;
    }

    Ok(outcome)
}

/// Record attendance for one subject session: every student of the
/// subject's classroom is marked, absentees from the given list.
pub fn record_attendance(
    store: &dyn ScoreStore,
    subject_id: SubjectId,
    date: NaiveDate,
    absent_student_ids: &[PersonId],
) -> Result<usize, EngineError> {
    let subject = store.subject(subject_id)?;
    let students = store.students_in_classroom(subject.classroom_id);
    let mut recorded = 0usize;

    for student in &students {
        let status = if absent_student_ids.contains(&student.id) {
            SessionStatus::Absent
        } else {
            SessionStatus::Present
        };
        store.upsert_attendance(AttendanceRecord {
            student_id: student.id,
            subject_id,
            date,
            status,
        })?;
        recorded += 1;
    }

    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::validate_student;
    use crate::model::{Classroom, Person, Role, StudentData, Subject};
    use crate::store::{MemoryStore, Snapshot};

    fn student(id: PersonId) -> Person {
        Person {
            id,
            first_name: "S".into(),
            last_name: format!("L{id}"),
            email: format!("s{id}@school.test"),
            username: format!("s{id}"),
            password: String::new(),
            role: Role::Student(StudentData {
                cne: format!("C{id}"),
                classroom_id: Some(10),
                academic_status: ValidationStatus::Pending,
                jury_decision: None,
            }),
        }
    }

    fn fixture() -> MemoryStore {
        MemoryStore::from_snapshot(Snapshot {
            people: vec![student(2), student(3)],
            classrooms: vec![Classroom {
                id: 10,
                name: "CI1".into(),
                academic_year: "2024-2025".into(),
            }],
            subjects: vec![Subject {
                id: 20,
                name: "Math".into(),
                classroom_id: 10,
                teacher_id: 0,
                coefficient: 1,
            }],
            evaluations: vec![Evaluation {
                id: 30,
                subject_id: 20,
                title: "Final".into(),
                coefficient: 1,
                max_score: 20.0,
            }],
            ..Default::default()
        })
    }

    #[test]
    fn bulk_save_upserts_and_skips_empty_cells() {
        let store = fixture();
        let outcome = save_grades_bulk(
            &store,
            30,
            &[
                GradeRow {
                    student_id: 2,
                    score: Some(12.0),
                },
                GradeRow {
                    student_id: 3,
                    score: None,
                },
            ],
        )
        .unwrap();

        assert_eq!(outcome.written, 1);
        assert_eq!(store.grade(2, 30).unwrap().score, 12.0);
        assert!(store.grade(3, 30).is_none());

        // Second save updates in place.
        save_grades_bulk(
            &store,
            30,
            &[GradeRow {
                student_id: 2,
                score: Some(15.0),
            }],
        )
        .unwrap();
        assert_eq!(store.grade(2, 30).unwrap().score, 15.0);
    }

    #[test]
    fn validated_student_grades_are_left_unchanged() {
        let store = fixture();
        store.upsert_grade(2, 30, 9.0).unwrap();
        validate_student(&store, 2, "ADMITTED").unwrap();

        let outcome = save_grades_bulk(
            &store,
            30,
            &[
                GradeRow {
                    student_id: 2,
                    score: Some(18.0),
                },
                GradeRow {
                    student_id: 3,
                    score: Some(11.0),
                },
            ],
        )
        .unwrap();

        assert_eq!(outcome.skipped_validated, 1);
        assert_eq!(outcome.written, 1);
        assert_eq!(store.grade(2, 30).unwrap().score, 9.0);
        assert_eq!(store.grade(3, 30).unwrap().score, 11.0);
    }

    #[test]
    fn unknown_evaluation_is_a_domain_error() {
        let store = fixture();
        let err = save_grades_bulk(&store, 999, &[]).unwrap_err();
        assert!(matches!(err, EngineError::EvaluationNotFound(999)));
    }

    #[test]
    fn create_evaluation_rejects_zero_coefficient() {
        let store = fixture();
        let err = create_evaluation(&store, 20, "Quiz", 0, 20.0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidCoefficient));

        let id = create_evaluation(&store, 20, "Quiz", 2, 20.0).unwrap();
        assert_eq!(store.evaluation(id).unwrap().coefficient, 2);
    }

    #[test]
    fn attendance_marks_whole_classroom() {
        let store = fixture();
        let date = NaiveDate::from_ymd_opt(2024, 11, 4).unwrap();
        let recorded = record_attendance(&store, 20, date, &[3]).unwrap();
        assert_eq!(recorded, 2);
        assert_eq!(store.attendance_counts(2), (1, 1));
        assert_eq!(store.attendance_counts(3), (1, 0));

        // Re-recording the same session overwrites rather than duplicating.
        record_attendance(&store, 20, date, &[]).unwrap();
        assert_eq!(store.attendance_counts(3), (1, 1));
    }
}
