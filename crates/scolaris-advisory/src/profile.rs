//! Student profile construction.
//!
//! Assembles the numeric feature vector the recommendation service scores:
//! per-subject averages, overall average, attendance rate, and class rank.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scolaris_core::model::PersonId;
use scolaris_core::store::ScoreStore;
use scolaris_core::transcript::{class_rank, global_average, subject_average};
use scolaris_core::EngineError;

/// Numeric feature vector describing one student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: PersonId,
    pub name: String,
    /// Subject name -> weighted average. Empty for unenrolled students.
    pub subject_averages: BTreeMap<String, f64>,
    /// Global weighted average; 0.0 when not derivable.
    pub overall_avg: f64,
    /// `present * 100 / total`; 100.0 when no sessions are recorded.
    pub attendance_rate: f64,
    /// 1-based rank within the classroom; None for unenrolled students.
    pub class_rank: Option<u32>,
}

/// Attendance rate on a 0-100 scale. A student with zero recorded
/// sessions is treated as fully present, not as a division error.
pub fn attendance_rate(store: &dyn ScoreStore, student_id: PersonId) -> f64 {
    let (total, present) = store.attendance_counts(student_id);
    if total == 0 {
        return 100.0;
    }
    present as f64 * 100.0 / total as f64
}

/// Build the profile forwarded to the recommendation service.
///
/// An enrolled student gets real averages and a real rank; an unenrolled
/// one gets zeros and no rank (missing values default to 0.0 rather than
/// failing the advisory flow).
pub fn build_student_profile(
    store: &dyn ScoreStore,
    student_id: PersonId,
) -> Result<StudentProfile, EngineError> {
    let person = store.person(student_id)?;
    let data = person
        .student_data()
        .ok_or(EngineError::NotAStudent(student_id))?;

    let mut subject_averages = BTreeMap::new();
    let mut overall_avg = 0.0;
    let mut rank = None;

    if let Some(classroom_id) = data.classroom_id {
        for subject in store.subjects_in_classroom(classroom_id) {
            subject_averages.insert(
                subject.name.clone(),
                subject_average(store, student_id, subject.id),
            );
        }
        overall_avg = global_average(store, student_id, classroom_id);
        rank = Some(class_rank(store, student_id)?);
    }

    Ok(StudentProfile {
        student_id,
        name: person.full_name(),
        subject_averages,
        overall_avg,
        attendance_rate: attendance_rate(store, student_id),
        class_rank: rank,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scolaris_core::model::{
        AttendanceRecord, Classroom, Evaluation, Person, Role, SessionStatus, StudentData,
        Subject, ValidationStatus,
    };
    use scolaris_core::store::{MemoryStore, Snapshot};

    fn student(id: PersonId, classroom_id: Option<u64>) -> Person {
        Person {
            id,
            first_name: "Jean".into(),
            last_name: format!("Dupont{id}"),
            email: format!("s{id}@school.test"),
            username: format!("s{id}"),
            password: String::new(),
            role: Role::Student(StudentData {
                cne: format!("C{id}"),
                classroom_id,
                academic_status: ValidationStatus::Pending,
                jury_decision: None,
            }),
        }
    }

    fn fixture() -> MemoryStore {
        MemoryStore::from_snapshot(Snapshot {
            people: vec![student(2, Some(10)), student(3, Some(10))],
            classrooms: vec![Classroom {
                id: 10,
                name: "CI1".into(),
                academic_year: "2024-2025".into(),
            }],
            subjects: vec![
                Subject {
                    id: 20,
                    name: "Mathematics".into(),
                    classroom_id: 10,
                    teacher_id: 0,
                    coefficient: 4,
                },
                Subject {
                    id: 21,
                    name: "Physics".into(),
                    classroom_id: 10,
                    teacher_id: 0,
                    coefficient: 2,
                },
            ],
            evaluations: vec![
                Evaluation {
                    id: 30,
                    subject_id: 20,
                    title: "Final".into(),
                    coefficient: 1,
                    max_score: 20.0,
                },
                Evaluation {
                    id: 31,
                    subject_id: 21,
                    title: "Final".into(),
                    coefficient: 1,
                    max_score: 20.0,
                },
            ],
            ..Default::default()
        })
    }

    #[test]
    fn profile_for_enrolled_student() {
        let store = fixture();
        store.upsert_grade(2, 30, 16.0).unwrap();
        store.upsert_grade(2, 31, 10.0).unwrap();
        store.upsert_grade(3, 30, 8.0).unwrap();

        for (day, status) in [(1, SessionStatus::Present), (2, SessionStatus::Absent)] {
            store
                .upsert_attendance(AttendanceRecord {
                    student_id: 2,
                    subject_id: 20,
                    date: NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
                    status,
                })
                .unwrap();
        }

        let profile = build_student_profile(&store, 2).unwrap();
        assert_eq!(profile.subject_averages["Mathematics"], 16.0);
        assert_eq!(profile.subject_averages["Physics"], 10.0);
        // (16*4 + 10*2) / 6 = 14.0
        assert_eq!(profile.overall_avg, 14.0);
        assert_eq!(profile.attendance_rate, 50.0);
        assert_eq!(profile.class_rank, Some(1));
    }

    #[test]
    fn zero_sessions_means_full_attendance() {
        let store = fixture();
        let profile = build_student_profile(&store, 3).unwrap();
        assert_eq!(profile.attendance_rate, 100.0);
    }

    #[test]
    fn unenrolled_student_defaults_to_zeros() {
        let store = fixture();
        let id = store.insert_person(student(0, None)).unwrap();
        let profile = build_student_profile(&store, id).unwrap();
        assert!(profile.subject_averages.is_empty());
        assert_eq!(profile.overall_avg, 0.0);
        assert_eq!(profile.class_rank, None);
        assert_eq!(profile.attendance_rate, 100.0);
    }
}
