//! Score store abstraction and the in-memory implementation.
//!
//! The store is the engine's only mutable shared resource. The trait keeps
//! the engine independent of persistence technology; [`MemoryStore`] backs
//! the CLI and the tests. Each mutating method takes the write lock once,
//! so every row-level read-modify-write is atomic.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{
    AttendanceRecord, Classroom, ClassroomId, Evaluation, EvaluationId, Grade, Person, PersonId,
    Role, Subject, SubjectId, ValidationStatus,
};

/// Read/write access to the academic records the engine aggregates over.
pub trait ScoreStore: Send + Sync {
    fn person(&self, id: PersonId) -> Result<Person, EngineError>;

    /// Look up a student by national student identifier (import key).
    fn find_student_by_cne(&self, cne: &str) -> Option<Person>;

    /// All students enrolled in a classroom, ordered by id.
    fn students_in_classroom(&self, classroom_id: ClassroomId) -> Vec<Person>;

    fn classroom(&self, id: ClassroomId) -> Result<Classroom, EngineError>;

    /// Case-insensitive lookup by class code (import key).
    fn find_classroom_by_name(&self, name: &str) -> Option<Classroom>;

    /// Subjects of a classroom, ordered by id.
    fn subjects_in_classroom(&self, classroom_id: ClassroomId) -> Vec<Subject>;

    fn subject(&self, id: SubjectId) -> Result<Subject, EngineError>;

    /// Evaluations of a subject, ordered by id.
    fn evaluations_for_subject(&self, subject_id: SubjectId) -> Vec<Evaluation>;

    fn evaluation(&self, id: EvaluationId) -> Result<Evaluation, EngineError>;

    fn grade(&self, student_id: PersonId, evaluation_id: EvaluationId) -> Option<Grade>;

    /// Create or update the grade for (student, evaluation).
    fn upsert_grade(
        &self,
        student_id: PersonId,
        evaluation_id: EvaluationId,
        score: f64,
    ) -> Result<(), EngineError>;

    /// Insert a person, assigning and returning a fresh id.
    fn insert_person(&self, person: Person) -> Result<PersonId, EngineError>;

    /// Insert an evaluation, assigning and returning a fresh id.
    fn insert_evaluation(&self, evaluation: Evaluation) -> Result<EvaluationId, EngineError>;

    /// Set a student's deliberation status and jury decision.
    fn set_student_status(
        &self,
        student_id: PersonId,
        status: ValidationStatus,
        decision: Option<String>,
    ) -> Result<(), EngineError>;

    /// Create or update the attendance record for (student, subject, date).
    fn upsert_attendance(&self, record: AttendanceRecord) -> Result<(), EngineError>;

    /// (total sessions, present sessions) recorded for a student.
    fn attendance_counts(&self, student_id: PersonId) -> (u64, u64);
}

/// Serializable image of a store's full contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    people: HashMap<PersonId, Person>,
    classrooms: HashMap<ClassroomId, Classroom>,
    subjects: HashMap<SubjectId, Subject>,
    evaluations: HashMap<EvaluationId, Evaluation>,
    grades: HashMap<(PersonId, EvaluationId), Grade>,
    attendance: HashMap<(PersonId, SubjectId, NaiveDate), AttendanceRecord>,
    next_id: u64,
}

/// HashMap-backed [`ScoreStore`] with sequential id assignment.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot; fresh ids continue after the highest
    /// id present.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut inner = Inner::default();
        let mut max_id = 0u64;
        for p in snapshot.people {
            max_id = max_id.max(p.id);
            inner.people.insert(p.id, p);
        }
        for c in snapshot.classrooms {
            max_id = max_id.max(c.id);
            inner.classrooms.insert(c.id, c);
        }
        for s in snapshot.subjects {
            max_id = max_id.max(s.id);
            inner.subjects.insert(s.id, s);
        }
        for e in snapshot.evaluations {
            max_id = max_id.max(e.id);
            inner.evaluations.insert(e.id, e);
        }
        for g in snapshot.grades {
            inner.grades.insert((g.student_id, g.evaluation_id), g);
        }
        for a in snapshot.attendance {
            inner
                .attendance
                .insert((a.student_id, a.subject_id, a.date), a);
        }
        inner.next_id = max_id + 1;
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Export the full contents, sorted for deterministic output.
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut people: Vec<Person> = inner.people.values().cloned().collect();
        people.sort_by_key(|p| p.id);
        let mut classrooms: Vec<Classroom> = inner.classrooms.values().cloned().collect();
        classrooms.sort_by_key(|c| c.id);
        let mut subjects: Vec<Subject> = inner.subjects.values().cloned().collect();
        subjects.sort_by_key(|s| s.id);
        let mut evaluations: Vec<Evaluation> = inner.evaluations.values().cloned().collect();
        evaluations.sort_by_key(|e| e.id);
        let mut grades: Vec<Grade> = inner.grades.values().cloned().collect();
        grades.sort_by_key(|g| (g.student_id, g.evaluation_id));
        let mut attendance: Vec<AttendanceRecord> = inner.attendance.values().cloned().collect();
        attendance.sort_by_key(|a| (a.student_id, a.subject_id, a.date));
        Snapshot {
            people,
            classrooms,
            subjects,
            evaluations,
            grades,
            attendance,
        }
    }

    /// Insert a classroom, assigning and returning a fresh id.
    pub fn insert_classroom(&self, mut classroom: Classroom) -> ClassroomId {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        classroom.id = id;
        inner.classrooms.insert(id, classroom);
        id
    }

    /// Insert a subject, assigning and returning a fresh id.
    pub fn insert_subject(&self, mut subject: Subject) -> SubjectId {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        subject.id = id;
        inner.subjects.insert(id, subject);
        id
    }
}

impl ScoreStore for MemoryStore {
    fn person(&self, id: PersonId) -> Result<Person, EngineError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .people
            .get(&id)
            .cloned()
            .ok_or(EngineError::PersonNotFound(id))
    }

    fn find_student_by_cne(&self, cne: &str) -> Option<Person> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .people
            .values()
            .find(|p| matches!(&p.role, Role::Student(data) if data.cne == cne))
            .cloned()
    }

    fn students_in_classroom(&self, classroom_id: ClassroomId) -> Vec<Person> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut students: Vec<Person> = inner
            .people
            .values()
            .filter(|p| {
                matches!(&p.role, Role::Student(data) if data.classroom_id == Some(classroom_id))
            })
            .cloned()
            .collect();
        students.sort_by_key(|p| p.id);
        students
    }

    fn classroom(&self, id: ClassroomId) -> Result<Classroom, EngineError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .classrooms
            .get(&id)
            .cloned()
            .ok_or(EngineError::ClassroomNotFound(id))
    }

    fn find_classroom_by_name(&self, name: &str) -> Option<Classroom> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .classrooms
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn subjects_in_classroom(&self, classroom_id: ClassroomId) -> Vec<Subject> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut subjects: Vec<Subject> = inner
            .subjects
            .values()
            .filter(|s| s.classroom_id == classroom_id)
            .cloned()
            .collect();
        subjects.sort_by_key(|s| s.id);
        subjects
    }

    fn subject(&self, id: SubjectId) -> Result<Subject, EngineError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .subjects
            .get(&id)
            .cloned()
            .ok_or(EngineError::SubjectNotFound(id))
    }

    fn evaluations_for_subject(&self, subject_id: SubjectId) -> Vec<Evaluation> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut evaluations: Vec<Evaluation> = inner
            .evaluations
            .values()
            .filter(|e| e.subject_id == subject_id)
            .cloned()
            .collect();
        evaluations.sort_by_key(|e| e.id);
        evaluations
    }

    fn evaluation(&self, id: EvaluationId) -> Result<Evaluation, EngineError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .evaluations
            .get(&id)
            .cloned()
            .ok_or(EngineError::EvaluationNotFound(id))
    }

    fn grade(&self, student_id: PersonId, evaluation_id: EvaluationId) -> Option<Grade> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.grades.get(&(student_id, evaluation_id)).cloned()
    }

    fn upsert_grade(
        &self,
        student_id: PersonId,
        evaluation_id: EvaluationId,
        score: f64,
    ) -> Result<(), EngineError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !inner.people.contains_key(&student_id) {
            return Err(EngineError::PersonNotFound(student_id));
        }
        if !inner.evaluations.contains_key(&evaluation_id) {
            return Err(EngineError::EvaluationNotFound(evaluation_id));
        }
        inner.grades.insert(
            (student_id, evaluation_id),
            Grade {
                student_id,
                evaluation_id,
                score,
            },
        );
        Ok(())
    }

    fn insert_person(&self, mut person: Person) -> Result<PersonId, EngineError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        person.id = id;
        inner.people.insert(id, person);
        Ok(id)
    }

    fn insert_evaluation(&self, mut evaluation: Evaluation) -> Result<EvaluationId, EngineError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !inner.subjects.contains_key(&evaluation.subject_id) {
            return Err(EngineError::SubjectNotFound(evaluation.subject_id));
        }
        let id = inner.next_id;
        inner.next_id += 1;
        evaluation.id = id;
        inner.evaluations.insert(id, evaluation);
        Ok(id)
    }

    fn set_student_status(
        &self,
        student_id: PersonId,
        status: ValidationStatus,
        decision: Option<String>,
    ) -> Result<(), EngineError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let person = inner
            .people
            .get_mut(&student_id)
            .ok_or(EngineError::PersonNotFound(student_id))?;
        match &mut person.role {
            Role::Student(data) => {
                data.academic_status = status;
                data.jury_decision = decision;
                Ok(())
            }
            Role::Teacher(_) | Role::Admin => Err(EngineError::NotAStudent(student_id)),
        }
    }

    fn upsert_attendance(&self, record: AttendanceRecord) -> Result<(), EngineError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !inner.people.contains_key(&record.student_id) {
            return Err(EngineError::PersonNotFound(record.student_id));
        }
        if !inner.subjects.contains_key(&record.subject_id) {
            return Err(EngineError::SubjectNotFound(record.subject_id));
        }
        inner
            .attendance
            .insert((record.student_id, record.subject_id, record.date), record);
        Ok(())
    }

    fn attendance_counts(&self, student_id: PersonId) -> (u64, u64) {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut total = 0u64;
        let mut present = 0u64;
        for record in inner.attendance.values() {
            if record.student_id == student_id {
                total += 1;
                if record.status == crate::model::SessionStatus::Present {
                    present += 1;
                }
            }
        }
        (total, present)
    }
}
