//! Core data model types for scolaris.
//!
//! These are the fundamental records that the engine aggregates over:
//! people (students, teachers, admins), classrooms, subjects, evaluations,
//! grades, and attendance, plus the derived transcript types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier for a person (student, teacher, or admin).
pub type PersonId = u64;
/// Identifier for a classroom.
pub type ClassroomId = u64;
/// Identifier for a subject taught in a classroom.
pub type SubjectId = u64;
/// Identifier for an evaluation (exam, quiz, project) within a subject.
pub type EvaluationId = u64;

/// A person known to the school, with a role-specific payload.
///
/// Roles are a tagged union rather than a subtype hierarchy: all role
/// dispatch is exhaustive pattern matching on [`Role`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Login name. Uniqueness is enforced by the store, not the engine.
    pub username: String,
    /// Opaque credential. Hashing is the auth layer's concern.
    #[serde(default)]
    pub password: String,
    /// Role tag plus role-specific data.
    pub role: Role,
}

impl Person {
    /// "First Last" display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Student payload, if this person is a student.
    pub fn student_data(&self) -> Option<&StudentData> {
        match &self.role {
            Role::Student(data) => Some(data),
            Role::Teacher(_) | Role::Admin => None,
        }
    }
}

/// Role tag with role-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Role {
    Student(StudentData),
    Teacher(TeacherData),
    Admin,
}

/// Data carried only by students.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentData {
    /// National student identifier, unique per student (import key).
    pub cne: String,
    /// Enrollment. A student with no classroom cannot produce a transcript.
    #[serde(default)]
    pub classroom_id: Option<ClassroomId>,
    /// Deliberation state. Grade edits are rejected once VALIDATED.
    #[serde(default)]
    pub academic_status: ValidationStatus,
    /// Jury decision recorded at validation time (free text).
    #[serde(default)]
    pub jury_decision: Option<String>,
}

/// Data carried only by teachers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherData {
    #[serde(default)]
    pub specialty: Option<String>,
}

/// Deliberation status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    #[default]
    Pending,
    Validated,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Pending => write!(f, "PENDING"),
            ValidationStatus::Validated => write!(f, "VALIDATED"),
        }
    }
}

/// A classroom within an academic year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    /// Class code, e.g. "CI1-GINF-2024". Import rows reference this.
    pub name: String,
    /// Academic year code, e.g. "2024-2025".
    pub academic_year: String,
}

/// A subject taught to one classroom by one teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub classroom_id: ClassroomId,
    pub teacher_id: PersonId,
    /// Weight of this subject in the global average. Always >= 1.
    pub coefficient: u32,
}

/// A graded exam, quiz, or project within a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub subject_id: SubjectId,
    pub title: String,
    /// Weight of this evaluation in the subject average. Always >= 1.
    pub coefficient: u32,
    /// Informational only, not used in weighting math.
    pub max_score: f64,
}

/// A student's score on one evaluation. Unique per (student, evaluation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub student_id: PersonId,
    pub evaluation_id: EvaluationId,
    pub score: f64,
}

/// Presence status for one course session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Present,
    Absent,
}

/// Attendance for one student, one subject, one date.
/// Unique per (student, subject, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: PersonId,
    pub subject_id: SubjectId,
    pub date: NaiveDate,
    pub status: SessionStatus,
}

/// Qualitative label derived from an average on the 0-20 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Appreciation {
    Insufficient,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl Appreciation {
    /// Fixed thresholds: <10 Insufficient, <12 Fair, <14 Good,
    /// <16 Very Good, else Excellent.
    pub fn from_average(avg: f64) -> Self {
        if avg < 10.0 {
            Appreciation::Insufficient
        } else if avg < 12.0 {
            Appreciation::Fair
        } else if avg < 14.0 {
            Appreciation::Good
        } else if avg < 16.0 {
            Appreciation::VeryGood
        } else {
            Appreciation::Excellent
        }
    }
}

impl fmt::Display for Appreciation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appreciation::Insufficient => write!(f, "Insufficient"),
            Appreciation::Fair => write!(f, "Fair"),
            Appreciation::Good => write!(f, "Good"),
            Appreciation::VeryGood => write!(f, "Very Good"),
            Appreciation::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Per-subject line of a transcript (derived, never persisted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectStat {
    pub subject_name: String,
    pub teacher_name: String,
    pub coefficient: u32,
    /// Coefficient-weighted subject average, rounded to 2 decimals.
    pub average: f64,
    pub appreciation: Appreciation,
}

/// A student's computed transcript for their classroom and year (derived).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub student_id: PersonId,
    pub student_name: String,
    pub class_name: String,
    pub academic_year: String,
    /// Ordered as the classroom's subjects are listed.
    pub subjects: Vec<SubjectStat>,
    /// Weighted by subject coefficients, rounded to 2 decimals.
    pub global_average: f64,
    /// "ADMITTED" if the global average is >= 10.0, else "FAILED".
    /// Advisory only until confirmed by deliberation.
    pub final_decision: String,
}

/// Decision string for a passing global average.
pub const DECISION_ADMITTED: &str = "ADMITTED";
/// Decision string for a failing global average.
pub const DECISION_FAILED: &str = "FAILED";
