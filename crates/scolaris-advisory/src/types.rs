//! Wire types for the advisory services.
//!
//! These mirror the JSON the recommendation and schedule services speak
//! (snake_case bodies). Every result type has a `fallback` constructor,
//! the typed, empty substitute returned when the service is disabled or
//! unreachable. A fallback has the same shape as a live result; callers
//! distinguish the two only by the empty payload.

use serde::{Deserialize, Serialize};

use scolaris_core::model::{ClassroomId, PersonId};

/// Response of `GET /api/recommend/{studentId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub student_id: PersonId,
    #[serde(default)]
    pub recommendations: Vec<ProgramRecommendation>,
    #[serde(default)]
    pub metadata: Option<RecommendationMetadata>,
}

impl RecommendationResult {
    /// Empty substitute used when the service is disabled or unreachable.
    pub fn fallback(student_id: PersonId) -> Self {
        Self {
            student_id,
            recommendations: Vec::new(),
            metadata: None,
        }
    }
}

/// One recommended orientation/program with its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramRecommendation {
    pub program: String,
    pub score: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// How the recommendation was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub k_neighbors: Option<u32>,
    #[serde(default)]
    pub features_used: Vec<String>,
}

/// Optimization constraints for `POST /api/schedule/optimize`.
/// All default to true when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConstraints {
    pub avoid_gaps: bool,
    pub balance_days: bool,
    pub avoid_friday_evening: bool,
}

impl Default for ScheduleConstraints {
    fn default() -> Self {
        Self {
            avoid_gaps: true,
            balance_days: true,
            avoid_friday_evening: true,
        }
    }
}

/// Response of `POST /api/schedule/optimize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub classroom_id: ClassroomId,
    #[serde(default)]
    pub schedule: Vec<ScheduleAssignment>,
    #[serde(default)]
    pub statistics: Option<OptimizationStatistics>,
    #[serde(default)]
    pub quality: Option<QualityMetrics>,
}

impl ScheduleResult {
    /// Empty substitute used when the service is disabled or unreachable.
    pub fn fallback(classroom_id: ClassroomId) -> Self {
        Self {
            classroom_id,
            schedule: Vec::new(),
            statistics: None,
            quality: None,
        }
    }
}

/// One course placed in a room and timeslot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    pub course_id: u64,
    pub room_id: u64,
    pub timeslot_id: u64,
}

/// Solver statistics attached to an optimization response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationStatistics {
    #[serde(default)]
    pub generations: Option<u32>,
    #[serde(default)]
    pub best_fitness: Option<f64>,
    #[serde(default)]
    pub avg_fitness: Option<f64>,
    #[serde(default)]
    pub convergence_generation: Option<u32>,
    #[serde(default)]
    pub execution_time_seconds: Option<f64>,
}

/// Constraint-violation counts attached to an optimization response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    #[serde(default)]
    pub hard_violations: Option<u32>,
    #[serde(default)]
    pub soft_violations: Option<u32>,
    #[serde(default)]
    pub total_violations: Option<u32>,
    #[serde(default)]
    pub is_valid: Option<bool>,
}

/// Response of `POST /api/schedule/validate`. The service may attach
/// arbitrary extra diagnostics; they are preserved in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleValidation {
    pub is_valid: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ScheduleValidation {
    /// `{is_valid: false, error: ...}` substitute for an unreachable
    /// validation service.
    pub fn fallback(error: &str) -> Self {
        Self {
            is_valid: false,
            error: Some(error.to_string()),
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_default_to_all_true() {
        let c = ScheduleConstraints::default();
        assert!(c.avoid_gaps && c.balance_days && c.avoid_friday_evening);
    }

    #[test]
    fn recommendation_parses_wire_json() {
        let json = r#"{
            "student_id": 7,
            "recommendations": [
                {"program": "GINF", "score": 0.92, "confidence": 0.8},
                {"program": "GIND", "score": 0.61}
            ],
            "metadata": {"algorithm": "knn", "k_neighbors": 5, "features_used": ["math_avg"]}
        }"#;
        let result: RecommendationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.student_id, 7);
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.recommendations[0].program, "GINF");
        assert_eq!(result.recommendations[1].confidence, None);
        assert_eq!(result.metadata.unwrap().k_neighbors, Some(5));
    }

    #[test]
    fn fallbacks_are_empty_but_well_shaped() {
        let rec = RecommendationResult::fallback(3);
        assert_eq!(rec.student_id, 3);
        assert!(rec.recommendations.is_empty());

        let schedule = ScheduleResult::fallback(10);
        assert!(schedule.schedule.is_empty());
        assert!(schedule.statistics.is_none());

        let validation = ScheduleValidation::fallback("unavailable");
        assert!(!validation.is_valid);
        assert_eq!(validation.error.as_deref(), Some("unavailable"));
    }

    #[test]
    fn validation_preserves_extra_fields() {
        let json = r#"{"is_valid": true, "violations": [], "checked_at": "2024-11-04"}"#;
        let validation: ScheduleValidation = serde_json::from_str(json).unwrap();
        assert!(validation.is_valid);
        assert!(validation.extra.contains_key("violations"));
    }
}
