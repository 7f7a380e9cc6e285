//! Advisory gateway: outbound REST calls with retry and fallback.
//!
//! Advisory features must never block core academic workflows. Every
//! public operation degrades gracefully: a disabled toggle or an exhausted
//! retry budget yields a typed, empty fallback result instead of an error.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use scolaris_core::model::{ClassroomId, PersonId};

use crate::config::AdvisoryConfig;
use crate::error::AdvisoryError;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::types::{
    RecommendationResult, ScheduleAssignment, ScheduleConstraints, ScheduleResult,
    ScheduleValidation,
};

#[derive(Serialize)]
struct OptimizeRequest {
    classroom_id: ClassroomId,
    constraints: ScheduleConstraints,
}

#[derive(Serialize)]
struct ValidateRequest<'a> {
    classroom_id: ClassroomId,
    schedule: &'a [ScheduleAssignment],
}

/// Client for the external recommendation and schedule services.
pub struct AdvisoryGateway {
    client: reqwest::Client,
    config: AdvisoryConfig,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl AdvisoryGateway {
    pub fn new(config: AdvisoryConfig) -> Self {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Constructor with an injected sleeper, for deterministic retry tests.
    pub fn with_sleeper(config: AdvisoryConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .expect("failed to build HTTP client");
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay());

        Self {
            client,
            config,
            retry,
            sleeper,
        }
    }

    /// Orientation recommendations for a student.
    ///
    /// Returns the empty fallback when the feature is disabled or the
    /// service stays unreachable through the retry budget.
    #[instrument(skip(self))]
    pub async fn get_recommendations(&self, student_id: PersonId) -> RecommendationResult {
        if !self.config.recommendation_enabled {
            tracing::warn!("recommendation service disabled, returning fallback");
            return RecommendationResult::fallback(student_id);
        }

        let url = format!(
            "{}/api/recommend/{}",
            self.config.recommendation_url, student_id
        );
        let result = self
            .retry
            .run(self.sleeper.as_ref(), |_| {
                let request = self.client.get(&url);
                async move { send_json::<RecommendationResult>(request).await }
            })
            .await;

        match result {
            Ok(response) => {
                tracing::info!(
                    student_id,
                    count = response.recommendations.len(),
                    "recommendations received"
                );
                response
            }
            Err(e) => {
                tracing::warn!(student_id, error = %e, "recommendation service unavailable, returning fallback");
                RecommendationResult::fallback(student_id)
            }
        }
    }

    /// Optimize a classroom's schedule. Omitted constraints default to
    /// all-true.
    #[instrument(skip(self, constraints))]
    pub async fn optimize_schedule(
        &self,
        classroom_id: ClassroomId,
        constraints: Option<ScheduleConstraints>,
    ) -> ScheduleResult {
        if !self.config.schedule_enabled {
            tracing::warn!("schedule service disabled, returning fallback");
            return ScheduleResult::fallback(classroom_id);
        }

        let url = format!("{}/api/schedule/optimize", self.config.schedule_url);
        let body = OptimizeRequest {
            classroom_id,
            constraints: constraints.unwrap_or_default(),
        };
        let result = self
            .retry
            .run(self.sleeper.as_ref(), |_| {
                let request = self.client.post(&url).json(&body);
                async move { send_json::<ScheduleResult>(request).await }
            })
            .await;

        match result {
            Ok(response) => {
                tracing::info!(
                    classroom_id,
                    assignments = response.schedule.len(),
                    "schedule optimized"
                );
                response
            }
            Err(e) => {
                tracing::warn!(classroom_id, error = %e, "schedule service unavailable, returning fallback");
                ScheduleResult::fallback(classroom_id)
            }
        }
    }

    /// Check an existing schedule against the service's constraints.
    ///
    /// Falls back to `{is_valid: false, error: ...}` when unreachable.
    #[instrument(skip(self, schedule))]
    pub async fn validate_schedule(
        &self,
        classroom_id: ClassroomId,
        schedule: &[ScheduleAssignment],
    ) -> ScheduleValidation {
        if !self.config.schedule_enabled {
            tracing::warn!("schedule service disabled, returning fallback");
            return ScheduleValidation::fallback("schedule service disabled");
        }

        let url = format!("{}/api/schedule/validate", self.config.schedule_url);
        let body = ValidateRequest {
            classroom_id,
            schedule,
        };
        let result = self
            .retry
            .run(self.sleeper.as_ref(), |_| {
                let request = self.client.post(&url).json(&body);
                async move { send_json::<ScheduleValidation>(request).await }
            })
            .await;

        match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(classroom_id, error = %e, "validation service unavailable, returning fallback");
                ScheduleValidation::fallback("validation service unavailable")
            }
        }
    }
}

/// Send a request and parse a JSON body, classifying failures for the
/// retry path.
async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, AdvisoryError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            AdvisoryError::Timeout
        } else {
            AdvisoryError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AdvisoryError::Http {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AdvisoryError::InvalidBody(e.to_string()))
}
