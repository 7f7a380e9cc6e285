//! scolaris-advisory: Gateway to the external advisory services.
//!
//! Builds student feature profiles and calls the recommendation and
//! schedule-optimization services with bounded retry and deterministic
//! fallback, so advisory features never block core academic workflows.

pub mod config;
pub mod error;
pub mod gateway;
pub mod profile;
pub mod retry;
pub mod types;

pub use config::{load_config_from, AdvisoryConfig};
pub use error::AdvisoryError;
pub use gateway::AdvisoryGateway;
pub use profile::{build_student_profile, StudentProfile};
