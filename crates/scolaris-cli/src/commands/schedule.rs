//! The `scolaris optimize-schedule` command.

use std::path::Path;

use anyhow::Result;

use scolaris_advisory::{load_config_from, AdvisoryGateway};
use scolaris_core::store::ScoreStore;

pub async fn execute(data: &Path, classroom_id: u64, config_path: Option<&Path>) -> Result<()> {
    let store = super::load_store(data)?;
    let classroom = store.classroom(classroom_id)?;

    let config = load_config_from(config_path)?;
    let gateway = AdvisoryGateway::new(config);
    let result = gateway.optimize_schedule(classroom_id, None).await;

    if result.schedule.is_empty() {
        println!(
            "No schedule produced for {} (advisory unavailable or disabled)",
            classroom.name
        );
        return Ok(());
    }

    println!(
        "Optimized schedule for {} ({} assignment(s)):",
        classroom.name,
        result.schedule.len()
    );
    for assignment in &result.schedule {
        println!(
            "  course {} -> room {}, timeslot {}",
            assignment.course_id, assignment.room_id, assignment.timeslot_id
        );
    }
    if let Some(stats) = &result.statistics {
        if let Some(fitness) = stats.best_fitness {
            println!("Best fitness: {fitness:.3}");
        }
    }
    Ok(())
}
