//! The `scolaris recommend` command.

use std::path::Path;

use anyhow::Result;

use scolaris_advisory::{build_student_profile, load_config_from, AdvisoryGateway};

pub async fn execute(data: &Path, student_id: u64, config_path: Option<&Path>) -> Result<()> {
    let store = super::load_store(data)?;
    let profile = build_student_profile(&store, student_id)?;

    println!("Profile for {} (#{}):", profile.name, profile.student_id);
    for (subject, average) in &profile.subject_averages {
        println!("  {subject}: {average:.2}");
    }
    println!("  overall: {:.2}", profile.overall_avg);
    println!("  attendance: {:.1}%", profile.attendance_rate);
    if let Some(rank) = profile.class_rank {
        println!("  class rank: {rank}");
    }

    let config = load_config_from(config_path)?;
    let gateway = AdvisoryGateway::new(config);
    let result = gateway.get_recommendations(student_id).await;

    if result.recommendations.is_empty() {
        println!("No recommendations (advisory unavailable or disabled)");
    } else {
        println!("Recommended programs:");
        for rec in &result.recommendations {
            match rec.confidence {
                Some(confidence) => println!(
                    "  {} (score {:.2}, confidence {:.2})",
                    rec.program, rec.score, confidence
                ),
                None => println!("  {} (score {:.2})", rec.program, rec.score),
            }
        }
    }
    Ok(())
}
