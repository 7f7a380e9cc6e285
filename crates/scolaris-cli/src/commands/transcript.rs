//! The `scolaris transcript` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::Table;

use scolaris_core::transcript::build_transcript;

pub fn execute(data: &Path, student_id: u64) -> Result<()> {
    let store = super::load_store(data)?;
    let transcript = build_transcript(&store, student_id)?;

    println!(
        "Transcript for {} ({} / {})",
        transcript.student_name, transcript.class_name, transcript.academic_year
    );

    let mut table = Table::new();
    table.set_header(["Subject", "Teacher", "Coeff", "Average", "Appreciation"]);
    for stat in &transcript.subjects {
        table.add_row([
            stat.subject_name.clone(),
            stat.teacher_name.clone(),
            stat.coefficient.to_string(),
            format!("{:.2}", stat.average),
            stat.appreciation.to_string(),
        ]);
    }
    println!("{table}");

    println!(
        "Global average: {:.2}  Decision: {}",
        transcript.global_average, transcript.final_decision
    );
    Ok(())
}
