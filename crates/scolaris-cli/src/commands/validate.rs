//! The `scolaris validate-student` and `validate-classroom` commands.

use std::path::Path;

use anyhow::Result;

use scolaris_core::deliberation;

pub fn student(data: &Path, student_id: u64, decision: &str) -> Result<()> {
    let store = super::load_store(data)?;
    deliberation::validate_student(&store, student_id, decision)?;
    super::save_store(data, &store)?;
    println!("Student {student_id} validated: {decision}");
    Ok(())
}

pub fn classroom(data: &Path, classroom_id: u64, force: bool) -> Result<()> {
    let store = super::load_store(data)?;
    let summary = deliberation::validate_classroom(&store, classroom_id, force)?;
    super::save_store(data, &store)?;
    println!(
        "Classroom {classroom_id}: {} validated, {} skipped",
        summary.validated, summary.skipped
    );
    Ok(())
}
