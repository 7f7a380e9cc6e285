//! The `scolaris board` command, jury deliberation preview.

use std::path::Path;

use anyhow::Result;
use comfy_table::Table;

use scolaris_core::deliberation::jury_board;
use scolaris_core::store::ScoreStore;

pub fn execute(data: &Path, classroom_id: u64) -> Result<()> {
    let store = super::load_store(data)?;
    let board = jury_board(&store, classroom_id)?;

    let mut table = Table::new();
    table.set_header(["Student", "Global Avg", "Computed Decision", "Status"]);
    for transcript in &board {
        let status = store
            .person(transcript.student_id)?
            .student_data()
            .map(|d| d.academic_status.to_string())
            .unwrap_or_default();
        table.add_row([
            transcript.student_name.clone(),
            format!("{:.2}", transcript.global_average),
            transcript.final_decision.clone(),
            status,
        ]);
    }
    println!("{table}");
    println!("{} student(s) on the board", board.len());
    Ok(())
}
