//! The `scolaris import-students` and `import-grades` commands.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use scolaris_import::ImportReport;

fn separator_byte(separator: char) -> Result<u8> {
    u8::try_from(u32::from(separator))
        .map_err(|_| anyhow::anyhow!("separator must be a single ASCII character"))
}

fn print_report(report: &ImportReport) {
    println!(
        "Imported {} row(s), {} error(s)",
        report.success_count, report.error_count
    );
    for error in &report.errors {
        println!("  {error}");
    }
}

pub fn students(data: &Path, file: &Path, separator: char) -> Result<()> {
    let store = super::load_store(data)?;
    let csv = File::open(file)
        .with_context(|| format!("failed to open CSV file: {}", file.display()))?;

    let report = scolaris_import::import_students(csv, separator_byte(separator)?, &store);
    super::save_store(data, &store)?;
    print_report(&report);
    Ok(())
}

pub fn grades(data: &Path, file: &Path, evaluation_id: u64, separator: char) -> Result<()> {
    let store = super::load_store(data)?;
    let csv = File::open(file)
        .with_context(|| format!("failed to open CSV file: {}", file.display()))?;

    let report =
        scolaris_import::import_grades(csv, evaluation_id, separator_byte(separator)?, &store);
    super::save_store(data, &store)?;
    print_report(&report);
    Ok(())
}
