//! scolaris-import: Bulk CSV import row semantics.
//!
//! The `csv` crate does the parsing; this crate owns the row contracts:
//! column validation, per-row error isolation, and the store writes. One
//! bad row never aborts a batch: each failure is recorded with its row
//! number and processing continues. A file-level read failure is reported
//! as row 0.

use std::io::Read;

use serde::{Deserialize, Serialize};

use scolaris_core::model::{EvaluationId, Person, Role, StudentData, ValidationStatus};
use scolaris_core::store::ScoreStore;

/// Password assigned to imported students until they change it.
pub const DEFAULT_PASSWORD: &str = "1234";

/// Counts plus one `"Row N: <message>"` entry per failed row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    fn add_success(&mut self) {
        self.success_count += 1;
    }

    fn add_error(&mut self, row: usize, message: impl std::fmt::Display) {
        self.error_count += 1;
        self.errors.push(format!("Row {row}: {message}"));
    }
}

fn csv_reader<R: Read>(reader: R, separator: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn row_number(record: &csv::StringRecord, index: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(index + 2)
}

/// Import students from CSV rows of the form
/// `firstName;lastName;email;username;CNE;classCode` (header row skipped).
///
/// Unknown class codes and short rows are per-row errors. Duplicate
/// usernames are not deduplicated here: that is the store's uniqueness
/// constraint.
pub fn import_students<R: Read>(
    reader: R,
    separator: u8,
    store: &dyn ScoreStore,
) -> ImportReport {
    let mut report = ImportReport::default();
    let mut rdr = csv_reader(reader, separator);

    if let Err(e) = rdr.headers() {
        report.add_error(0, format!("file read error: {e}"));
        return report;
    }

    for (index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                report.add_error(index + 2, format!("unreadable row: {e}"));
                continue;
            }
        };
        let row = row_number(&record, index);

        if record.len() < 6 {
            report.add_error(row, "missing columns");
            continue;
        }

        let class_code = record[5].trim();
        let Some(classroom) = store.find_classroom_by_name(class_code) else {
            report.add_error(row, format!("unknown class code: {class_code}"));
            continue;
        };

        let person = Person {
            id: 0,
            first_name: record[0].trim().to_string(),
            last_name: record[1].trim().to_string(),
            email: record[2].trim().to_string(),
            username: record[3].trim().to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            role: Role::Student(StudentData {
                cne: record[4].trim().to_string(),
                classroom_id: Some(classroom.id),
                academic_status: ValidationStatus::Pending,
                jury_decision: None,
            }),
        };

        match store.insert_person(person) {
            Ok(_) => report.add_success(),
            Err(e) => report.add_error(row, e),
        }
    }

    tracing::info!(
        successes = report.success_count,
        errors = report.error_count,
        "student import finished"
    );
    report
}

/// Import grades for one evaluation from CSV rows of the form `CNE;score`
/// (header row skipped).
///
/// Unknown CNEs and non-numeric scores are per-row errors. An existing
/// grade for (student, evaluation) is updated, otherwise one is created.
/// VALIDATED students are silently skipped per the deliberation guard.
pub fn import_grades<R: Read>(
    reader: R,
    evaluation_id: EvaluationId,
    separator: u8,
    store: &dyn ScoreStore,
) -> ImportReport {
    let mut report = ImportReport::default();

    let evaluation = match store.evaluation(evaluation_id) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            report.add_error(0, e);
            return report;
        }
    };

    let mut rdr = csv_reader(reader, separator);
    if let Err(e) = rdr.headers() {
        report.add_error(0, format!("file read error: {e}"));
        return report;
    }

    for (index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                report.add_error(index + 2, format!("unreadable row: {e}"));
                continue;
            }
        };
        let row = row_number(&record, index);

        if record.len() < 2 {
            report.add_error(row, "missing columns");
            continue;
        }

        let cne = record[0].trim();
        let Ok(score) = record[1].trim().parse::<f64>() else {
            report.add_error(row, "invalid score format");
            continue;
        };

        let Some(student) = store.find_student_by_cne(cne) else {
            report.add_error(row, format!("unknown CNE: {cne}"));
            continue;
        };

        let validated = student
            .student_data()
            .map(|d| d.academic_status == ValidationStatus::Validated)
            .unwrap_or(false);
        if validated {
            // Deliberation guard: the row succeeds but writes nothing.
            tracing::debug!(student_id = student.id, "student validated, row skipped");
            report.add_success();
            continue;
        }

        match store.upsert_grade(student.id, evaluation.id, score) {
            Ok(()) => report.add_success(),
            Err(e) => report.add_error(row, e),
        }
    }

    tracing::info!(
        evaluation_id,
        successes = report.success_count,
        errors = report.error_count,
        "grade import finished"
    );
    report
}
