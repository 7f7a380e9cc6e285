//! CLI integration tests driving the engine through the binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Classroom 10 with one subject (Math, coeff 2) and one evaluation;
/// student 2 passes (14.0), student 3 fails (6.0), student 4 is unenrolled.
fn school_json() -> serde_json::Value {
    serde_json::json!({
        "people": [
            {
                "id": 1, "first_name": "Ada", "last_name": "Lovelace",
                "email": "ada@school.test", "username": "ada",
                "role": {"kind": "teacher"}
            },
            {
                "id": 2, "first_name": "Jean", "last_name": "Dupont",
                "email": "jean@school.test", "username": "jdup",
                "role": {"kind": "student", "cne": "D13000", "classroom_id": 10}
            },
            {
                "id": 3, "first_name": "Ana", "last_name": "Li",
                "email": "ana@school.test", "username": "ali",
                "role": {"kind": "student", "cne": "D13001", "classroom_id": 10}
            },
            {
                "id": 4, "first_name": "Sam", "last_name": "Roe",
                "email": "sam@school.test", "username": "sroe",
                "role": {"kind": "student", "cne": "D13002"}
            }
        ],
        "classrooms": [
            {"id": 10, "name": "CI1-GINF-2024", "academic_year": "2024-2025"}
        ],
        "subjects": [
            {"id": 20, "name": "Mathematics", "classroom_id": 10, "teacher_id": 1, "coefficient": 2}
        ],
        "evaluations": [
            {"id": 30, "subject_id": 20, "title": "Final", "coefficient": 1, "max_score": 20.0}
        ],
        "grades": [
            {"student_id": 2, "evaluation_id": 30, "score": 14.0},
            {"student_id": 3, "evaluation_id": 30, "score": 6.0}
        ]
    })
}

fn write_school(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("school.json");
    fs::write(&path, school_json().to_string()).unwrap();
    path
}

fn scolaris() -> Command {
    Command::cargo_bin("scolaris").unwrap()
}

#[test]
fn transcript_shows_average_and_decision() {
    let dir = TempDir::new().unwrap();
    let data = write_school(&dir);

    scolaris()
        .args(["transcript", "--student", "2"])
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jean Dupont"))
        .stdout(predicate::str::contains("14.00"))
        .stdout(predicate::str::contains("ADMITTED"));
}

#[test]
fn transcript_for_unenrolled_student_fails_clearly() {
    let dir = TempDir::new().unwrap();
    let data = write_school(&dir);

    scolaris()
        .args(["transcript", "--student", "4"])
        .arg("--data")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no classroom assigned"));
}

#[test]
fn board_lists_enrolled_students() {
    let dir = TempDir::new().unwrap();
    let data = write_school(&dir);

    scolaris()
        .args(["board", "--classroom", "10"])
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 student(s) on the board"))
        .stdout(predicate::str::contains("PENDING"))
        .stdout(predicate::str::contains("FAILED"));
}

#[test]
fn validate_classroom_persists_decisions() {
    let dir = TempDir::new().unwrap();
    let data = write_school(&dir);

    scolaris()
        .args(["validate-classroom", "--classroom", "10"])
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 validated, 0 skipped"));

    let saved = fs::read_to_string(&data).unwrap();
    assert!(saved.contains("VALIDATED"));
    assert!(saved.contains("ADMITTED"));
    assert!(saved.contains("FAILED"));

    // Re-running skips everyone.
    scolaris()
        .args(["validate-classroom", "--classroom", "10"])
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 validated, 2 skipped"));
}

#[test]
fn grade_import_respects_validation_guard() {
    let dir = TempDir::new().unwrap();
    let data = write_school(&dir);

    scolaris()
        .args(["validate-student", "--student", "2", "--decision", "ADMITTED"])
        .arg("--data")
        .arg(&data)
        .assert()
        .success();

    let csv = dir.path().join("grades.csv");
    fs::write(&csv, "CNE;score\nD13000;19\nD13001;11\n").unwrap();

    scolaris()
        .args(["import-grades", "--evaluation", "30"])
        .arg("--file")
        .arg(&csv)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 row(s), 0 error(s)"));

    let saved = fs::read_to_string(&data).unwrap();
    // Student 2 is locked at 14.0; student 3 was updated to 11.0.
    assert!(saved.contains("14.0"));
    assert!(!saved.contains("19"));
    assert!(saved.contains("11.0"));
}

#[test]
fn student_import_reports_row_errors() {
    let dir = TempDir::new().unwrap();
    let data = write_school(&dir);

    let csv = dir.path().join("students.csv");
    fs::write(
        &csv,
        "firstName;lastName;email;username;CNE;classCode\n\
         Bob;Roy;bob@x.test;broy;D20000;CI1-GINF-2024\n\
         Eve;Ng;eve@x.test;eng;D20001;NO-SUCH-CLASS\n",
    )
    .unwrap();

    scolaris()
        .args(["import-students"])
        .arg("--file")
        .arg(&csv)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 row(s), 1 error(s)"))
        .stdout(predicate::str::contains("Row 3: unknown class code"));

    let saved = fs::read_to_string(&data).unwrap();
    assert!(saved.contains("D20000"));
    assert!(!saved.contains("D20001"));
}
