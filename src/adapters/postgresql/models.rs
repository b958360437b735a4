//! edoo.sys row models
//!
//! Conversions from query rows into typed source records.

use crate::domain::{
    AttendanceRecord, EcfError, EcfTable, Gender, Result, SchoolClassRecord, SourceRecord,
    StudentRecord, StudentSubjectRecord, SubjectRecord, TeacherRecord,
};
use chrono::NaiveDate;
use tokio_postgres::Row;

/// Map an edoo.sys gender code to the ECF gender
///
/// edoo.sys stores either numeric keys (1, 2, 3) or letters (m, w, d).
pub fn gender_from_code(code: &str) -> Option<Gender> {
    match code.trim().to_lowercase().as_str() {
        "1" | "m" | "männlich" => Some(Gender::Male),
        "2" | "w" | "weiblich" => Some(Gender::Female),
        "3" | "d" | "divers" => Some(Gender::Diverse),
        _ => None,
    }
}

fn text(row: &Row, column: &str) -> Result<String> {
    row.try_get::<_, String>(column)
        .map_err(|e| EcfError::Database(format!("Column '{}': {}", column, e)))
}

fn opt_text(row: &Row, column: &str) -> Result<Option<String>> {
    row.try_get::<_, Option<String>>(column)
        .map(|value| value.filter(|v| !v.trim().is_empty()))
        .map_err(|e| EcfError::Database(format!("Column '{}': {}", column, e)))
}

fn opt_date(row: &Row, column: &str) -> Result<Option<NaiveDate>> {
    row.try_get::<_, Option<NaiveDate>>(column)
        .map_err(|e| EcfError::Database(format!("Column '{}': {}", column, e)))
}

fn opt_gender(row: &Row, column: &str) -> Result<Option<Gender>> {
    Ok(opt_text(row, column)?.as_deref().and_then(gender_from_code))
}

/// Convert a row of the query feeding `table`
pub fn record_from_row(table: EcfTable, row: &Row) -> Result<SourceRecord> {
    let record = match table {
        EcfTable::Subjects => SourceRecord::Subject(SubjectRecord {
            id: text(row, "id")?,
            code: text(row, "code")?,
            name: opt_text(row, "name")?,
        }),
        EcfTable::Students => SourceRecord::Student(StudentRecord {
            id: text(row, "id")?,
            last_name: opt_text(row, "last_name")?,
            first_name: opt_text(row, "first_name")?,
            gender: opt_gender(row, "gender")?,
            birthdate: opt_date(row, "birthdate")?,
        }),
        EcfTable::StudentSchoolClassAttendances => SourceRecord::Attendance(AttendanceRecord {
            student_id: text(row, "student_id")?,
            school_class_id: text(row, "school_class_id")?,
            school_class_root_id: text(row, "school_class_root_id")?,
        }),
        EcfTable::StudentSubjects => SourceRecord::StudentSubject(StudentSubjectRecord {
            student_id: text(row, "student_id")?,
            subject_id: text(row, "subject_id")?,
            school_class_id: text(row, "school_class_id")?,
            school_class_root_id: text(row, "school_class_root_id")?,
            teacher_id: text(row, "teacher_id")?,
        }),
        EcfTable::SchoolClasses => SourceRecord::SchoolClass(SchoolClassRecord {
            id: text(row, "id")?,
            code: text(row, "code")?,
            name: opt_text(row, "name")?,
            root_id: text(row, "root_id")?,
            root_code: text(row, "root_code")?,
            root_name: opt_text(row, "root_name")?,
        }),
        EcfTable::Teachers => SourceRecord::Teacher(TeacherRecord {
            id: text(row, "id")?,
            code: text(row, "code")?,
            last_name: opt_text(row, "last_name")?,
            first_name: opt_text(row, "first_name")?,
            gender: opt_gender(row, "gender")?,
            birthdate: opt_date(row, "birthdate")?,
        }),
    };
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_code() {
        assert_eq!(gender_from_code("1"), Some(Gender::Male));
        assert_eq!(gender_from_code("W"), Some(Gender::Female));
        assert_eq!(gender_from_code(" 3 "), Some(Gender::Diverse));
        assert_eq!(gender_from_code("x"), None);
    }
}
