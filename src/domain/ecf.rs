//! ECF target schema
//!
//! The ECF exchange format is a fixed set of flat tables. Every emitted
//! record is an [`EcfRow`]: a bag of named, typed values which the table
//! writer projects onto the active header list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// ECF tables produced by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcfTable {
    /// Teachers referenced by the exported lessons
    Teachers,
    /// Subjects
    Subjects,
    /// School classes (or class groups)
    SchoolClasses,
    /// Students
    Students,
    /// Student to school class attendances
    StudentSchoolClassAttendances,
    /// Student to subject/teacher/class assignments
    StudentSubjects,
}

impl EcfTable {
    /// All tables in declaration order
    pub const ALL: [EcfTable; 6] = [
        EcfTable::Teachers,
        EcfTable::Subjects,
        EcfTable::SchoolClasses,
        EcfTable::Students,
        EcfTable::StudentSchoolClassAttendances,
        EcfTable::StudentSubjects,
    ];

    /// The ECF table name, which is also the output file stem
    pub fn name(&self) -> &'static str {
        match self {
            EcfTable::Teachers => "Teachers",
            EcfTable::Subjects => "Subjects",
            EcfTable::SchoolClasses => "SchoolClasses",
            EcfTable::Students => "Students",
            EcfTable::StudentSchoolClassAttendances => "StudentSchoolClassAttendances",
            EcfTable::StudentSubjects => "StudentSubjects",
        }
    }

    /// Output file name (`<TableName>.csv`)
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name())
    }
}

impl fmt::Display for EcfTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EcfTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EcfTable::ALL
            .into_iter()
            .find(|table| table.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "Unknown ECF table '{}'. Must be one of: {}",
                    wanted,
                    EcfTable::ALL.map(|t| t.name()).join(", ")
                )
            })
    }
}

/// ECF header names
pub struct EcfHeaders;

impl EcfHeaders {
    pub const ID: &'static str = "Id";
    pub const CODE: &'static str = "Code";
    pub const NAME: &'static str = "Name";
    pub const LAST_NAME: &'static str = "LastName";
    pub const FIRST_NAME: &'static str = "FirstName";
    pub const GENDER: &'static str = "Gender";
    pub const BIRTHDATE: &'static str = "Birthdate";
    pub const STUDENT_ID: &'static str = "StudentId";
    pub const SCHOOL_CLASS_ID: &'static str = "SchoolClassId";
    pub const SUBJECT_ID: &'static str = "SubjectId";
    pub const TEACHER_ID: &'static str = "TeacherId";
}

/// ECF gender enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Diverse,
}

impl Gender {
    /// The ECF label written to output files
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Diverse => "Diverse",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed ECF field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcfValue {
    Text(String),
    Gender(Gender),
    Date(NaiveDate),
    Key(Uuid),
}

impl fmt::Display for EcfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcfValue::Text(value) => f.write_str(value),
            EcfValue::Gender(gender) => f.write_str(gender.as_str()),
            EcfValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            EcfValue::Key(key) => write!(f, "{}", key.hyphenated()),
        }
    }
}

impl From<String> for EcfValue {
    fn from(value: String) -> Self {
        EcfValue::Text(value)
    }
}

impl From<&str> for EcfValue {
    fn from(value: &str) -> Self {
        EcfValue::Text(value.to_string())
    }
}

impl From<&String> for EcfValue {
    fn from(value: &String) -> Self {
        EcfValue::Text(value.clone())
    }
}

impl From<Gender> for EcfValue {
    fn from(value: Gender) -> Self {
        EcfValue::Gender(value)
    }
}

impl From<NaiveDate> for EcfValue {
    fn from(value: NaiveDate) -> Self {
        EcfValue::Date(value)
    }
}

impl From<Uuid> for EcfValue {
    fn from(value: Uuid) -> Self {
        EcfValue::Key(value)
    }
}

/// One canonical output record
///
/// Values are addressed by ECF header name. Setting a field the active
/// header list does not contain is allowed; the writer drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcfRow {
    fields: HashMap<&'static str, EcfValue>,
}

impl EcfRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value (builder style)
    pub fn with(mut self, header: &'static str, value: impl Into<EcfValue>) -> Self {
        self.fields.insert(header, value.into());
        self
    }

    /// Set a field value only if present (builder style)
    pub fn with_opt<V: Into<EcfValue>>(mut self, header: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.fields.insert(header, value.into());
        }
        self
    }

    /// Get a field value
    pub fn get(&self, header: &str) -> Option<&EcfValue> {
        self.fields.get(header)
    }

    /// Get a field rendered as text
    pub fn get_text(&self, header: &str) -> Option<String> {
        self.get(header).map(|value| value.to_string())
    }

    /// Render the row in the order of `headers`, empty for absent fields
    pub fn project<S: AsRef<str>>(&self, headers: &[S]) -> Vec<String> {
        headers
            .iter()
            .map(|header| {
                self.get(header.as_ref())
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_round_trip_case_insensitive() {
        assert_eq!(
            EcfTable::from_str("studentsubjects").unwrap(),
            EcfTable::StudentSubjects
        );
        assert_eq!(EcfTable::from_str(" Teachers ").unwrap(), EcfTable::Teachers);
        assert!(EcfTable::from_str("Rooms").is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(EcfTable::SchoolClasses.file_name(), "SchoolClasses.csv");
    }

    #[test]
    fn test_value_rendering() {
        let date = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        assert_eq!(EcfValue::from(date).to_string(), "2001-01-01");
        assert_eq!(EcfValue::from(Gender::Female).to_string(), "Female");
        assert_eq!(EcfValue::from("10A").to_string(), "10A");
    }

    #[test]
    fn test_row_projection_drops_unknown_and_blanks_missing() {
        let row = EcfRow::new()
            .with(EcfHeaders::ID, "10A")
            .with(EcfHeaders::NAME, "Klasse 10A");

        assert_eq!(row.project(&[EcfHeaders::ID, EcfHeaders::CODE]), vec!["10A", ""]);
    }

    #[test]
    fn test_with_opt_skips_none() {
        let row = EcfRow::new().with_opt::<Gender>(EcfHeaders::GENDER, None);
        assert!(row.get(EcfHeaders::GENDER).is_none());
    }
}
