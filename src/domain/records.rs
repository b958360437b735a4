//! Source record types
//!
//! Records as they come out of edoo.sys, before mapping. The flat export
//! yields one wide [`FlatRecord`] per line; the database yields one typed
//! record per query row.

use super::ecf::Gender;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

/// Column label to position index shared by all rows of one flat file
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Build an index from the header row; later duplicates are ignored
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positions = HashMap::new();
        for (position, header) in headers.into_iter().enumerate() {
            let label = header.as_ref().trim_matches('\u{feff}').trim().to_string();
            positions.entry(label).or_insert(position);
        }
        Self { positions }
    }

    /// Position of a column label
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the header row was empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One line of the edoo.sys flat export, addressed by column label
#[derive(Debug, Clone)]
pub struct FlatRecord {
    index: Arc<HeaderIndex>,
    values: Vec<String>,
}

impl FlatRecord {
    /// Create a record sharing the file's header index
    pub fn new(index: Arc<HeaderIndex>, values: Vec<String>) -> Self {
        Self { index, values }
    }

    /// Build a standalone record from label/value pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let index = HeaderIndex::new(pairs.iter().map(|(label, _)| *label));
        let values = pairs.iter().map(|(_, value)| value.to_string()).collect();
        Self::new(Arc::new(index), values)
    }

    /// Raw value of a column; `None` if the column or cell is missing
    pub fn get(&self, label: &str) -> Option<&str> {
        self.index
            .position(label)
            .and_then(|position| self.values.get(position))
            .map(String::as_str)
    }
}

/// School class row from the edoo.sys database
///
/// Root classes carry their own id/code/name in the root fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolClassRecord {
    pub id: String,
    pub code: String,
    pub name: Option<String>,
    pub root_id: String,
    pub root_code: String,
    pub root_name: Option<String>,
}

/// Student row from the edoo.sys database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub gender: Option<Gender>,
    pub birthdate: Option<NaiveDate>,
}

/// Student to school class enrollment from the edoo.sys database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub school_class_id: String,
    pub school_class_root_id: String,
}

/// Student subject assignment from the edoo.sys database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSubjectRecord {
    pub student_id: String,
    pub subject_id: String,
    pub school_class_id: String,
    pub school_class_root_id: String,
    pub teacher_id: String,
}

/// Subject row from the edoo.sys database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRecord {
    pub id: String,
    pub code: String,
    pub name: Option<String>,
}

/// Teacher row from the edoo.sys database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherRecord {
    pub id: String,
    pub code: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub gender: Option<Gender>,
    pub birthdate: Option<NaiveDate>,
}

/// Any record a source can produce
#[derive(Debug, Clone)]
pub enum SourceRecord {
    Flat(FlatRecord),
    SchoolClass(SchoolClassRecord),
    Student(StudentRecord),
    Attendance(AttendanceRecord),
    StudentSubject(StudentSubjectRecord),
    Subject(SubjectRecord),
    Teacher(TeacherRecord),
}

impl SourceRecord {
    /// Short variant name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SourceRecord::Flat(_) => "flat",
            SourceRecord::SchoolClass(_) => "school class",
            SourceRecord::Student(_) => "student",
            SourceRecord::Attendance(_) => "attendance",
            SourceRecord::StudentSubject(_) => "student subject",
            SourceRecord::Subject(_) => "subject",
            SourceRecord::Teacher(_) => "teacher",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_record_lookup_by_label() {
        let record = FlatRecord::from_pairs(&[("Familienname", "Duck"), ("Vornamen", "Tick")]);
        assert_eq!(record.get("Vornamen"), Some("Tick"));
        assert_eq!(record.get("Geburtsdatum"), None);
    }

    #[test]
    fn test_header_index_strips_bom_and_keeps_first_duplicate() {
        let index = HeaderIndex::new(["\u{feff}Schüler_Stamm_ID", "Klasse", "Klasse"]);
        assert_eq!(index.position("Schüler_Stamm_ID"), Some(0));
        assert_eq!(index.position("Klasse"), Some(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_short_row_yields_missing_cell() {
        let index = Arc::new(HeaderIndex::new(["A", "B"]));
        let record = FlatRecord::new(index, vec!["1".to_string()]);
        assert_eq!(record.get("A"), Some("1"));
        assert_eq!(record.get("B"), None);
    }
}
