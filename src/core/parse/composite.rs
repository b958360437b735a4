//! Decoder for the teacher/subject composite cell
//!
//! The flat export packs all lessons of a student into one cell, e.g.
//! `"AB D, CD M, EF E"`: a comma-separated list of `<teacher> <subject>`
//! pairs. Items that do not yield two non-empty parts are dropped.

/// One decoded `<teacher> <subject>` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherSubject {
    pub teacher_code: String,
    pub subject_code: String,
}

impl TeacherSubject {
    pub fn new(teacher_code: impl Into<String>, subject_code: impl Into<String>) -> Self {
        Self {
            teacher_code: teacher_code.into(),
            subject_code: subject_code.into(),
        }
    }
}

/// Decode a composite cell into teacher/subject pairs
///
/// Each item must split on spaces into exactly a teacher and a subject code;
/// anything else, including a trailing third word, drops the whole item.
pub fn decode_teacher_subjects(cell: &str) -> Vec<TeacherSubject> {
    cell.split(',')
        .filter_map(|item| decode_item(item.trim()))
        .collect()
}

fn decode_item(item: &str) -> Option<TeacherSubject> {
    let parts: Vec<&str> = item.split_whitespace().collect();
    match parts.as_slice() {
        [teacher, subject] => Some(TeacherSubject::new(*teacher, *subject)),
        [] => None,
        _ => {
            tracing::debug!(item = %item, "Skipping malformed teacher/subject item");
            None
        }
    }
}
