//! Mappers for the edoo.sys flat export
//!
//! Every table is read from the same wide file, one line per student and
//! class. Teachers and subjects only exist inside the composite lesson cell.

use super::{unexpected_record, EntityMapper};
use crate::core::export::context::{DedupCache, ExportContext};
use crate::core::keys;
use crate::core::parse::{
    decode_teacher_subjects, get_date, get_gender, get_string, EdoosysColumns, TeacherSubject,
};
use crate::domain::{EcfHeaders, EcfRow, EcfTable, FlatRecord, Result, SourceRecord};

fn expect_flat(table: EcfTable, record: SourceRecord) -> Result<FlatRecord> {
    match record {
        SourceRecord::Flat(flat) => Ok(flat),
        other => Err(unexpected_record(table, &other)),
    }
}

fn lessons(record: &FlatRecord) -> Vec<TeacherSubject> {
    record
        .get(EdoosysColumns::TEACHERS_WITH_SUBJECT)
        .map(decode_teacher_subjects)
        .unwrap_or_default()
}

/// Teachers from the lesson cell, keyed by teacher code
#[derive(Debug, Default)]
pub struct FlatTeacherMapper {
    emitted: DedupCache,
}

impl EntityMapper for FlatTeacherMapper {
    fn table(&self) -> EcfTable {
        EcfTable::Teachers
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[EcfHeaders::ID, EcfHeaders::CODE]
    }

    fn map(&mut self, record: SourceRecord, _context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let record = expect_flat(self.table(), record)?;
        Ok(lessons(&record)
            .into_iter()
            .filter(|lesson| self.emitted.insert(lesson.teacher_code.clone()))
            .map(|lesson| {
                EcfRow::new()
                    .with(EcfHeaders::ID, &lesson.teacher_code)
                    .with(EcfHeaders::CODE, lesson.teacher_code)
            })
            .collect())
    }
}

/// Subjects from the lesson cell, keyed by subject code
#[derive(Debug, Default)]
pub struct FlatSubjectMapper {
    emitted: DedupCache,
}

impl EntityMapper for FlatSubjectMapper {
    fn table(&self) -> EcfTable {
        EcfTable::Subjects
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[EcfHeaders::ID, EcfHeaders::CODE]
    }

    fn map(&mut self, record: SourceRecord, _context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let record = expect_flat(self.table(), record)?;
        Ok(lessons(&record)
            .into_iter()
            .filter(|lesson| self.emitted.insert(lesson.subject_code.clone()))
            .map(|lesson| {
                EcfRow::new()
                    .with(EcfHeaders::ID, &lesson.subject_code)
                    .with(EcfHeaders::CODE, lesson.subject_code)
            })
            .collect())
    }
}

/// School classes; the class label is both id and code
#[derive(Debug, Default)]
pub struct FlatSchoolClassMapper {
    emitted: DedupCache,
}

impl EntityMapper for FlatSchoolClassMapper {
    fn table(&self) -> EcfTable {
        EcfTable::SchoolClasses
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[EcfHeaders::ID, EcfHeaders::CODE]
    }

    fn map(&mut self, record: SourceRecord, _context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let record = expect_flat(self.table(), record)?;
        let Some(class_id) = get_string(&record, EdoosysColumns::SCHOOL_CLASS) else {
            return Ok(vec![]);
        };
        if !self.emitted.insert(class_id.clone()) {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, &class_id)
            .with(EcfHeaders::CODE, class_id)])
    }
}

#[derive(Debug, Default)]
pub struct FlatStudentMapper {
    emitted: DedupCache,
}

impl EntityMapper for FlatStudentMapper {
    fn table(&self) -> EcfTable {
        EcfTable::Students
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[
            EcfHeaders::ID,
            EcfHeaders::LAST_NAME,
            EcfHeaders::FIRST_NAME,
            EcfHeaders::GENDER,
            EcfHeaders::BIRTHDATE,
        ]
    }

    fn map(&mut self, record: SourceRecord, _context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let record = expect_flat(self.table(), record)?;
        let Some(id) = get_string(&record, EdoosysColumns::STUDENT_ID) else {
            return Ok(vec![]);
        };
        if !self.emitted.insert(id.clone()) {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, id)
            .with_opt(
                EcfHeaders::LAST_NAME,
                get_string(&record, EdoosysColumns::LAST_NAME),
            )
            .with_opt(
                EcfHeaders::FIRST_NAME,
                get_string(&record, EdoosysColumns::FIRST_NAME),
            )
            .with_opt(
                EcfHeaders::GENDER,
                get_gender(&record, EdoosysColumns::GENDER),
            )
            .with_opt(
                EcfHeaders::BIRTHDATE,
                get_date(&record, EdoosysColumns::BIRTHDATE),
            )])
    }
}

/// Student to class attendances, one per line with a class
#[derive(Debug, Default)]
pub struct FlatAttendanceMapper {
    emitted: DedupCache,
}

impl EntityMapper for FlatAttendanceMapper {
    fn table(&self) -> EcfTable {
        EcfTable::StudentSchoolClassAttendances
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[EcfHeaders::STUDENT_ID, EcfHeaders::SCHOOL_CLASS_ID]
    }

    fn map(&mut self, record: SourceRecord, _context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let record = expect_flat(self.table(), record)?;
        let (Some(student_id), Some(class_id)) = (
            get_string(&record, EdoosysColumns::STUDENT_ID),
            get_string(&record, EdoosysColumns::SCHOOL_CLASS),
        ) else {
            return Ok(vec![]);
        };

        let key = keys::generate(&[&student_id, &class_id]);
        if !self.emitted.insert(key.to_string()) {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, key)
            .with(EcfHeaders::STUDENT_ID, student_id)
            .with(EcfHeaders::SCHOOL_CLASS_ID, class_id)])
    }
}

/// One student subject per decoded lesson pair
#[derive(Debug, Default)]
pub struct FlatStudentSubjectMapper {
    emitted: DedupCache,
}

impl EntityMapper for FlatStudentSubjectMapper {
    fn table(&self) -> EcfTable {
        EcfTable::StudentSubjects
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[
            EcfHeaders::STUDENT_ID,
            EcfHeaders::SCHOOL_CLASS_ID,
            EcfHeaders::SUBJECT_ID,
            EcfHeaders::TEACHER_ID,
        ]
    }

    fn map(&mut self, record: SourceRecord, _context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let record = expect_flat(self.table(), record)?;
        let Some(student_id) = get_string(&record, EdoosysColumns::STUDENT_ID) else {
            // Lines without a student id carry no subject assignment
            return Ok(vec![]);
        };
        let class_id = get_string(&record, EdoosysColumns::SCHOOL_CLASS);

        let mut rows = Vec::new();
        for lesson in lessons(&record) {
            let key = keys::generate(&[
                student_id.as_str(),
                lesson.subject_code.as_str(),
                class_id.as_deref().unwrap_or_default(),
                lesson.teacher_code.as_str(),
            ]);
            if !self.emitted.insert(key.to_string()) {
                continue;
            }

            rows.push(
                EcfRow::new()
                    .with(EcfHeaders::ID, key)
                    .with(EcfHeaders::STUDENT_ID, &student_id)
                    .with_opt(EcfHeaders::SCHOOL_CLASS_ID, class_id.as_ref())
                    .with(EcfHeaders::SUBJECT_ID, lesson.subject_code)
                    .with(EcfHeaders::TEACHER_ID, lesson.teacher_code),
            );
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EcfValue, Gender, SubjectRecord};
    use chrono::NaiveDate;

    fn line(student: &str, class: &str, lessons: &str) -> SourceRecord {
        SourceRecord::Flat(FlatRecord::from_pairs(&[
            (EdoosysColumns::STUDENT_ID, student),
            (EdoosysColumns::LAST_NAME, "Duck"),
            (EdoosysColumns::FIRST_NAME, "Tick"),
            (EdoosysColumns::GENDER, "weiblich"),
            (EdoosysColumns::BIRTHDATE, "01.01.2001"),
            (EdoosysColumns::SCHOOL_CLASS, class),
            (EdoosysColumns::TEACHERS_WITH_SUBJECT, lessons),
        ]))
    }

    #[test]
    fn test_teachers_deduplicated_across_lines() {
        let mut mapper = FlatTeacherMapper::default();
        let mut context = ExportContext::new();

        let first = mapper
            .map(line("S1", "5a", "AB D, CD M"), &mut context)
            .unwrap();
        let second = mapper
            .map(line("S2", "5a", "AB D, EF E"), &mut context)
            .unwrap();

        let codes: Vec<_> = first
            .iter()
            .chain(second.iter())
            .map(|row| row.get_text(EcfHeaders::ID).unwrap())
            .collect();
        assert_eq!(codes, vec!["AB", "CD", "EF"]);
    }

    #[test]
    fn test_subjects_keyed_by_subject_code() {
        let mut mapper = FlatSubjectMapper::default();
        let mut context = ExportContext::new();

        let rows = mapper
            .map(line("S1", "5a", "AB D, CD D, CD M"), &mut context)
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get_text(EcfHeaders::CODE).as_deref(), Some("M"));
    }

    #[test]
    fn test_school_class_skips_empty_and_duplicates() {
        let mut mapper = FlatSchoolClassMapper::default();
        let mut context = ExportContext::new();

        assert_eq!(mapper.map(line("S1", "5a", ""), &mut context).unwrap().len(), 1);
        assert!(mapper.map(line("S2", "5a", ""), &mut context).unwrap().is_empty());
        assert!(mapper.map(line("S3", "", ""), &mut context).unwrap().is_empty());
    }

    #[test]
    fn test_student_fields_are_typed() {
        let mut mapper = FlatStudentMapper::default();
        let mut context = ExportContext::new();

        let rows = mapper.map(line("S1", "5a", ""), &mut context).unwrap();
        let row = &rows[0];

        assert_eq!(row.get(EcfHeaders::GENDER), Some(&EcfValue::Gender(Gender::Female)));
        assert_eq!(
            row.get(EcfHeaders::BIRTHDATE),
            Some(&EcfValue::Date(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()))
        );
        assert!(mapper.map(line("S1", "5b", ""), &mut context).unwrap().is_empty());
    }

    #[test]
    fn test_attendance_requires_class() {
        let mut mapper = FlatAttendanceMapper::default();
        let mut context = ExportContext::new();

        assert!(mapper.map(line("S1", "", ""), &mut context).unwrap().is_empty());

        let rows = mapper.map(line("S1", "5a", ""), &mut context).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get(EcfHeaders::ID),
            Some(&EcfValue::Key(keys::generate(&["S1", "5a"])))
        );
        assert!(mapper.map(line("S1", "5a", ""), &mut context).unwrap().is_empty());
    }

    #[test]
    fn test_student_subjects_one_row_per_lesson() {
        let mut mapper = FlatStudentSubjectMapper::default();
        let mut context = ExportContext::new();

        let rows = mapper
            .map(line("S1", "5a", "AB D, broken, CD M"), &mut context)
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get_text(EcfHeaders::TEACHER_ID).as_deref(), Some("AB"));
        assert_eq!(rows[0].get_text(EcfHeaders::SUBJECT_ID).as_deref(), Some("D"));
        assert_eq!(
            rows[1].get_text(EcfHeaders::SCHOOL_CLASS_ID).as_deref(),
            Some("5a")
        );
        assert!(context.referenced_teachers.is_empty());
    }

    #[test]
    fn test_student_subjects_need_student_id() {
        let mut mapper = FlatStudentSubjectMapper::default();
        let mut context = ExportContext::new();

        assert!(mapper
            .map(line("", "5a", "AB D"), &mut context)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_wrong_record_kind_is_rejected() {
        let mut mapper = FlatSubjectMapper::default();
        let mut context = ExportContext::new();
        let record = SourceRecord::Subject(SubjectRecord {
            id: "1".to_string(),
            code: "D".to_string(),
            name: None,
        });

        assert!(mapper.map(record, &mut context).is_err());
    }
}
