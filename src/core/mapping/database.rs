//! Mappers for the edoo.sys database
//!
//! Attendances and student subjects fill the existence filters in
//! [`ExportContext`]; school classes and teachers, exported later, only emit
//! rows that one of those relations referenced.

use super::{unexpected_record, EntityMapper};
use crate::core::export::collapse::{ClassGroupCollapser, ClassGroupPolicy};
use crate::core::export::context::{DedupCache, ExportContext};
use crate::core::keys;
use crate::domain::{EcfHeaders, EcfRow, EcfTable, Result, SourceRecord};

#[derive(Debug, Default)]
pub struct DbSubjectMapper {
    emitted: DedupCache,
}

impl EntityMapper for DbSubjectMapper {
    fn table(&self) -> EcfTable {
        EcfTable::Subjects
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[EcfHeaders::ID, EcfHeaders::CODE, EcfHeaders::NAME]
    }

    fn map(&mut self, record: SourceRecord, _context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let subject = match record {
            SourceRecord::Subject(subject) => subject,
            other => return Err(unexpected_record(self.table(), &other)),
        };
        if !self.emitted.insert(subject.id.clone()) {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, subject.id)
            .with(EcfHeaders::CODE, subject.code)
            .with_opt(EcfHeaders::NAME, subject.name)])
    }
}

/// Active students of the selected school year
#[derive(Debug, Default)]
pub struct DbStudentMapper {
    emitted: DedupCache,
}

impl EntityMapper for DbStudentMapper {
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
        let student = match record {
            SourceRecord::Student(student) => student,
            other => return Err(unexpected_record(self.table(), &other)),
        };
        if !self.emitted.insert(student.id.clone()) {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, student.id)
            .with_opt(EcfHeaders::LAST_NAME, student.last_name)
            .with_opt(EcfHeaders::FIRST_NAME, student.first_name)
            .with_opt(EcfHeaders::GENDER, student.gender)
            .with_opt(EcfHeaders::BIRTHDATE, student.birthdate)])
    }
}

/// Attendances; records every referenced class in the context
#[derive(Debug)]
pub struct DbAttendanceMapper {
    policy: ClassGroupPolicy,
    emitted: DedupCache,
}

impl DbAttendanceMapper {
    pub fn new(policy: ClassGroupPolicy) -> Self {
        Self {
            policy,
            emitted: DedupCache::new(),
        }
    }
}

impl EntityMapper for DbAttendanceMapper {
    fn table(&self) -> EcfTable {
        EcfTable::StudentSchoolClassAttendances
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[
            EcfHeaders::ID,
            EcfHeaders::STUDENT_ID,
            EcfHeaders::SCHOOL_CLASS_ID,
        ]
    }

    fn map(&mut self, record: SourceRecord, context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let attendance = match record {
            SourceRecord::Attendance(attendance) => attendance,
            other => return Err(unexpected_record(self.table(), &other)),
        };

        let class_id = self
            .policy
            .effective_class_id(&attendance.school_class_id, &attendance.school_class_root_id)
            .to_string();
        let key = keys::generate(&[&attendance.student_id, &class_id]);

        // Duplicates still reference their class
        context.referenced_school_classes.insert(class_id.clone());
        if !self.emitted.insert(key.to_string()) {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, key)
            .with(EcfHeaders::STUDENT_ID, attendance.student_id)
            .with(EcfHeaders::SCHOOL_CLASS_ID, class_id)])
    }
}

/// Student subjects; records every referenced teacher in the context
#[derive(Debug)]
pub struct DbStudentSubjectMapper {
    policy: ClassGroupPolicy,
    emitted: DedupCache,
}

impl DbStudentSubjectMapper {
    pub fn new(policy: ClassGroupPolicy) -> Self {
        Self {
            policy,
            emitted: DedupCache::new(),
        }
    }
}

impl EntityMapper for DbStudentSubjectMapper {
    fn table(&self) -> EcfTable {
        EcfTable::StudentSubjects
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[
            EcfHeaders::ID,
            EcfHeaders::STUDENT_ID,
            EcfHeaders::SCHOOL_CLASS_ID,
            EcfHeaders::SUBJECT_ID,
            EcfHeaders::TEACHER_ID,
        ]
    }

    fn map(&mut self, record: SourceRecord, context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let assignment = match record {
            SourceRecord::StudentSubject(assignment) => assignment,
            other => return Err(unexpected_record(self.table(), &other)),
        };

        let class_id = self
            .policy
            .effective_class_id(&assignment.school_class_id, &assignment.school_class_root_id)
            .to_string();
        let key = keys::generate(&[
            &assignment.student_id,
            &assignment.subject_id,
            &class_id,
            &assignment.teacher_id,
        ]);

        context
            .referenced_teachers
            .insert(assignment.teacher_id.clone());
        if !self.emitted.insert(key.to_string()) {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, key)
            .with(EcfHeaders::STUDENT_ID, assignment.student_id)
            .with(EcfHeaders::SUBJECT_ID, assignment.subject_id)
            .with(EcfHeaders::SCHOOL_CLASS_ID, class_id)
            .with(EcfHeaders::TEACHER_ID, assignment.teacher_id)])
    }
}

/// School classes gated by the attendance filter
#[derive(Debug)]
pub struct DbSchoolClassMapper {
    collapser: ClassGroupCollapser,
}

impl DbSchoolClassMapper {
    pub fn new(policy: ClassGroupPolicy) -> Self {
        Self {
            collapser: ClassGroupCollapser::new(policy),
        }
    }
}

impl EntityMapper for DbSchoolClassMapper {
    fn table(&self) -> EcfTable {
        EcfTable::SchoolClasses
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[EcfHeaders::ID, EcfHeaders::CODE]
    }

    fn map(&mut self, record: SourceRecord, context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let class = match record {
            SourceRecord::SchoolClass(class) => class,
            other => return Err(unexpected_record(self.table(), &other)),
        };

        Ok(self
            .collapser
            .resolve(&class, &context.referenced_school_classes)
            .map(|resolved| {
                EcfRow::new()
                    .with(EcfHeaders::ID, resolved.id)
                    .with(EcfHeaders::CODE, resolved.code)
                    .with_opt(EcfHeaders::NAME, resolved.name)
            })
            .into_iter()
            .collect())
    }
}

/// Teachers gated by the student subject filter
#[derive(Debug, Default)]
pub struct DbTeacherMapper {
    emitted: DedupCache,
}

impl EntityMapper for DbTeacherMapper {
    fn table(&self) -> EcfTable {
        EcfTable::Teachers
    }

    fn default_headers(&self) -> &'static [&'static str] {
        &[
            EcfHeaders::ID,
            EcfHeaders::CODE,
            EcfHeaders::LAST_NAME,
            EcfHeaders::FIRST_NAME,
            EcfHeaders::GENDER,
            EcfHeaders::BIRTHDATE,
        ]
    }

    fn map(&mut self, record: SourceRecord, context: &mut ExportContext) -> Result<Vec<EcfRow>> {
        let teacher = match record {
            SourceRecord::Teacher(teacher) => teacher,
            other => return Err(unexpected_record(self.table(), &other)),
        };
        if !context.referenced_teachers.contains(&teacher.id)
            || !self.emitted.insert(teacher.id.clone())
        {
            return Ok(vec![]);
        }

        Ok(vec![EcfRow::new()
            .with(EcfHeaders::ID, teacher.id)
            .with(EcfHeaders::CODE, teacher.code)
            .with_opt(EcfHeaders::LAST_NAME, teacher.last_name)
            .with_opt(EcfHeaders::FIRST_NAME, teacher.first_name)
            .with_opt(EcfHeaders::GENDER, teacher.gender)
            .with_opt(EcfHeaders::BIRTHDATE, teacher.birthdate)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttendanceRecord, SchoolClassRecord, StudentSubjectRecord, TeacherRecord};

    fn teacher(id: &str) -> SourceRecord {
        SourceRecord::Teacher(TeacherRecord {
            id: id.to_string(),
            code: format!("{id}-code"),
            last_name: Some("Lehmann".to_string()),
            first_name: None,
            gender: None,
            birthdate: None,
        })
    }

    fn assignment(student: &str, class: &str, root: &str, teacher: &str) -> SourceRecord {
        SourceRecord::StudentSubject(StudentSubjectRecord {
            student_id: student.to_string(),
            subject_id: "M".to_string(),
            school_class_id: class.to_string(),
            school_class_root_id: root.to_string(),
            teacher_id: teacher.to_string(),
        })
    }

    fn attendance(student: &str, class: &str, root: &str) -> SourceRecord {
        SourceRecord::Attendance(AttendanceRecord {
            student_id: student.to_string(),
            school_class_id: class.to_string(),
            school_class_root_id: root.to_string(),
        })
    }

    #[test]
    fn test_teacher_emitted_only_when_referenced() {
        let mut context = ExportContext::new();
        let mut subjects = DbStudentSubjectMapper::new(ClassGroupPolicy::CollapseToRoot);
        let mut teachers = DbTeacherMapper::default();

        subjects
            .map(assignment("S1", "G1", "R1", "T1"), &mut context)
            .unwrap();

        assert_eq!(teachers.map(teacher("T1"), &mut context).unwrap().len(), 1);
        assert!(teachers.map(teacher("T2"), &mut context).unwrap().is_empty());
        assert!(teachers.map(teacher("T1"), &mut context).unwrap().is_empty());
    }

    #[test]
    fn test_attendance_uses_root_when_collapsing() {
        let mut context = ExportContext::new();
        let mut mapper = DbAttendanceMapper::new(ClassGroupPolicy::CollapseToRoot);

        let rows = mapper.map(attendance("S1", "G1", "R1"), &mut context).unwrap();
        assert_eq!(rows[0].get_text(EcfHeaders::SCHOOL_CLASS_ID).as_deref(), Some("R1"));
        assert!(context.referenced_school_classes.contains("R1"));

        // second group of the same root collapses onto the same key
        assert!(mapper
            .map(attendance("S1", "G2", "R1"), &mut context)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_duplicate_attendance_still_references_class() {
        let mut mapper = DbAttendanceMapper::new(ClassGroupPolicy::CollapseToRoot);
        mapper
            .map(attendance("S1", "G1", "R1"), &mut ExportContext::new())
            .unwrap();

        let mut context = ExportContext::new();
        let rows = mapper.map(attendance("S1", "G2", "R1"), &mut context).unwrap();
        assert!(rows.is_empty());
        assert!(context.referenced_school_classes.contains("R1"));
    }

    #[test]
    fn test_attendance_keeps_group_id() {
        let mut context = ExportContext::new();
        let mut mapper = DbAttendanceMapper::new(ClassGroupPolicy::KeepGroups);

        mapper.map(attendance("S1", "G1", "R1"), &mut context).unwrap();
        assert!(context.referenced_school_classes.contains("G1"));
        assert!(!context.referenced_school_classes.contains("R1"));
    }

    #[test]
    fn test_student_subject_key_matches_generator() {
        let mut context = ExportContext::new();
        let mut mapper = DbStudentSubjectMapper::new(ClassGroupPolicy::KeepGroups);

        let rows = mapper
            .map(assignment("S1", "G1", "R1", "T1"), &mut context)
            .unwrap();
        let expected = keys::generate(&["S1", "M", "G1", "T1"]).to_string();
        assert_eq!(rows[0].get_text(EcfHeaders::ID), Some(expected));
    }

    #[test]
    fn test_school_class_gated_by_attendance() {
        let mut context = ExportContext::new();
        context.referenced_school_classes.insert("R1");
        let mut mapper = DbSchoolClassMapper::new(ClassGroupPolicy::CollapseToRoot);

        let class = |id: &str, root: &str| {
            SourceRecord::SchoolClass(SchoolClassRecord {
                id: id.to_string(),
                code: id.to_string(),
                name: None,
                root_id: root.to_string(),
                root_code: root.to_string(),
                root_name: None,
            })
        };

        assert_eq!(mapper.map(class("G1", "R1"), &mut context).unwrap().len(), 1);
        assert!(mapper.map(class("G2", "R1"), &mut context).unwrap().is_empty());
        assert!(mapper.map(class("R2", "R2"), &mut context).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_record_kind_is_rejected() {
        let mut context = ExportContext::new();
        let mut mapper = DbTeacherMapper::default();
        let err = mapper
            .map(attendance("S1", "G1", "R1"), &mut context)
            .unwrap_err();
        assert!(err.to_string().contains("Teachers"));
    }
}
