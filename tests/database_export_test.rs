//! Export pipeline tests for the edoo.sys database source
//!
//! The database is replaced by an in-memory record source, so these tests
//! cover scheduling, referential filtering and class group handling
//! without a PostgreSQL server.

use async_trait::async_trait;
use chrono::NaiveDate;
use ecf_edoosys::adapters::postgresql::{EdoosysDbReader, PostgreSQLClient};
use ecf_edoosys::adapters::source::{RecordSource, RecordStream, SourceSelection};
use ecf_edoosys::config::{secret_string, EcfExportConfig, SourceProvider};
use ecf_edoosys::core::export::ExportCoordinator;
use ecf_edoosys::domain::{
    AttendanceRecord, EcfTable, Gender, Result, SchoolClassRecord, SourceRecord, StudentRecord,
    StudentSubjectRecord, SubjectRecord, TeacherRecord,
};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::watch;

/// In-memory stand-in for the edoo.sys database
#[derive(Default)]
struct MemorySource {
    tables: HashMap<EcfTable, Vec<SourceRecord>>,
    requests: Mutex<Vec<(EcfTable, SourceSelection)>>,
}

impl MemorySource {
    fn with(mut self, table: EcfTable, records: Vec<SourceRecord>) -> Self {
        self.tables.insert(table, records);
        self
    }

    fn requested_tables(&self) -> Vec<EcfTable> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(table, _)| *table)
            .collect()
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    fn provider(&self) -> SourceProvider {
        SourceProvider::Postgres
    }

    async fn records(&self, table: EcfTable, selection: &SourceSelection) -> Result<RecordStream> {
        self.requests
            .lock()
            .unwrap()
            .push((table, selection.clone()));
        let records = self.tables.get(&table).cloned().unwrap_or_default();
        Ok(stream::iter(records.into_iter().map(Ok)).boxed())
    }
}

fn class_group(id: &str, code: &str, root_id: &str, root_code: &str) -> SourceRecord {
    SourceRecord::SchoolClass(SchoolClassRecord {
        id: id.to_string(),
        code: code.to_string(),
        name: None,
        root_id: root_id.to_string(),
        root_code: root_code.to_string(),
        root_name: Some(format!("Klasse {root_code}")),
    })
}

fn attendance(student: &str, group: &str, root: &str) -> SourceRecord {
    SourceRecord::Attendance(AttendanceRecord {
        student_id: student.to_string(),
        school_class_id: group.to_string(),
        school_class_root_id: root.to_string(),
    })
}

fn teacher(id: &str, code: &str) -> SourceRecord {
    SourceRecord::Teacher(TeacherRecord {
        id: id.to_string(),
        code: code.to_string(),
        last_name: Some("Müller".to_string()),
        first_name: None,
        gender: Some(Gender::Female),
        birthdate: NaiveDate::from_ymd_opt(1980, 5, 4),
    })
}

/// Two students in the groups 10A-1 and 10A-2, one unused class 10B and
/// one teacher without lessons
fn school() -> MemorySource {
    MemorySource::default()
        .with(
            EcfTable::Subjects,
            vec![SourceRecord::Subject(SubjectRecord {
                id: "s-d".to_string(),
                code: "D".to_string(),
                name: Some("Deutsch".to_string()),
            })],
        )
        .with(
            EcfTable::Students,
            vec![SourceRecord::Student(StudentRecord {
                id: "p1".to_string(),
                last_name: Some("Duck".to_string()),
                first_name: Some("Tick".to_string()),
                gender: Some(Gender::Male),
                birthdate: NaiveDate::from_ymd_opt(2010, 1, 1),
            })],
        )
        .with(
            EcfTable::StudentSchoolClassAttendances,
            vec![attendance("p1", "g1", "k10a"), attendance("p2", "g2", "k10a")],
        )
        .with(
            EcfTable::StudentSubjects,
            vec![SourceRecord::StudentSubject(StudentSubjectRecord {
                student_id: "p1".to_string(),
                subject_id: "s-d".to_string(),
                school_class_id: "g1".to_string(),
                school_class_root_id: "k10a".to_string(),
                teacher_id: "t1".to_string(),
            })],
        )
        .with(
            EcfTable::SchoolClasses,
            vec![
                class_group("g1", "1", "k10a", "10A"),
                class_group("g2", "2", "k10a", "10A"),
                class_group("g3", "1", "k10b", "10B"),
            ],
        )
        .with(
            EcfTable::Teachers,
            vec![teacher("t1", "MÜL"), teacher("t2", "SCH")],
        )
}

fn settings(dir: &Path, no_school_class_groups: bool) -> EcfExportConfig {
    EcfExportConfig {
        source_provider: SourceProvider::Postgres,
        source_file_name: None,
        database_connection: None,
        target_folder_name: dir.join("ecf").display().to_string(),
        school_no: Some("012345".to_string()),
        school_year_code: Some("2021/22".to_string()),
        no_school_class_groups,
        separator: None,
        files: vec![],
    }
}

fn read_table(dir: &Path, table: EcfTable) -> String {
    fs::read_to_string(dir.join("ecf").join(table.file_name())).unwrap()
}

#[tokio::test]
async fn test_tables_run_in_dependency_order() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(school());
    let (_tx, rx) = watch::channel(false);

    let coordinator =
        ExportCoordinator::with_source(&settings(dir.path(), true), source.clone(), rx).unwrap();
    let summary = coordinator.execute_export().await.unwrap();

    assert_eq!(summary.total_tables, 6);
    assert_eq!(
        source.requested_tables(),
        vec![
            EcfTable::Subjects,
            EcfTable::Students,
            EcfTable::StudentSchoolClassAttendances,
            EcfTable::StudentSubjects,
            EcfTable::SchoolClasses,
            EcfTable::Teachers,
        ]
    );

    let requests = source.requests.lock().unwrap();
    for (table, selection) in requests.iter() {
        assert_eq!(selection.school_no.as_deref(), Some("012345"));
        assert_eq!(selection.school_year_code.as_deref(), Some("2021/22"));
        let student_table = matches!(
            table,
            EcfTable::Students | EcfTable::StudentSchoolClassAttendances | EcfTable::StudentSubjects
        );
        assert_eq!(selection.active_only, student_table, "{table}");
    }
}

#[tokio::test]
async fn test_only_referenced_teachers_are_exported() {
    let dir = TempDir::new().unwrap();
    let (_tx, rx) = watch::channel(false);

    let coordinator =
        ExportCoordinator::with_source(&settings(dir.path(), true), Arc::new(school()), rx)
            .unwrap();
    let summary = coordinator.execute_export().await.unwrap();

    assert_eq!(summary.records_for(EcfTable::Teachers), Some(1));
    assert_eq!(
        read_table(dir.path(), EcfTable::Teachers),
        "Id;Code;LastName;FirstName;Gender;Birthdate\nt1;MÜL;Müller;;Female;1980-05-04\n"
    );
    assert_eq!(
        read_table(dir.path(), EcfTable::Students),
        "Id;LastName;FirstName;Gender;Birthdate\np1;Duck;Tick;Male;2010-01-01\n"
    );
}

#[tokio::test]
async fn test_class_groups_collapse_to_their_class() {
    let dir = TempDir::new().unwrap();
    let (_tx, rx) = watch::channel(false);

    let coordinator =
        ExportCoordinator::with_source(&settings(dir.path(), true), Arc::new(school()), rx)
            .unwrap();
    coordinator.execute_export().await.unwrap();

    assert_eq!(
        read_table(dir.path(), EcfTable::SchoolClasses),
        "Id;Code\nk10a;10A\n"
    );

    let attendances = read_table(dir.path(), EcfTable::StudentSchoolClassAttendances);
    let class_ids: Vec<_> = attendances
        .lines()
        .skip(1)
        .map(|line| line.rsplit(';').next().unwrap())
        .collect();
    assert_eq!(class_ids, vec!["k10a", "k10a"]);
}

#[tokio::test]
async fn test_class_groups_kept_with_combined_code() {
    let dir = TempDir::new().unwrap();
    let (_tx, rx) = watch::channel(false);

    let coordinator =
        ExportCoordinator::with_source(&settings(dir.path(), false), Arc::new(school()), rx)
            .unwrap();
    coordinator.execute_export().await.unwrap();

    assert_eq!(
        read_table(dir.path(), EcfTable::SchoolClasses),
        "Id;Code\ng1;10A_1\ng2;10A_2\n"
    );
}

#[tokio::test]
async fn test_missing_school_no_aborts_run() {
    let dir = TempDir::new().unwrap();
    let mut config = settings(dir.path(), true);
    config.school_no = None;

    let client = PostgreSQLClient::new(&secret_string(
        "postgresql://ecf@localhost:5432/edoosys".to_string(),
    ))
    .await
    .unwrap();
    let (_tx, rx) = watch::channel(false);
    let coordinator =
        ExportCoordinator::with_source(&config, Arc::new(EdoosysDbReader::new(client)), rx)
            .unwrap();

    let failure = coordinator.execute_export().await.unwrap_err();

    assert!(failure.error.is_configuration());
    assert!(failure
        .to_string()
        .contains("No school no and/or no school year for edoo.sys database defined"));
    assert_eq!(failure.partial.total_tables, 0);
}
