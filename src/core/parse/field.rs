//! Typed field extraction from edoo.sys flat export records
//!
//! Every getter returns `None` for a missing column, an empty cell, or a
//! value that does not parse. A bad cell never fails the record.

use crate::domain::{FlatRecord, Gender};
use chrono::NaiveDate;

/// Column labels of the edoo.sys flat export
pub struct EdoosysColumns;

impl EdoosysColumns {
    pub const STUDENT_ID: &'static str = "Schüler_Stamm_ID";
    pub const LAST_NAME: &'static str = "Familienname";
    pub const FIRST_NAME: &'static str = "Vornamen";
    pub const BIRTHDATE: &'static str = "Geburtsdatum";
    pub const GENDER: &'static str = "Geschlecht (männlich/weiblich)";
    pub const SCHOOL_CLASS: &'static str = "Klasse / Klassengruppe";
    pub const TEACHERS_WITH_SUBJECT: &'static str = "Alle Lehrkräfte (Kürzel) mit Fach";
}

const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// Trimmed, non-empty string value of a column
pub fn get_string(record: &FlatRecord, field: &str) -> Option<String> {
    record
        .get(field)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Date value of a column (`dd.MM.yyyy` or `yyyy-MM-dd`)
pub fn get_date(record: &FlatRecord, field: &str) -> Option<NaiveDate> {
    record.get(field).and_then(parse_date)
}

/// Gender value of a column
pub fn get_gender(record: &FlatRecord, field: &str) -> Option<Gender> {
    record.get(field).and_then(parse_gender)
}

/// Parse an edoo.sys date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Parse an edoo.sys gender label
pub fn parse_gender(value: &str) -> Option<Gender> {
    match value.trim().to_lowercase().as_str() {
        "männlich" | "m" => Some(Gender::Male),
        "weiblich" | "w" => Some(Gender::Female),
        "divers" | "d" => Some(Gender::Diverse),
        _ => None,
    }
}
