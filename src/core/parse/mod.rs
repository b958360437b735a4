//! Field parsing for the edoo.sys flat export

pub mod composite;
pub mod field;

pub use composite::{decode_teacher_subjects, TeacherSubject};
pub use field::{get_date, get_gender, get_string, parse_date, parse_gender, EdoosysColumns};
