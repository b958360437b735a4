//! SQL queries against the edoo.sys database
//!
//! Every query takes the school number as `$1` and the school year code as
//! `$2`. Student-related queries take an active-only flag as `$3`. Column
//! aliases are what [`super::models`] reads.

use crate::domain::EcfTable;

/// A table query and whether it expects the active-only parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableQuery {
    pub sql: &'static str,
    pub filters_active: bool,
}

pub const SUBJECTS: &str = r#"
SELECT DISTINCT f.id::text AS id, f.kurzform AS code, f.langform AS name
FROM asv.svp_unterricht AS u
JOIN asv.svp_fach AS f ON f.id = u.fach_id
JOIN asv.svp_schule_schuljahr AS ssj ON ssj.id = u.schule_schuljahr_id
JOIN asv.svp_schule AS s ON s.id = ssj.schule_id
JOIN asv.svp_schuljahr AS sj ON sj.id = ssj.schuljahr_id
WHERE s.schulnummer = $1 AND sj.kurzform = $2
ORDER BY code
"#;

pub const STUDENTS: &str = r#"
SELECT DISTINCT p.id::text AS id, p.familienname AS last_name, p.rufname AS first_name,
       p.geschlecht AS gender, p.geburtsdatum AS birthdate
FROM asv.svp_schueler_stamm AS p
JOIN asv.svp_schueler_schuljahr AS ps ON ps.schueler_stamm_id = p.id
JOIN asv.svp_schule_schuljahr AS ssj ON ssj.id = ps.schule_schuljahr_id
JOIN asv.svp_schule AS s ON s.id = ssj.schule_id
JOIN asv.svp_schuljahr AS sj ON sj.id = ssj.schuljahr_id
WHERE s.schulnummer = $1 AND sj.kurzform = $2
  AND ($3::boolean = FALSE OR ps.austrittsdatum IS NULL OR ps.austrittsdatum > CURRENT_DATE)
ORDER BY last_name, first_name
"#;

pub const ATTENDANCES: &str = r#"
SELECT ps.schueler_stamm_id::text AS student_id, g.id::text AS school_class_id,
       g.klasse_id::text AS school_class_root_id
FROM asv.svp_schueler_schuljahr AS ps
JOIN asv.svp_klassengruppe AS g ON g.id = ps.klassengruppe_id
JOIN asv.svp_schule_schuljahr AS ssj ON ssj.id = ps.schule_schuljahr_id
JOIN asv.svp_schule AS s ON s.id = ssj.schule_id
JOIN asv.svp_schuljahr AS sj ON sj.id = ssj.schuljahr_id
WHERE s.schulnummer = $1 AND sj.kurzform = $2
  AND ($3::boolean = FALSE OR ps.austrittsdatum IS NULL OR ps.austrittsdatum > CURRENT_DATE)
"#;

pub const STUDENT_SUBJECTS: &str = r#"
SELECT ps.schueler_stamm_id::text AS student_id, sf.fach_id::text AS subject_id,
       g.id::text AS school_class_id, g.klasse_id::text AS school_class_root_id,
       u.lehrer_stamm_id::text AS teacher_id
FROM asv.svp_schueler_fach AS sf
JOIN asv.svp_schueler_schuljahr AS ps ON ps.id = sf.schueler_schuljahr_id
JOIN asv.svp_klassengruppe AS g ON g.id = ps.klassengruppe_id
JOIN asv.svp_unterricht AS u ON u.klassengruppe_id = g.id AND u.fach_id = sf.fach_id
JOIN asv.svp_schule_schuljahr AS ssj ON ssj.id = ps.schule_schuljahr_id
JOIN asv.svp_schule AS s ON s.id = ssj.schule_id
JOIN asv.svp_schuljahr AS sj ON sj.id = ssj.schuljahr_id
WHERE s.schulnummer = $1 AND sj.kurzform = $2
  AND u.lehrer_stamm_id IS NOT NULL
  AND ($3::boolean = FALSE OR ps.austrittsdatum IS NULL OR ps.austrittsdatum > CURRENT_DATE)
"#;

pub const SCHOOL_CLASSES: &str = r#"
SELECT g.id::text AS id, g.kennung AS code, g.bezeichnung AS name,
       k.id::text AS root_id, k.kennung AS root_code, k.bezeichnung AS root_name
FROM asv.svp_klassengruppe AS g
JOIN asv.svp_klasse AS k ON k.id = g.klasse_id
JOIN asv.svp_schule_schuljahr AS ssj ON ssj.id = k.schule_schuljahr_id
JOIN asv.svp_schule AS s ON s.id = ssj.schule_id
JOIN asv.svp_schuljahr AS sj ON sj.id = ssj.schuljahr_id
WHERE s.schulnummer = $1 AND sj.kurzform = $2
ORDER BY root_code, code
"#;

pub const TEACHERS: &str = r#"
SELECT DISTINCT l.id::text AS id, l.namenskuerzel AS code, l.familienname AS last_name,
       l.rufname AS first_name, l.geschlecht AS gender, l.geburtsdatum AS birthdate
FROM asv.svp_lehrer_stamm AS l
JOIN asv.svp_lehrer_schuljahr AS ls ON ls.lehrer_stamm_id = l.id
JOIN asv.svp_schule_schuljahr AS ssj ON ssj.id = ls.schule_schuljahr_id
JOIN asv.svp_schule AS s ON s.id = ssj.schule_id
JOIN asv.svp_schuljahr AS sj ON sj.id = ssj.schuljahr_id
WHERE s.schulnummer = $1 AND sj.kurzform = $2
ORDER BY code
"#;

/// The query feeding an ECF table
pub fn query_for(table: EcfTable) -> TableQuery {
    match table {
        EcfTable::Subjects => TableQuery {
            sql: SUBJECTS,
            filters_active: false,
        },
        EcfTable::Students => TableQuery {
            sql: STUDENTS,
            filters_active: true,
        },
        EcfTable::StudentSchoolClassAttendances => TableQuery {
            sql: ATTENDANCES,
            filters_active: true,
        },
        EcfTable::StudentSubjects => TableQuery {
            sql: STUDENT_SUBJECTS,
            filters_active: true,
        },
        EcfTable::SchoolClasses => TableQuery {
            sql: SCHOOL_CLASSES,
            filters_active: false,
        },
        EcfTable::Teachers => TableQuery {
            sql: TEACHERS,
            filters_active: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_flag_matches_placeholders() {
        for table in EcfTable::ALL {
            let query = query_for(table);
            assert!(query.sql.contains("$1") && query.sql.contains("$2"));
            assert_eq!(query.sql.contains("$3"), query.filters_active, "{table}");
        }
    }
}
