//! Class roster statistics.

use serde::{Deserialize, Serialize};

use crate::model::Student;

/// Score at or above which a student passes.
pub const DEFAULT_PASS_THRESHOLD: f64 = 75.0;

/// Summary figures for a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStats {
    pub total_students: usize,
    pub highest_score: f64,
    pub pass_count: usize,
    /// Percentage of students passing, 0 for an empty roster.
    pub pass_percentage: f64,
    pub pass_threshold: f64,
}

impl RosterStats {
    pub fn compute(students: &[Student], pass_threshold: f64) -> Self {
        let total_students = students.len();
        let highest_score = students
            .iter()
            .map(|s| s.score)
            .fold(None, |max: Option<f64>, s| Some(max.map_or(s, |m| m.max(s))))
            .unwrap_or(0.0);
        let pass_count = students
            .iter()
            .filter(|s| s.score >= pass_threshold)
            .count();
        let pass_percentage = if total_students == 0 {
            0.0
        } else {
            pass_count as f64 / total_students as f64 * 100.0
        };

        Self {
            total_students,
            highest_score,
            pass_count,
            pass_percentage,
            pass_threshold,
        }
    }

    /// Whether a given score passes under this threshold.
    pub fn passes(&self, score: f64) -> bool {
        score >= self.pass_threshold
    }
}

/// Students sorted by descending score, ties broken by matricule.
pub fn ranked(students: &[Student]) -> Vec<&Student> {
    let mut sorted: Vec<&Student> = students.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.matricule.cmp(&b.matricule))
    });
    sorted
}

/// Roster as CSV with `Matricule,Name,Score` columns, in ranked order.
pub fn roster_csv(students: &[Student]) -> String {
    let mut csv = String::from("Matricule,Name,Score\n");
    for s in ranked(students) {
        csv.push_str(&format!(
            "{},{},{}%\n",
            csv_field(&s.matricule),
            csv_field(&s.full_name),
            s.score
        ));
    }
    csv
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, matricule: &str, score: f64) -> Student {
        Student {
            full_name: name.into(),
            matricule: matricule.into(),
            score,
        }
    }

    fn roster() -> Vec<Student> {
        vec![
            student("John Doe", "2024001", 85.0),
            student("Jane Smith", "2024002", 92.0),
            student("Michael Johnson", "2024003", 78.0),
            student("Emily Davis", "2024006", 73.0),
            student("James Taylor", "2024009", 68.0),
        ]
    }

    #[test]
    fn stats_for_class() {
        let stats = RosterStats::compute(&roster(), DEFAULT_PASS_THRESHOLD);
        assert_eq!(stats.total_students, 5);
        assert_eq!(stats.highest_score, 92.0);
        assert_eq!(stats.pass_count, 3);
        assert!((stats.pass_percentage - 60.0).abs() < 1e-9);
        assert!(stats.passes(75.0));
        assert!(!stats.passes(74.9));
    }

    #[test]
    fn empty_roster() {
        let stats = RosterStats::compute(&[], DEFAULT_PASS_THRESHOLD);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.highest_score, 0.0);
        assert_eq!(stats.pass_percentage, 0.0);
    }

    #[test]
    fn ranking_orders_by_score() {
        let students = roster();
        let ranked = ranked(&students);
        assert_eq!(ranked[0].full_name, "Jane Smith");
        assert_eq!(ranked[4].full_name, "James Taylor");
    }

    #[test]
    fn csv_export() {
        let students = vec![
            student("Doe, John", "2024001", 85.0),
            student("Jane \"JJ\" Smith", "2024002", 92.5),
        ];
        assert_eq!(
            roster_csv(&students),
            "Matricule,Name,Score\n\
             2024002,\"Jane \"\"JJ\"\" Smith\",92.5%\n\
             2024001,\"Doe, John\",85%\n"
        );
    }
}
