use crate::config::{MIN_SESSION_TOTAL, TOP_N};
use crate::models::{AttendanceRecord, Category, ContributionRecord};

/// A record placed in its season's full ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a, R> {
    pub rank: usize,
    pub top: bool,
    pub total: f64,
    pub record: &'a R,
}

/// Sum of the six categories. A sum that overflows counts as 0, the same
/// as any other number that cannot be represented.
pub fn total_score(record: &ContributionRecord) -> f64 {
    let total: f64 = Category::ALL
        .iter()
        .map(|category| record.category(*category))
        .sum();
    if total.is_finite() {
        total
    } else {
        0.0
    }
}

/// Whole-percent attendance, with the session count floored at one.
pub fn attendance_rate(record: &AttendanceRecord) -> u32 {
    let sessions = record.total.max(MIN_SESSION_TOTAL);
    let present = record.present.max(0.0);
    let rate = (present / sessions * 100.0).round();
    if rate.is_finite() {
        rate as u32
    } else {
        0
    }
}

/// Rank every record of a season by total, highest first.
///
/// Ties keep their input order. The `top` flag depends only on the full
/// season, so later keyword filtering cannot move a record in or out of it.
pub fn rank(records: &[ContributionRecord]) -> Vec<Ranked<'_, ContributionRecord>> {
    let mut scored: Vec<(f64, &ContributionRecord)> = records
        .iter()
        .map(|record| (total_score(record), record))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (total, record))| Ranked {
            rank: idx + 1,
            top: idx < TOP_N,
            total,
            record,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(name: &str, scores: [f64; 6]) -> ContributionRecord {
        ContributionRecord {
            name: name.to_string(),
            road: scores[0],
            city: scores[1],
            merit: scores[2],
            flip: scores[3],
            violation: scores[4],
            special: scores[5],
            ..ContributionRecord::default()
        }
    }

    fn attendance(present: f64, total: f64) -> AttendanceRecord {
        AttendanceRecord {
            name: "九州丨奉孝".to_string(),
            present,
            total,
            ..AttendanceRecord::default()
        }
    }

    #[test]
    fn total_sums_all_six_categories() {
        let record = contribution("A", [100.0, 0.0, 0.0, 0.0, -20.0, 0.0]);
        assert_eq!(total_score(&record), 80.0);

        let record = contribution("B", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(total_score(&record), 21.0);
    }

    #[test]
    fn missing_and_malformed_fields_total_the_same() {
        let missing: ContributionRecord =
            serde_json::from_str(r#"{"name": "A", "road": 10}"#).unwrap();
        let malformed: ContributionRecord = serde_json::from_str(
            r#"{"name": "A", "road": 10, "city": "x", "merit": null, "flip": [],
                "violation": {}, "special": "NaN"}"#,
        )
        .unwrap();
        assert_eq!(total_score(&missing), 10.0);
        assert_eq!(total_score(&malformed), total_score(&missing));
    }

    #[test]
    fn total_is_independent_of_field_order() {
        let a: ContributionRecord =
            serde_json::from_str(r#"{"road": 1, "special": 2, "city": 3}"#).unwrap();
        let b: ContributionRecord =
            serde_json::from_str(r#"{"city": 3, "road": 1, "special": 2}"#).unwrap();
        assert_eq!(total_score(&a), total_score(&b));
    }

    #[test]
    fn overflowing_total_counts_as_zero() {
        let record: ContributionRecord =
            serde_json::from_str(r#"{"name": "A", "road": 1e308, "city": 1e308}"#).unwrap();
        assert_eq!(record.road, 1e308);
        assert_eq!(total_score(&record), 0.0);

        let record = contribution("B", [-1e308, -1e308, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(total_score(&record), 0.0);
    }

    #[test]
    fn attendance_rate_rounds_to_whole_percent() {
        assert_eq!(attendance_rate(&attendance(18.0, 20.0)), 90);
        assert_eq!(attendance_rate(&attendance(16.0, 20.0)), 80);
        assert_eq!(attendance_rate(&attendance(10.0, 20.0)), 50);
        assert_eq!(attendance_rate(&attendance(2.0, 3.0)), 67);
    }

    #[test]
    fn attendance_rate_floors_zero_sessions_at_one() {
        assert_eq!(attendance_rate(&attendance(1.0, 0.0)), 100);
        assert_eq!(attendance_rate(&attendance(0.0, 0.0)), 0);
        assert_eq!(attendance_rate(&attendance(-3.0, 10.0)), 0);
    }

    #[test]
    fn ranks_descending_by_total() {
        let records = vec![
            contribution("A", [100.0, 0.0, 0.0, 0.0, -20.0, 0.0]),
            contribution("B", [50.0, 50.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        let ranked = rank(&records);
        let names: Vec<&str> = ranked.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(ranked[0].total, 100.0);
        assert_eq!(ranked[1].total, 80.0);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            contribution("first", [10.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            contribution("second", [0.0, 10.0, 0.0, 0.0, 0.0, 0.0]),
            contribution("third", [0.0, 0.0, 10.0, 0.0, 0.0, 0.0]),
            contribution("high", [50.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        let names: Vec<&str> = rank(&records)
            .iter()
            .map(|r| r.record.name.as_str())
            .collect();
        assert_eq!(names, ["high", "first", "second", "third"]);
    }

    #[test]
    fn only_first_three_are_top() {
        let records: Vec<ContributionRecord> = (0..5)
            .map(|i| contribution(&format!("m{i}"), [i as f64, 0.0, 0.0, 0.0, 0.0, 0.0]))
            .collect();
        let flags: Vec<bool> = rank(&records).iter().map(|r| r.top).collect();
        assert_eq!(flags, [true, true, true, false, false]);
    }
}
