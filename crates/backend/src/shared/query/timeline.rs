use chrono::{Datelike, NaiveDateTime};

use super::aggregate::{group_by, Group};

/// Календарная гранулярность таймлайна
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// `day`, `week` или `month`, регистр не важен
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            _ => None,
        }
    }

    /// `2025-01-05`, `2025-W02` или `2025-01`. Неделя: номер ISO-недели
    /// и календарный год даты.
    pub fn label(&self, at: NaiveDateTime) -> String {
        match self {
            Period::Day => at.format("%Y-%m-%d").to_string(),
            Period::Week => format!("{}-W{:02}", at.year(), at.iso_week().week()),
            Period::Month => format!("{}-{:02}", at.year(), at.month()),
        }
    }
}

/// Группирует строки по периодам, упорядочено по метке.
/// Строки без даты пропускаются.
pub fn bucket<'a, R>(
    rows: &'a [R],
    period: Period,
    date: impl Fn(&R) -> Option<NaiveDateTime>,
) -> Vec<Group<'a, String, R>> {
    let dated: Vec<(String, &'a R)> = rows
        .iter()
        .filter_map(|row| date(row).map(|at| (period.label(at), row)))
        .collect();

    let mut buckets: Vec<Group<'a, String, R>> = group_by(&dated, |(label, _)| label.clone())
        .into_iter()
        .map(|group| Group {
            key: group.key,
            rows: group.rows.into_iter().map(|(_, row)| *row).collect(),
        })
        .collect();

    buckets.sort_by(|a, b| a.key.cmp(&b.key));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn labels_per_period() {
        assert_eq!(Period::Day.label(at(2025, 1, 5)), "2025-01-05");
        assert_eq!(Period::Month.label(at(2025, 1, 20)), "2025-01");
        assert_eq!(Period::Week.label(at(2025, 1, 8)), "2025-W02");
        // ISO-неделя 1, метка с календарным годом даты
        assert_eq!(Period::Week.label(at(2024, 12, 30)), "2024-W01");
    }

    #[test]
    fn period_parsing_ignores_case() {
        assert_eq!(Period::parse("Month"), Some(Period::Month));
        assert_eq!(Period::parse("WEEK"), Some(Period::Week));
        assert_eq!(Period::parse("quarter"), None);
    }

    #[test]
    fn month_buckets_merge_and_skip_undated_rows() {
        let rows = vec![Some(at(2025, 2, 1)), Some(at(2025, 1, 5)), None, Some(at(2025, 1, 20))];
        let buckets = bucket(&rows, Period::Month, |d| *d);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2025-01");
        assert_eq!(buckets[0].rows.len(), 2);
        assert_eq!(buckets[1].key, "2025-02");
    }
}
