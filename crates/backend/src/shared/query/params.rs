use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::shared::error::{AppError, AppResult};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Пустые и отсутствующие параметры ничего не ограничивают
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Разбор ISO даты или даты-времени. Дата без времени означает полночь;
/// смещение отбрасывается, остаётся локальное время.
pub fn parse_date(name: &str, value: Option<&str>) -> AppResult<Option<NaiveDateTime>> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.naive_local()));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0));
    }

    Err(AppError::BadRequest(format!(
        "Invalid value for '{}': '{}' is not a valid date",
        name, raw
    )))
}

pub fn parse_int(name: &str, value: Option<&str>) -> AppResult<Option<i64>> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    raw.trim().parse::<i64>().map(Some).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid value for '{}': '{}' is not a valid integer",
            name,
            raw.trim()
        ))
    })
}

/// `limit` рейтинговой статистики; отрицательное значение даёт пустой список
pub fn parse_limit(value: Option<&str>, default: usize) -> AppResult<usize> {
    Ok(parse_int("limit", value)?.map_or(default, |n| n.max(0) as usize))
}

/// Разбивает список через запятую, обрезает и отбрасывает пустые элементы
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn dates_accept_common_iso_shapes() {
        assert_eq!(
            parse_date("dateFrom", Some("2025-01-05")).unwrap(),
            Some(at(2025, 1, 5, 0, 0))
        );
        assert_eq!(
            parse_date("dateFrom", Some("2025-01-05T14:30:00")).unwrap(),
            Some(at(2025, 1, 5, 14, 30))
        );
        assert_eq!(
            parse_date("dateFrom", Some("2025-01-05T14:30:00+01:00")).unwrap(),
            Some(at(2025, 1, 5, 14, 30))
        );
        assert_eq!(parse_date("dateFrom", Some("  ")).unwrap(), None);
        assert_eq!(parse_date("dateFrom", None).unwrap(), None);
    }

    #[test]
    fn malformed_date_is_a_client_error() {
        let err = parse_date("dateTo", Some("05/01/2025")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("dateTo")));
    }

    #[test]
    fn integers_and_limits() {
        assert_eq!(parse_int("codvar", Some(" 42 ")).unwrap(), Some(42));
        assert!(parse_int("codvar", Some("abc")).is_err());
        assert_eq!(parse_limit(None, 10).unwrap(), 10);
        assert_eq!(parse_limit(Some("3"), 10).unwrap(), 3);
        assert_eq!(parse_limit(Some("-5"), 10).unwrap(), 0);
        assert!(parse_limit(Some("ten"), 10).is_err());
    }

    #[test]
    fn list_splitting_drops_empty_tokens() {
        assert_eq!(split_list(Some("zaouia, other ,,")), vec!["zaouia", "other"]);
        assert!(split_list(Some(" , ")).is_empty());
        assert!(split_list(None).is_empty());
    }
}
