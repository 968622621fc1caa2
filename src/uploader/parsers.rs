//! Field parsers shared by the row types

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::import_log::ImportLog;

static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("static date pattern"));
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));
static DAY_MON_YY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}-[A-Za-z]{3}-\d{2}$").expect("static date pattern"));

/// Parse the date formats found in departmental spreadsheets:
/// `31/01/2012`, `2012-01-31` and `31-Jan-12`. A missing value is left to
/// attribute validation and not logged here.
pub fn parse_date(value: Option<&str>, log: &mut ImportLog, line: usize) -> Option<NaiveDate> {
    let raw = value?.trim();

    let format = if DAY_MONTH_YEAR.is_match(raw) {
        Some("%d/%m/%Y")
    } else if ISO_DATE.is_match(raw) {
        Some("%Y-%m-%d")
    } else if DAY_MON_YY.is_match(raw) {
        Some("%d-%b-%y")
    } else {
        None
    };

    match format.and_then(|f| NaiveDate::parse_from_str(raw, f).ok()) {
        Some(date) => Some(date),
        None => {
            log.error(line, format!("Unable to parse the date '{raw}'"));
            None
        }
    }
}

/// Spreadsheet booleans: `yes`, `y`, `true` and `1`, any case.
pub fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str) -> (Option<NaiveDate>, ImportLog) {
        let mut log = ImportLog::new();
        let date = parse_date(Some(value), &mut log, 7);
        (date, log)
    }

    #[test]
    fn parses_supported_formats() {
        let expected = NaiveDate::from_ymd_opt(2012, 1, 31);
        assert_eq!(parse("31/01/2012").0, expected);
        assert_eq!(parse("2012-01-31").0, expected);
        assert_eq!(parse("31-Jan-12").0, expected);
        assert_eq!(parse("5/3/2011").0, NaiveDate::from_ymd_opt(2011, 3, 5));
    }

    #[test]
    fn logs_unparseable_dates_with_line_number() {
        let (date, log) = parse("January 2012");
        assert!(date.is_none());
        let errors: Vec<_> = log.errors_on(7).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Unable to parse the date 'January 2012'");
    }

    #[test]
    fn missing_dates_are_not_logged() {
        let mut log = ImportLog::new();
        assert!(parse_date(None, &mut log, 7).is_none());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(parse("31/02/2012").0.is_none());
    }

    #[test]
    fn flags() {
        assert!(parse_flag(Some("Yes")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("no")));
        assert!(!parse_flag(None));
    }
}
