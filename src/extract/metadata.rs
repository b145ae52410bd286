//! Metadata normalization.
//!
//! Turns the loosely-typed [`RawInfo`] read from a document into the fixed
//! [`Metadata`] schema. Nothing here fails: malformed values fall back to
//! defaults or pass through unchanged.

use std::sync::OnceLock;

use chrono::{Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use regex::Regex;

use crate::model::{Metadata, RawInfo};
use crate::transform::DateZone;

/// `D:YYYYMMDDHHmmSS`; any offset suffix is ignored.
const PDF_DATE_PATTERN: &str = r"D:(\d{4})(\d{2})(\d{2})(\d{2})(\d{2})(\d{2})";

fn pdf_date_regex() -> &'static Regex {
    static PDF_DATE: OnceLock<Regex> = OnceLock::new();
    PDF_DATE.get_or_init(|| Regex::new(PDF_DATE_PATTERN).unwrap())
}

/// Normalize raw document metadata.
///
/// A missing info dictionary normalizes the same way as one with every
/// field absent.
pub fn normalize(raw: Option<&RawInfo>, zone: DateZone) -> Metadata {
    let empty = RawInfo::default();
    let raw = raw.unwrap_or(&empty);

    Metadata {
        title: raw.title.clone().unwrap_or_default(),
        author: raw.author.clone().unwrap_or_default(),
        subject: raw.subject.clone().unwrap_or_default(),
        keywords: parse_keywords(raw.keywords.as_deref()),
        creator: raw.creator.clone().unwrap_or_default(),
        created_date: parse_date(raw.creation_date.as_deref(), zone),
        modified_date: parse_date(raw.mod_date.as_deref(), zone),
        pdf_version: raw.pdf_version.clone().unwrap_or_default(),
    }
}

/// Split a keywords string on commas and trim each entry.
///
/// An absent or empty string yields a single empty keyword, exactly as
/// splitting the empty string does.
pub fn parse_keywords(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(|keyword| keyword.trim().to_string())
        .collect()
}

/// Render a PDF date as an ISO-8601 UTC timestamp with milliseconds.
///
/// Inputs that do not match the date pattern, or whose components do not
/// form a real wall-clock time in `zone`, are returned unchanged. An absent
/// date becomes the empty string.
pub fn parse_date(raw: Option<&str>, zone: DateZone) -> String {
    let raw = raw.unwrap_or("");
    pdf_date_to_iso(raw, zone).unwrap_or_else(|| raw.to_string())
}

fn pdf_date_to_iso(raw: &str, zone: DateZone) -> Option<String> {
    let caps = pdf_date_regex().captures(raw)?;
    let field = |i: usize| caps[i].parse::<u32>().ok();

    let year: i32 = caps[1].parse().ok()?;
    let naive = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?.and_hms_opt(
        field(4)?,
        field(5)?,
        field(6)?,
    )?;

    let timestamp = match zone {
        DateZone::Utc => naive.and_utc(),
        DateZone::Local => Local
            .from_local_datetime(&naive)
            .earliest()?
            .with_timezone(&Utc),
    };
    Some(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_utc() {
        assert_eq!(
            parse_date(Some("D:20240102030405"), DateZone::Utc),
            "2024-01-02T03:04:05.000Z"
        );
    }

    #[test]
    fn test_parse_date_ignores_offset_suffix() {
        assert_eq!(
            parse_date(Some("D:20240102030405+05'00'"), DateZone::Utc),
            "2024-01-02T03:04:05.000Z"
        );
    }

    #[test]
    fn test_parse_date_local() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        assert_eq!(parse_date(Some("D:20240102030405"), DateZone::Local), expected);
    }

    #[test]
    fn test_parse_date_pass_through() {
        assert_eq!(parse_date(Some("not-a-date"), DateZone::Utc), "not-a-date");
        assert_eq!(parse_date(Some("D:2024"), DateZone::Utc), "D:2024");
        assert_eq!(parse_date(None, DateZone::Utc), "");
    }

    #[test]
    fn test_parse_date_impossible_components() {
        assert_eq!(
            parse_date(Some("D:20241302030405"), DateZone::Utc),
            "D:20241302030405"
        );
        assert_eq!(
            parse_date(Some("D:20240102250000"), DateZone::Utc),
            "D:20240102250000"
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_keywords(Some("a, b ,c")), vec!["a", "b", "c"]);
        assert_eq!(parse_keywords(Some("single")), vec!["single"]);
        assert_eq!(parse_keywords(Some("a,,b")), vec!["a", "", "b"]);
    }

    #[test]
    fn test_parse_keywords_empty_boundary() {
        assert_eq!(parse_keywords(None), vec![""]);
        assert_eq!(parse_keywords(Some("")), vec![""]);
    }

    #[test]
    fn test_normalize_full() {
        let raw = RawInfo {
            title: Some("Title".to_string()),
            author: Some("Author".to_string()),
            subject: Some("Subject".to_string()),
            keywords: Some("pdf, rust".to_string()),
            creator: Some("Writer".to_string()),
            creation_date: Some("D:20240102030405Z".to_string()),
            mod_date: Some("yesterday".to_string()),
            pdf_version: Some("1.7".to_string()),
        };
        let metadata = normalize(Some(&raw), DateZone::Utc);
        assert_eq!(metadata.title, "Title");
        assert_eq!(metadata.author, "Author");
        assert_eq!(metadata.subject, "Subject");
        assert_eq!(metadata.keywords, vec!["pdf", "rust"]);
        assert_eq!(metadata.creator, "Writer");
        assert_eq!(metadata.created_date, "2024-01-02T03:04:05.000Z");
        assert_eq!(metadata.modified_date, "yesterday");
        assert_eq!(metadata.pdf_version, "1.7");
    }

    #[test]
    fn test_normalize_missing_dictionary() {
        let metadata = normalize(None, DateZone::Utc);
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.keywords, vec![""]);
        assert_eq!(metadata.created_date, "");
        assert_eq!(metadata.pdf_version, "");
        assert_eq!(metadata, normalize(Some(&RawInfo::default()), DateZone::Utc));
    }
}
