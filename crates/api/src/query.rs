//! Query-string types shared by several handlers.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use medidoc_core::error::CoreError;
use medidoc_core::model_family::ModelFamily;
use medidoc_db::models::usage::UsageFilter;
use serde::Deserialize;

/// Values the statistics view uses for "no filter".
const ALL_MARKERS: &[&str] = &["all", "すべて"];

/// `?start&end&model&document_type` on the usage endpoints.
///
/// Both dates are calendar days and both are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub model: Option<String>,
    pub document_type: Option<String>,
}

impl UsageQuery {
    pub fn into_filter(self) -> Result<UsageFilter, CoreError> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(CoreError::Validation(
                    "開始日は終了日以前の日付を指定してください".into(),
                ));
            }
        }

        let model = selected(self.model)
            .map(|m| m.parse::<ModelFamily>())
            .transpose()?;

        Ok(UsageFilter {
            start: self.start.map(start_of_day),
            end: self.end.and_then(|d| d.succ_opt()).map(start_of_day),
            model,
            document_type: selected(self.document_type),
        })
    }
}

fn selected(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !ALL_MARKERS.contains(&v.as_str()))
}

fn start_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_date_includes_the_whole_day() {
        let filter = UsageQuery {
            start: Some(day(2025, 5, 1)),
            end: Some(day(2025, 5, 31)),
            ..Default::default()
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.start.unwrap().to_rfc3339(), "2025-05-01T00:00:00+00:00");
        assert_eq!(filter.end.unwrap().to_rfc3339(), "2025-06-01T00:00:00+00:00");
    }

    #[test]
    fn all_markers_disable_the_filter() {
        let filter = UsageQuery {
            model: Some("すべて".into()),
            document_type: Some("all".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.model, None);
        assert_eq!(filter.document_type, None);
    }

    #[test]
    fn model_names_are_parsed() {
        let filter = UsageQuery {
            model: Some("Gemini_Flash".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.model, Some(ModelFamily::GeminiFlash));

        let err = UsageQuery {
            model: Some("Llama".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = UsageQuery {
            start: Some(day(2025, 6, 2)),
            end: Some(day(2025, 6, 1)),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }
}
