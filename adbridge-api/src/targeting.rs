//! Ad targeting value types.
//!
//! These are the shapes forwarded to the bridge by the targeting
//! configurator. Serde derives use camelCase field names so payloads match
//! what the platform layer expects on the wire.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Structured birthday triple forwarded to the bridge.
///
/// `month` is 1-indexed (January = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl Birthday {
    /// Decompose a calendar date into the day/month/year triple.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }
}

/// Geographic location for ad targeting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, when the host platform reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
        }
    }

    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: Some(accuracy),
        }
    }
}

/// Optional targeting record accepted by `set_targeting_data`.
///
/// Every field is optional; absent fields are never forwarded. The
/// configurator additionally skips empty-string `content_url` and `gender`
/// values, while `child_directed` is forwarded whenever present, including
/// an explicit `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetingData {
    pub birthday: Option<NaiveDate>,
    pub child_directed: Option<bool>,
    pub content_url: Option<String>,
    pub gender: Option<String>,
    pub location: Option<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birthday_month_is_one_indexed() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap();
        let birthday = Birthday::from_date(date);

        assert_eq!(birthday.day, 15);
        assert_eq!(birthday.month, 1);
        assert_eq!(birthday.year, 1990);
    }

    #[test]
    fn test_birthday_december() {
        let date = NaiveDate::from_ymd_opt(2001, 12, 31).unwrap();
        let birthday = Birthday::from_date(date);

        assert_eq!(birthday.day, 31);
        assert_eq!(birthday.month, 12);
        assert_eq!(birthday.year, 2001);
    }

    #[test]
    fn test_targeting_data_serde_uses_camel_case() {
        let data = TargetingData {
            child_directed: Some(false),
            content_url: Some("https://example.com".to_string()),
            ..TargetingData::default()
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["childDirected"], serde_json::json!(false));
        assert_eq!(value["contentUrl"], serde_json::json!("https://example.com"));
    }

    #[test]
    fn test_targeting_data_default_is_empty() {
        let data = TargetingData::default();
        assert!(data.birthday.is_none());
        assert!(data.child_directed.is_none());
        assert!(data.content_url.is_none());
        assert!(data.gender.is_none());
        assert!(data.location.is_none());
    }
}
