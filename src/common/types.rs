use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw event record as delivered by the agenda feed
pub type RawEvent = serde_json::Value;

/// Which output document an event is being shaped for.
///
/// The two documents share one transform; they differ only in the derived
/// fields they carry and in how the category list is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Flat, keyed-by-id document (`events.json`)
    V1,
    /// Long/short month-grouped document (`events-v2.json`)
    V2,
}

impl Shape {
    /// V1 removes repeated categories; V2 keeps the raw split.
    pub fn dedups_categories(self) -> bool {
        matches!(self, Shape::V1)
    }

    /// V2 carries `duration` and `ts_start` in addition to `ts_end`.
    pub fn has_span_fields(self) -> bool {
        matches!(self, Shape::V2)
    }
}

/// Canonical event record emitted in both documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub id: i64,
    pub title: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_start: Option<i64>,
    pub ts_end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more: Option<String>,
}

impl NormalizedEvent {
    /// Duration in days, treating a missing value as a single-day event.
    pub fn duration_days(&self) -> i64 {
        self.duration.unwrap_or(1)
    }
}
