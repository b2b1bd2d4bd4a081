use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::dates::{self, CalendarDate};
use super::projector;
use super::sanitizer;
use crate::common::constants::{
    FIELD_DATE_END, FIELD_DATE_START, FIELD_ID, FIELD_TITLE, OPTIONAL_FIELD_RULES,
};
use crate::common::error::{AgendaError, Result};
use crate::common::types::{NormalizedEvent, RawEvent, Shape};

/// Turns raw feed records into [`NormalizedEvent`]s for one output shape
#[derive(Debug, Clone, Copy)]
pub struct EventTransformer {
    shape: Shape,
}

impl EventTransformer {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Transform a whole batch. The first bad record fails the batch.
    #[instrument(skip(self, raws), fields(shape = ?self.shape, records = raws.len()))]
    pub fn transform_batch(&self, raws: &[RawEvent]) -> Result<Vec<NormalizedEvent>> {
        raws.iter().map(|raw| self.transform(raw)).collect()
    }

    pub fn transform(&self, raw: &RawEvent) -> Result<NormalizedEvent> {
        let record = raw.as_object().ok_or_else(|| {
            AgendaError::MalformedPayload("event record is not an object".to_string())
        })?;

        let id = parse_id(record)?;
        let title = required_text(record, FIELD_TITLE)?.to_string();
        let date_start = required_date(record, FIELD_DATE_START)?;
        let date_end = required_date(record, FIELD_DATE_END)?;

        let (duration, ts_start) = if self.shape.has_span_fields() {
            (
                Some(dates::duration_days(date_start, date_end)),
                Some(dates::to_epoch_seconds(date_start)),
            )
        } else {
            (None, None)
        };

        let mut event = NormalizedEvent {
            id,
            title,
            date_start,
            date_end,
            duration,
            ts_start,
            ts_end: dates::to_epoch_seconds(date_end),
            location: None,
            categories: None,
            description: None,
            more: None,
        };

        for (target, value) in projector::project(record, OPTIONAL_FIELD_RULES)? {
            match target {
                "location" => event.location = Some(value),
                "categories" => event.categories = Some(self.categories(&value)),
                "description" => event.description = Some(sanitizer::strip_tracking_script(&value)),
                "more" => event.more = Some(value),
                _ => {}
            }
        }

        debug!(id = event.id, title = %event.title, "Normalized event");
        Ok(event)
    }

    fn categories(&self, raw: &str) -> Vec<String> {
        if self.shape.dedups_categories() {
            sanitizer::unique_categories(raw)
        } else {
            sanitizer::split_categories(raw)
        }
    }
}

fn parse_id(record: &Map<String, Value>) -> Result<i64> {
    let invalid = |value: &Value| AgendaError::InvalidId {
        value: value.to_string(),
    };
    match record.get(FIELD_ID) {
        None => Err(AgendaError::MissingField(FIELD_ID.to_string())),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(&Value::String(s.clone()))),
        Some(other) => Err(invalid(other)),
    }
}

fn required_text<'a>(record: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    match record.get(field) {
        None | Some(Value::Null) => Err(AgendaError::MissingField(field.to_string())),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(AgendaError::InvalidField(field.to_string())),
    }
}

fn required_date(record: &Map<String, Value>, field: &str) -> Result<CalendarDate> {
    let text = required_text(record, field)?;
    dates::parse_source_date(field, text)
}
