use std::collections::HashMap;

use chrono::Utc;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::common::constants::TIMESTAMP_KEY;
use crate::common::types::NormalizedEvent;
use crate::pipeline::processing::{Grouping, MonthGroup};

/// `events.json`: build timestamp plus every event keyed by its id.
///
/// Ids keep their first position in feed order; a repeated id replaces the
/// earlier record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsDocumentV1 {
    pub timestamp: i64,
    pub events: Vec<NormalizedEvent>,
}

impl Serialize for EventsDocumentV1 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.events.len() + 1))?;
        map.serialize_entry(TIMESTAMP_KEY, &self.timestamp)?;
        for event in &self.events {
            map.serialize_entry(&event.id.to_string(), event)?;
        }
        map.end()
    }
}

/// `events-v2.json`: month runs of short events and the long events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsDocumentV2 {
    pub timestamp: i64,
    pub short: Vec<MonthGroup>,
    pub long: Vec<NormalizedEvent>,
}

/// Wraps transformed events into the published envelopes
#[derive(Debug, Clone, Copy)]
pub struct DocumentBuilder {
    timestamp: i64,
}

impl DocumentBuilder {
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }

    /// Builder stamped with the current epoch second.
    pub fn now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn build_v1(&self, events: Vec<NormalizedEvent>) -> EventsDocumentV1 {
        let mut slots: HashMap<i64, usize> = HashMap::with_capacity(events.len());
        let mut keyed: Vec<NormalizedEvent> = Vec::with_capacity(events.len());
        for event in events {
            match slots.get(&event.id) {
                Some(&slot) => keyed[slot] = event,
                None => {
                    slots.insert(event.id, keyed.len());
                    keyed.push(event);
                }
            }
        }
        EventsDocumentV1 {
            timestamp: self.timestamp,
            events: keyed,
        }
    }

    pub fn build_v2(&self, grouping: Grouping) -> EventsDocumentV2 {
        EventsDocumentV2 {
            timestamp: self.timestamp,
            short: grouping.short,
            long: grouping.long,
        }
    }
}
