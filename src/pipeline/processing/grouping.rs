use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::normalize::dates;
use crate::common::constants::LONG_EVENT_THRESHOLD_DAYS;
use crate::common::types::NormalizedEvent;

/// Month-name table used to label short-event groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    names: [&'static str; 12],
}

impl MonthNames {
    /// `fr_FR` full month names, as printed by `%B`.
    pub const FRENCH: MonthNames = MonthNames {
        names: [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
            "septembre", "octobre", "novembre", "décembre",
        ],
    };

    pub fn new(names: [&'static str; 12]) -> Self {
        Self { names }
    }

    /// `"<month> <year>"` label for the month containing `date`.
    pub fn label(&self, date: dates::CalendarDate) -> String {
        format!("{} {}", self.names[dates::month_index(date)], date.year())
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::FRENCH
    }
}

/// How events are split into long/short and how month runs are closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingPolicy {
    /// Events with `duration > long_threshold_days` are long.
    pub long_threshold_days: i64,
    /// Emit the month run still open when the input ends. Off by default:
    /// published documents have always omitted it.
    pub flush_trailing_month: bool,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self {
            long_threshold_days: LONG_EVENT_THRESHOLD_DAYS,
            flush_trailing_month: false,
        }
    }
}

/// Short events starting in the same month, in start order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGroup {
    pub month: String,
    pub events: Vec<NormalizedEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    pub short: Vec<MonthGroup>,
    pub long: Vec<NormalizedEvent>,
}

/// Splits normalized events into long events and month runs of short events
pub struct Grouper<'a> {
    months: &'a MonthNames,
    policy: GroupingPolicy,
}

impl<'a> Grouper<'a> {
    pub fn new(months: &'a MonthNames, policy: GroupingPolicy) -> Self {
        Self { months, policy }
    }

    pub fn is_long(&self, event: &NormalizedEvent) -> bool {
        event.duration_days() > self.policy.long_threshold_days
    }

    #[instrument(skip(self, events), fields(events = events.len()))]
    pub fn group(&self, mut events: Vec<NormalizedEvent>) -> Grouping {
        events.sort_by_key(start_key);

        let mut grouping = Grouping::default();
        let mut current_month: Option<String> = None;
        let mut buffer: Vec<NormalizedEvent> = Vec::new();

        for event in events {
            if self.is_long(&event) {
                grouping.long.push(event);
                continue;
            }

            let month = self.months.label(event.date_start);
            if current_month.as_deref() != Some(month.as_str()) {
                if let Some(finished) = current_month.replace(month) {
                    grouping.short.push(MonthGroup {
                        month: finished,
                        events: std::mem::take(&mut buffer),
                    });
                }
            }
            buffer.push(event);
        }

        match current_month {
            Some(month) if self.policy.flush_trailing_month => {
                grouping.short.push(MonthGroup { month, events: buffer });
            }
            Some(month) => {
                debug!(month = %month, dropped = buffer.len(), "Trailing month run not emitted");
            }
            None => {}
        }

        grouping
    }
}

fn start_key(event: &NormalizedEvent) -> i64 {
    event
        .ts_start
        .unwrap_or_else(|| dates::to_epoch_seconds(event.date_start))
}
