//! Metrics recorded by the publish pipeline.
//!
//! Calls go through the `metrics` facade and are no-ops until a recorder is
//! installed by the embedding process.

pub mod fetch {
    /// Record how long the feed download took
    pub fn duration(secs: f64) {
        ::metrics::histogram!("agenda_fetch_duration_seconds").record(secs);
    }

    /// Record the size of the downloaded payload
    pub fn payload_bytes(bytes: usize) {
        ::metrics::histogram!("agenda_fetch_payload_bytes").record(bytes as f64);
    }
}

pub mod transform {
    /// Record a batch of events normalized for one document shape
    pub fn events_transformed(shape: &str, count: usize) {
        ::metrics::counter!("agenda_events_transformed_total", "shape" => shape.to_string())
            .increment(count as u64);
    }
}

pub mod grouping {
    pub fn long_events(count: usize) {
        ::metrics::counter!("agenda_events_long_total").increment(count as u64);
    }

    pub fn short_events(count: usize) {
        ::metrics::counter!("agenda_events_short_total").increment(count as u64);
    }

    pub fn month_groups(count: usize) {
        ::metrics::counter!("agenda_month_groups_total").increment(count as u64);
    }
}

pub mod publish {
    /// Record the outcome of a publish run ("success" or "failure")
    pub fn run_finished(outcome: &'static str) {
        ::metrics::counter!("agenda_publish_runs_total", "outcome" => outcome).increment(1);
    }
}
