use std::time::Instant;

use tracing::{error, info, instrument};

use crate::app::ports::{ArtifactSinkPort, FeedSourcePort};
use crate::common::error::Result;
use crate::common::types::{RawEvent, Shape};
use crate::observability::metrics;
use crate::pipeline::ingestion::decode_feed;
use crate::pipeline::output::{to_pretty_json, DocumentBuilder, EventsDocumentV1, EventsDocumentV2};
use crate::pipeline::processing::{EventTransformer, Grouper, GroupingPolicy, MonthNames};

/// Both documents built from one feed payload
#[derive(Debug, Clone)]
pub struct PublishedDocuments {
    pub v1: EventsDocumentV1,
    pub v2: EventsDocumentV2,
}

/// Summary of a successful publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub timestamp: i64,
    pub raw_records: usize,
    pub v1_events: usize,
    pub long_events: usize,
    pub short_events: usize,
    pub month_groups: usize,
}

/// Fetches the feed and publishes `events.json` and `events-v2.json`.
///
/// Nothing is written unless every record transforms cleanly for both shapes.
pub struct PublishUseCase {
    feed: Box<dyn FeedSourcePort>,
    sink: Box<dyn ArtifactSinkPort>,
    months: MonthNames,
    policy: GroupingPolicy,
    v1_file: String,
    v2_file: String,
}

impl PublishUseCase {
    pub fn new(
        feed: Box<dyn FeedSourcePort>,
        sink: Box<dyn ArtifactSinkPort>,
        months: MonthNames,
        policy: GroupingPolicy,
        v1_file: impl Into<String>,
        v2_file: impl Into<String>,
    ) -> Self {
        Self {
            feed,
            sink,
            months,
            policy,
            v1_file: v1_file.into(),
            v2_file: v2_file.into(),
        }
    }

    pub async fn run(&self) -> Result<PublishReport> {
        let outcome = self.run_once(DocumentBuilder::now()).await;
        match &outcome {
            Ok(_) => metrics::publish::run_finished("success"),
            Err(e) => {
                error!("Publish run failed, no documents written: {}", e);
                metrics::publish::run_finished("failure");
            }
        }
        outcome
    }

    /// Run with a caller-supplied document timestamp.
    #[instrument(skip(self, builder), fields(timestamp = builder.timestamp()))]
    pub async fn run_once(&self, builder: DocumentBuilder) -> Result<PublishReport> {
        let t_fetch = Instant::now();
        let payload = self.feed.fetch().await?;
        metrics::fetch::duration(t_fetch.elapsed().as_secs_f64());
        metrics::fetch::payload_bytes(payload.len());

        let raws = decode_feed(&payload)?;
        info!("✅ Fetched {} raw events", raws.len());

        let docs = self.build_documents(&raws, builder)?;

        // Serialize both before touching either file
        let v1_bytes = to_pretty_json(&docs.v1)?;
        let v2_bytes = to_pretty_json(&docs.v2)?;
        self.sink.write(&self.v1_file, &v1_bytes).await?;
        self.sink.write(&self.v2_file, &v2_bytes).await?;
        info!("💾 Saved {} and {}", self.v1_file, self.v2_file);

        Ok(PublishReport {
            timestamp: builder.timestamp(),
            raw_records: raws.len(),
            v1_events: docs.v1.events.len(),
            long_events: docs.v2.long.len(),
            short_events: docs.v2.short.iter().map(|g| g.events.len()).sum(),
            month_groups: docs.v2.short.len(),
        })
    }

    /// Transform and group `raws` into both documents without any I/O.
    pub fn build_documents(&self, raws: &[RawEvent], builder: DocumentBuilder) -> Result<PublishedDocuments> {
        let v1_events = EventTransformer::new(Shape::V1).transform_batch(raws)?;
        metrics::transform::events_transformed("v1", v1_events.len());

        let v2_events = EventTransformer::new(Shape::V2).transform_batch(raws)?;
        metrics::transform::events_transformed("v2", v2_events.len());

        let grouping = Grouper::new(&self.months, self.policy).group(v2_events);
        let short_events: usize = grouping.short.iter().map(|g| g.events.len()).sum();
        metrics::grouping::long_events(grouping.long.len());
        metrics::grouping::short_events(short_events);
        metrics::grouping::month_groups(grouping.short.len());
        info!(
            "🔧 Grouped {} long events and {} short events in {} months",
            grouping.long.len(),
            short_events,
            grouping.short.len()
        );

        Ok(PublishedDocuments {
            v1: builder.build_v1(v1_events),
            v2: builder.build_v2(grouping),
        })
    }
}
