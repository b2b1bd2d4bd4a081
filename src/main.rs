use anyhow::Context;
use tracing::info;

use agenda_feed::app::PublishUseCase;
use agenda_feed::config::AgendaConfig;
use agenda_feed::infra::{FsArtifactSink, ReqwestFeed};
use agenda_feed::observability::logging;
use agenda_feed::pipeline::processing::MonthNames;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AgendaConfig::load().context("loading agenda.toml")?;
    let _log_guard = logging::init_logging(config.logging.dir.as_deref());

    let use_case = PublishUseCase::new(
        Box::new(ReqwestFeed::new(config.feed.url.clone())),
        Box::new(FsArtifactSink::new(config.output.dir.clone())),
        MonthNames::FRENCH,
        config.grouping,
        config.output.v1_file.clone(),
        config.output.v2_file.clone(),
    );

    let report = use_case.run().await.context("publishing agenda documents")?;
    info!(
        records = report.raw_records,
        long = report.long_events,
        short = report.short_events,
        months = report.month_groups,
        "🚀 Agenda published"
    );
    Ok(())
}
