use std::collections::HashMap;
use std::sync::Arc;

use agenda_feed::app::ports::{ArtifactSinkPort, FeedSourcePort};
use agenda_feed::app::PublishUseCase;
use agenda_feed::common::error::{AgendaError, Result};
use agenda_feed::infra::FsArtifactSink;
use agenda_feed::pipeline::output::DocumentBuilder;
use agenda_feed::pipeline::processing::{GroupingPolicy, MonthNames};
use async_trait::async_trait;
use serde_json::{json, Value};

struct StaticFeed {
    body: std::result::Result<Vec<u8>, String>,
}

impl StaticFeed {
    fn json(value: Value) -> Self {
        Self { body: Ok(serde_json::to_vec(&value).unwrap()) }
    }

    fn raw(bytes: &[u8]) -> Self {
        Self { body: Ok(bytes.to_vec()) }
    }

    fn failing(message: &str) -> Self {
        Self { body: Err(message.to_string()) }
    }
}

#[async_trait]
impl FeedSourcePort for StaticFeed {
    async fn fetch(&self) -> Result<Vec<u8>> {
        self.body.clone().map_err(AgendaError::Fetch)
    }
}

#[derive(Clone, Default)]
struct MemorySink {
    files: Arc<tokio::sync::Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemorySink {
    async fn json(&self, name: &str) -> Value {
        let files = self.files.lock().await;
        serde_json::from_slice(files.get(name).expect("artifact written")).unwrap()
    }

    async fn is_empty(&self) -> bool {
        self.files.lock().await.is_empty()
    }
}

#[async_trait]
impl ArtifactSinkPort for MemorySink {
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.files.lock().await.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

fn feed() -> Value {
    json!({
        "data": [
            {
                "id": "30",
                "titre": "Marché de Noël",
                "date_debut": "01-12-2024",
                "date_fin": "24-12-2024",
                "lieu": "Place de Verdun",
                "categorie": "Marché,Fête,Marché",
                "description": "",
                "complement": "\n"
            },
            {
                "id": "10",
                "titre": "Concert de l'Orchestre",
                "date_debut": "05-11-2024",
                "date_fin": "05-11-2024",
                "categorie": "Concert,Classique,Concert",
                "description": "Salle pleine <a onclick=&quot;ga('send','event'); &quot;>réserver</a>"
            },
            {
                "id": "11",
                "titre": "Conférence",
                "date_debut": "20-11-2024",
                "date_fin": "21-11-2024",
                "complement": "Entrée libre"
            },
            {
                "id": "12",
                "titre": "Atelier",
                "date_debut": "02-11-2024",
                "date_fin": "03-11-2024"
            },
            {
                "id": "20",
                "titre": "Spectacle",
                "date_debut": "07-12-2024",
                "date_fin": "08-12-2024"
            }
        ]
    })
}

fn use_case(feed: StaticFeed, sink: MemorySink, policy: GroupingPolicy) -> PublishUseCase {
    PublishUseCase::new(
        Box::new(feed),
        Box::new(sink),
        MonthNames::FRENCH,
        policy,
        "events.json",
        "events-v2.json",
    )
}

fn ids(events: &Value) -> Vec<i64> {
    events.as_array().unwrap().iter().map(|e| e["id"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn test_publishes_both_documents() {
    let sink = MemorySink::default();
    let report = use_case(StaticFeed::json(feed()), sink.clone(), GroupingPolicy::default())
        .run_once(DocumentBuilder::new(1_730_000_000))
        .await
        .unwrap();

    assert_eq!(report.raw_records, 5);
    assert_eq!(report.long_events, 1);
    assert_eq!(report.month_groups, 1);
    assert_eq!(report.short_events, 3);

    let v1 = sink.json("events.json").await;
    let keys: Vec<&str> = v1.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["timestamp", "30", "10", "11", "12", "20"]);
    assert_eq!(v1["timestamp"], json!(1_730_000_000));
    assert_eq!(v1["30"]["date_start"], json!("2024-12-01"));
    assert_eq!(v1["30"]["categories"], json!(["Marché", "Fête"]));
    assert!(v1["30"].get("description").is_none());
    assert!(v1["30"].get("more").is_none());
    assert!(v1["30"].get("duration").is_none());
    assert!(v1["30"].get("ts_start").is_none());
    assert!(v1["30"]["ts_end"].is_i64());
    assert_eq!(v1["10"]["description"], json!("Salle pleine <a >réserver</a>"));
    assert_eq!(v1["11"]["more"], json!("Entrée libre"));

    let v2 = sink.json("events-v2.json").await;
    assert_eq!(v2["timestamp"], json!(1_730_000_000));
    assert_eq!(ids(&v2["long"]), vec![30]);
    assert_eq!(v2["long"][0]["duration"], json!(24));
    assert_eq!(v2["long"][0]["categories"], json!(["Marché", "Fête", "Marché"]));

    // December is still open when the feed ends and is not emitted
    let short = v2["short"].as_array().unwrap();
    assert_eq!(short.len(), 1);
    assert_eq!(short[0]["month"], json!("novembre 2024"));
    assert_eq!(ids(&short[0]["events"]), vec![12, 10, 11]);
    assert_eq!(short[0]["events"][1]["categories"], json!(["Concert", "Classique", "Concert"]));
}

#[tokio::test]
async fn test_trailing_month_emitted_when_configured() {
    let sink = MemorySink::default();
    let policy = GroupingPolicy { flush_trailing_month: true, ..GroupingPolicy::default() };
    use_case(StaticFeed::json(feed()), sink.clone(), policy)
        .run_once(DocumentBuilder::new(1))
        .await
        .unwrap();

    let v2 = sink.json("events-v2.json").await;
    let months: Vec<&str> = v2["short"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["month"].as_str().unwrap())
        .collect();
    assert_eq!(months, vec!["novembre 2024", "décembre 2024"]);
    assert_eq!(ids(&v2["short"][1]["events"]), vec![20]);
}

#[tokio::test]
async fn test_invalid_id_aborts_whole_batch() {
    let mut body = feed();
    body["data"][3]["id"] = json!("douze");
    let sink = MemorySink::default();
    let err = use_case(StaticFeed::json(body), sink.clone(), GroupingPolicy::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, AgendaError::InvalidId { .. }));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn test_malformed_date_aborts_whole_batch() {
    let mut body = feed();
    body["data"][0]["date_fin"] = json!("24/12/2024");
    let sink = MemorySink::default();
    let err = use_case(StaticFeed::json(body), sink.clone(), GroupingPolicy::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, AgendaError::MalformedDate { .. }));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn test_non_json_payload_writes_nothing() {
    let sink = MemorySink::default();
    let err = use_case(StaticFeed::raw(b"<html>maintenance</html>"), sink.clone(), GroupingPolicy::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, AgendaError::MalformedPayload(_)));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let sink = MemorySink::default();
    let err = use_case(StaticFeed::failing("connection refused"), sink.clone(), GroupingPolicy::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, AgendaError::Fetch(m) if m == "connection refused"));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn test_failed_run_leaves_existing_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("events.json"), b"previous v1").unwrap();
    std::fs::write(dir.path().join("events-v2.json"), b"previous v2").unwrap();

    let mut body = feed();
    body["data"][4]["id"] = json!("vingt");
    let err = PublishUseCase::new(
        Box::new(StaticFeed::json(body)),
        Box::new(FsArtifactSink::new(dir.path())),
        MonthNames::FRENCH,
        GroupingPolicy::default(),
        "events.json",
        "events-v2.json",
    )
    .run()
    .await
    .unwrap_err();

    assert!(matches!(err, AgendaError::InvalidId { .. }));
    assert_eq!(std::fs::read(dir.path().join("events.json")).unwrap(), b"previous v1");
    assert_eq!(std::fs::read(dir.path().join("events-v2.json")).unwrap(), b"previous v2");
}

#[tokio::test]
async fn test_files_are_pretty_printed_with_four_spaces() {
    let dir = tempfile::tempdir().unwrap();
    PublishUseCase::new(
        Box::new(StaticFeed::json(feed())),
        Box::new(FsArtifactSink::new(dir.path())),
        MonthNames::FRENCH,
        GroupingPolicy::default(),
        "events.json",
        "events-v2.json",
    )
    .run_once(DocumentBuilder::new(99))
    .await
    .unwrap();

    let v1 = std::fs::read_to_string(dir.path().join("events.json")).unwrap();
    assert!(v1.starts_with("{\n    \"timestamp\": 99,\n    \"30\": {\n        \"id\": 30,"));
    let v2 = std::fs::read_to_string(dir.path().join("events-v2.json")).unwrap();
    assert!(v2.starts_with("{\n    \"timestamp\": 99,\n    \"short\": ["));
    assert!(v2.contains("\"month\": \"novembre 2024\""));
}
