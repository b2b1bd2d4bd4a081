use serde_json::Value;
use tracing::debug;

use crate::common::error::{AgendaError, Result};
use crate::common::types::RawEvent;

/// Key of the event array in the feed envelope
const DATA_KEY: &str = "data";

/// Decode a feed body (`{"data": [...]}`) into its raw event records.
pub fn decode_feed(bytes: &[u8]) -> Result<Vec<RawEvent>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| AgendaError::MalformedPayload(format!("body is not UTF-8: {e}")))?;

    let mut root: Value = serde_json::from_str(text)
        .map_err(|e| AgendaError::MalformedPayload(format!("input is not valid JSON: {e}")))?;

    let data = root
        .get_mut(DATA_KEY)
        .map(Value::take)
        .ok_or_else(|| AgendaError::MalformedPayload(format!("missing '{DATA_KEY}' key")))?;

    match data {
        Value::Array(records) => {
            debug!("Decoded {} raw records", records.len());
            Ok(records)
        }
        _ => Err(AgendaError::MalformedPayload(format!("'{DATA_KEY}' is not an array"))),
    }
}
