use serde_json::{Map, Value};

use crate::common::error::{AgendaError, Result};

/// Optional text fields copied out of a raw record, in rule order
pub type Projection = Vec<(&'static str, String)>;

/// Feed artifact: empty optional fields sometimes arrive as a single newline.
const BARE_NEWLINE: &str = "\n";

/// Whether a projected value carries anything worth emitting.
pub fn is_relevant(value: &str) -> bool {
    value != BARE_NEWLINE && !value.is_empty()
}

/// Copy each `(source, target)` field that exists, is not a bare newline and
/// is non-empty. Absent and `null` fields are skipped silently.
pub fn project(raw: &Map<String, Value>, rules: &[(&str, &'static str)]) -> Result<Projection> {
    let mut out = Vec::with_capacity(rules.len());
    for &(source, target) in rules {
        match raw.get(source) {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => {
                if is_relevant(text) {
                    out.push((target, text.clone()));
                }
            }
            Some(_) => return Err(AgendaError::InvalidField(source.to_string())),
        }
    }
    Ok(out)
}
