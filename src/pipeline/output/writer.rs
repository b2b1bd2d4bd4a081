use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::common::error::Result;

const INDENT: &[u8] = b"    ";

/// Serialize with four-space indentation and no trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}
