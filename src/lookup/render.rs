//! Output formatting for lookup results

use crate::Result;
use serde::Serialize;
use std::collections::BTreeSet;

/// Bracketed ascending list, e.g. `[1, 3]`.
pub fn format_machine_ids(mids: &BTreeSet<i64>) -> String {
    let ids: Vec<String> = mids.iter().map(i64::to_string).collect();
    format!("[{}]", ids.join(", "))
}

/// Pretty-print a record with 4-space indentation and lexicographically
/// ordered keys, so repeated lookups render byte-identically.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    let text = String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(text)
}
