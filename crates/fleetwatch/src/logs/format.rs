//! Format — deterministic rendering of one log entry to a display line.

use chrono::{Local, LocalResult, TimeZone};
use serde_json::{Map, Value};

use crate::logs::entry::LogEntry;
use crate::logs::payload::Payload;

/// Render one entry.
///
/// Structured payloads become five left-aligned columns separated by two
/// spaces; anything that fails to parse (or carries an unrepresentable
/// timestamp) is rendered as the raw text, undecorated. The fallback is
/// recovery, not an error: a malformed line must never abort the stream.
///
/// Column widths are fixed minimums, so alignment is identical whether
/// one entry or a thousand are rendered.
pub fn format_entry(entry: &LogEntry) -> String {
    let Some(payload) = Payload::parse(&entry.raw_payload) else {
        return entry.raw_payload.clone();
    };

    let Some(clock) = render_clock(payload.timestamp) else {
        return entry.raw_payload.clone();
    };

    let data = payload.data.as_ref().map(render_data).unwrap_or_default();

    format!(
        "{:<12}  {:<11}  {:<6}  {}  {}",
        entry.source, clock, payload.log_level, payload.message, data
    )
}

/// Local 12-hour wall-clock rendering of an epoch timestamp. The
/// fractional part is ignored for display. `None` means the instant is
/// not representable, which sends the entry down the raw fallback.
fn render_clock(timestamp: f64) -> Option<String> {
    if !timestamp.is_finite() {
        return None;
    }

    match Local.timestamp_opt(timestamp.trunc() as i64, 0) {
        LocalResult::Single(time) => Some(time.format("%I:%M:%S %p").to_string()),
        _ => None,
    }
}

/// Stable textual form of the optional `data` mapping, e.g. `{"foo"=>"bar"}`.
/// Keys are sorted so rendering never depends on wire order.
fn render_data(data: &Map<String, Value>) -> String {
    let mut pairs: Vec<(&String, &Value)> = data.iter().collect();
    pairs.sort_by_key(|(key, _)| *key);

    let rendered: Vec<String> = pairs
        .into_iter()
        .map(|(key, value)| format!("{}=>{}", Value::String(key.clone()), render_value(value)))
        .collect();

    format!("{{{}}}", rendered.join(", "))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Object(map) => render_data(map),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        // Scalars in JSON literal form: quoted strings, bare numbers,
        // true/false/null.
        other => other.to_string(),
    }
}
